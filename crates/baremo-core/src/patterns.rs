//! Default patterns for candidate lines in the provisional baremo listing
//!
//! Candidate rows start with a masked national ID (`****1234*`) followed by
//! the surname, name and a run of decimal sub-scores written with four
//! fractional digits and a comma separator (`7,3333`).

use lazy_static::lazy_static;
use regex::Regex;

/// Masked national-ID token: four mask characters, digits, one mask character
pub const DEFAULT_MARKER_PATTERN: &str = r"\*{4}\d+\*";

/// Decimal separators accepted by the default score pattern
pub const DEFAULT_SEPARATORS: &str = ",.";

/// Fractional digits every score in the listing carries
pub const DEFAULT_FRACTION_DIGITS: usize = 4;

/// Headings that open a specialty section, used when locating page ranges
pub const SPECIALTY_HEADING_TEMPLATES: &[&str] = &[
    r"{code}.*{name}",
    r"{name}.*{code}",
    r"PROFESORES.*{name}",
    r"ENSEÑANZA SECUNDARIA.*{name}",
];

lazy_static! {
    /// Compiled default record marker
    pub static ref DEFAULT_MARKER: Regex = Regex::new(DEFAULT_MARKER_PATTERN).unwrap();

    /// Compiled default score pattern (`\d{1,2}[,.]\d{4}`)
    pub static ref DEFAULT_SCORE: Regex =
        Regex::new(&score_pattern(DEFAULT_SEPARATORS, DEFAULT_FRACTION_DIGITS, false)).unwrap();
}

/// Build the decimal score pattern for a set of separators and a fixed
/// number of fractional digits.
///
/// One or two integer digits, one separator, exactly `fraction_digits`
/// digits. With `word_boundaries` the token must stand alone, so `123,0000`
/// or `7,33334` never match; without it, columns that text extraction glued
/// together (`3,00005,0000`) still split into scores.
///
/// # Examples
///
/// ```
/// use baremo_core::patterns::score_pattern;
///
/// assert_eq!(score_pattern(",.", 4, false), r"\d{1,2}[,\.]\d{4}");
/// assert_eq!(score_pattern(",", 4, true), r"\b\d{1,2}[,]\d{4}\b");
/// ```
pub fn score_pattern(separators: &str, fraction_digits: usize, word_boundaries: bool) -> String {
    let class: String = separators
        .chars()
        .map(|c| regex::escape(&c.to_string()))
        .collect();
    let token = format!(r"\d{{1,2}}[{}]\d{{{}}}", class, fraction_digits);
    if word_boundaries {
        format!(r"\b{}\b", token)
    } else {
        token
    }
}

/// Expand the heading templates for a specialty into case-insensitive
/// patterns.
///
/// Name and code are escaped, so accents and punctuation in specialty names
/// are matched literally.
pub fn specialty_heading_patterns(name: &str, code: &str) -> Vec<String> {
    let name = regex::escape(name);
    let code = regex::escape(code);
    SPECIALTY_HEADING_TEMPLATES
        .iter()
        .map(|template| {
            format!(
                "(?i){}",
                template.replace("{name}", &name).replace("{code}", &code)
            )
        })
        .collect()
}
