//! Score exports: CSV, flat listing and a Rust array literal
//!
//! All exports keep extraction order and print scores with four decimals,
//! the precision of the official listing.

use std::fmt::Write as _;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One CSV row; `position` is 1-based
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    #[serde(default)]
    pub position: Option<usize>,
    pub score: f64,
}

/// Write `position,score` rows
pub fn write_csv<W: Write>(writer: W, scores: &[f64]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["position", "score"])?;
    for (idx, score) in scores.iter().enumerate() {
        wtr.write_record([(idx + 1).to_string(), format!("{:.4}", score)])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// One score per line under a commented header
pub fn format_listing(title: &str, scores: &[f64]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", title);
    let _ = writeln!(out, "# candidates: {}", scores.len());
    let _ = writeln!(out, "# order: as listed in the document");
    for score in scores {
        let _ = writeln!(out, "{:.4}", score);
    }
    out
}

/// A `pub const` array ready to paste into Rust code
///
/// # Examples
///
/// ```
/// use baremo_stats::export::format_rust_literal;
///
/// let code = format_rust_literal("informatica_107", &[7.3333, 2.4167]);
/// assert!(code.contains("pub const INFORMATICA_107_SCORES: [f64; 2] = ["));
/// ```
pub fn format_rust_literal(stem: &str, scores: &[f64]) -> String {
    const PER_LINE: usize = 10;

    let mut out = String::new();
    let _ = writeln!(out, "// {} candidates in document order", scores.len());
    let _ = writeln!(
        out,
        "pub const {}: [f64; {}] = [",
        const_name(stem),
        scores.len()
    );
    for chunk in scores.chunks(PER_LINE) {
        let line = chunk
            .iter()
            .map(|s| format!("{:.4}", s))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "    {},", line);
    }
    out.push_str("];\n");
    out
}

fn const_name(stem: &str) -> String {
    let mut name: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert_str(0, "SPECIALTY_");
    }
    name.push_str("_SCORES");
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_csv_layout() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[7.3333, 10.0]).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "position,score\n1,7.3333\n2,10.0000\n");
    }

    #[test]
    fn test_listing_keeps_duplicates() {
        let listing = format_listing("Informática (107)", &[5.0, 5.0, 2.4167]);
        let values: Vec<&str> = listing.lines().filter(|l| !l.starts_with('#')).collect();

        assert_eq!(values, vec!["5.0000", "5.0000", "2.4167"]);
        assert!(listing.starts_with("# Informática (107)\n# candidates: 3\n"));
    }

    #[test]
    fn test_rust_literal_wraps_lines() {
        let scores: Vec<f64> = (0..12).map(|i| i as f64 / 2.0).collect();
        let code = format_rust_literal("informatica_107", &scores);
        let lines: Vec<&str> = code.lines().collect();

        assert_eq!(lines[1], "pub const INFORMATICA_107_SCORES: [f64; 12] = [");
        assert!(lines[2].starts_with("    0.0000, 0.5000"));
        assert_eq!(lines[3], "    5.0000, 5.5000,");
        assert_eq!(lines[4], "];");
    }

    #[test]
    fn test_const_name() {
        assert_eq!(const_name("fisica-quimica 010"), "FISICA_QUIMICA_010_SCORES");
        assert_eq!(const_name("107"), "SPECIALTY_107_SCORES");
    }

    #[test]
    fn test_empty_literal_compiles_shape() {
        let code = format_rust_literal("x", &[]);
        assert!(code.contains("[f64; 0] = [\n];"));
    }
}
