//! Record line classification and total-score extraction
//!
//! A line counts as a candidate record when it carries the record marker
//! *and* yields a score. The score is picked from the decimal tokens on the
//! line according to [`ScorePosition`], normalized to a `.` separator and
//! checked against the configured [`ScoreRange`].

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{BaremoError, Result};
use crate::patterns;

/// Which decimal token on a record line holds the total score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScorePosition {
    /// Total follows the candidate name directly
    #[default]
    First,
    /// Total closes the row after the partial scores
    Last,
}

/// What to do with a parsed score outside the valid interval
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Discard the line
    #[default]
    Drop,
    /// Keep the line with the score pinned to the nearest bound
    Clamp,
}

/// Closed interval of valid total scores
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreRange {
    pub low: f64,
    pub high: f64,
}

impl ScoreRange {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(BaremoError::InvalidConfig(format!(
                "score range [{}, {}] is empty or not finite",
                low, high
            )));
        }
        Ok(Self { low, high })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.low, self.high)
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self {
            low: 0.0,
            high: 10.0,
        }
    }
}

/// Why a marked line produced no record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// No token matched the score pattern
    NoScore,
    /// The selected token could not be read as a number
    Unparsable { token: String },
    /// The value fell outside the range under [`OutOfRangePolicy::Drop`]
    OutOfRange { value: f64 },
}

/// Result of classifying one raw line
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Line does not carry the record marker
    Unmarked,
    /// Marked line with a usable score
    Record { score: f64, clamped: bool },
    /// Marked line that had to be dropped
    Rejected(Rejection),
}

/// Compiled classifier and score extractor for one data source
#[derive(Debug, Clone)]
pub struct Extractor {
    marker: Regex,
    score: Regex,
    separators: String,
    position: ScorePosition,
    range: ScoreRange,
    policy: OutOfRangePolicy,
}

impl Extractor {
    /// Compile an extractor from raw patterns.
    ///
    /// If the score pattern has a capture group, group 1 is taken as the
    /// token; otherwise the whole match is used.
    pub fn new(
        marker: &str,
        score: &str,
        separators: &str,
        position: ScorePosition,
        range: ScoreRange,
        policy: OutOfRangePolicy,
    ) -> Result<Self> {
        if separators.is_empty() {
            return Err(BaremoError::InvalidConfig(
                "at least one decimal separator is required".to_string(),
            ));
        }
        Ok(Self {
            marker: compile(marker)?,
            score: compile(score)?,
            separators: separators.to_string(),
            position,
            range,
            policy,
        })
    }

    pub fn position(&self) -> ScorePosition {
        self.position
    }

    pub fn range(&self) -> ScoreRange {
        self.range
    }

    pub fn policy(&self) -> OutOfRangePolicy {
        self.policy
    }

    /// True when the line carries the record marker
    pub fn is_record(&self, line: &str) -> bool {
        self.marker.is_match(line)
    }

    /// All score-shaped tokens on the line, left to right
    pub fn score_tokens<'a>(&self, line: &'a str) -> Vec<&'a str> {
        self.score
            .captures_iter(line)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(0)))
            .map(|m| m.as_str())
            .collect()
    }

    /// Extract the total score from a line already classified as a record.
    ///
    /// Returns `None` when there is no token, the token is unparsable, or the
    /// value is out of range and the policy is [`OutOfRangePolicy::Drop`].
    pub fn extract_score(&self, line: &str) -> Option<f64> {
        match self.score_line(line) {
            Ok((score, _)) => Some(score),
            Err(_) => None,
        }
    }

    /// Classify a raw line and, when marked, extract its score.
    pub fn classify(&self, line: &str) -> LineOutcome {
        if !self.is_record(line) {
            return LineOutcome::Unmarked;
        }
        match self.score_line(line) {
            Ok((score, clamped)) => LineOutcome::Record { score, clamped },
            Err(rejection) => LineOutcome::Rejected(rejection),
        }
    }

    fn score_line(&self, line: &str) -> std::result::Result<(f64, bool), Rejection> {
        let tokens = self.score_tokens(line);
        let token = match self.position {
            ScorePosition::First => tokens.first(),
            ScorePosition::Last => tokens.last(),
        }
        .ok_or(Rejection::NoScore)?;

        let value = parse_decimal(token, &self.separators).ok_or_else(|| {
            Rejection::Unparsable {
                token: token.to_string(),
            }
        })?;

        if self.range.contains(value) {
            return Ok((value, false));
        }
        match self.policy {
            OutOfRangePolicy::Drop => Err(Rejection::OutOfRange { value }),
            OutOfRangePolicy::Clamp => Ok((self.range.clamp(value), true)),
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            marker: patterns::DEFAULT_MARKER.clone(),
            score: patterns::DEFAULT_SCORE.clone(),
            separators: patterns::DEFAULT_SEPARATORS.to_string(),
            position: ScorePosition::default(),
            range: ScoreRange::default(),
            policy: OutOfRangePolicy::default(),
        }
    }
}

/// Parse a decimal token, treating any of `separators` as the decimal point.
///
/// # Examples
///
/// ```
/// use baremo_core::extractor::parse_decimal;
///
/// assert_eq!(parse_decimal("7,3333", ",."), Some(7.3333));
/// assert_eq!(parse_decimal("7.3333", ",."), Some(7.3333));
/// assert_eq!(parse_decimal("n/a", ",."), None);
/// ```
pub fn parse_decimal(token: &str, separators: &str) -> Option<f64> {
    let normalized: String = token
        .trim()
        .chars()
        .map(|c| if separators.contains(c) { '.' } else { c })
        .collect();
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| BaremoError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(position: ScorePosition, policy: OutOfRangePolicy) -> Extractor {
        Extractor::new(
            patterns::DEFAULT_MARKER_PATTERN,
            r"\d{1,2}[,.]\d{4}",
            ",.",
            position,
            ScoreRange::default(),
            policy,
        )
        .unwrap()
    }

    #[test]
    fn test_first_score_after_name() {
        let ex = extractor(ScorePosition::First, OutOfRangePolicy::Drop);
        let line = "****1234* GARCIA LOPEZ, ANA 7,3333";

        assert!(ex.is_record(line));
        assert_eq!(ex.extract_score(line), Some(7.3333));
    }

    #[test]
    fn test_first_and_last_policies() {
        let line = "****5678* RUIZ, EVA 3,0000 5,0000 8,5000";

        let last = extractor(ScorePosition::Last, OutOfRangePolicy::Drop);
        assert_eq!(last.extract_score(line), Some(8.5));

        let first = extractor(ScorePosition::First, OutOfRangePolicy::Drop);
        assert_eq!(first.extract_score(line), Some(3.0));
    }

    #[test]
    fn test_out_of_range_drop_and_clamp() {
        let line = "****1111* MORA, LUIS 12,0000";

        let drop = extractor(ScorePosition::First, OutOfRangePolicy::Drop);
        assert_eq!(drop.extract_score(line), None);
        assert_eq!(
            drop.classify(line),
            LineOutcome::Rejected(Rejection::OutOfRange { value: 12.0 })
        );

        let clamp = extractor(ScorePosition::First, OutOfRangePolicy::Clamp);
        assert_eq!(clamp.extract_score(line), Some(10.0));
        assert_eq!(
            clamp.classify(line),
            LineOutcome::Record {
                score: 10.0,
                clamped: true
            }
        );
    }

    #[test]
    fn test_glued_columns_keep_first_total() {
        let ex = Extractor::default();
        let line = "****1234* RUIZ, EVA 3,00005,0000 8,5000";

        assert_eq!(ex.score_tokens(line), vec!["3,0000", "5,0000", "8,5000"]);
        assert_eq!(ex.extract_score(line), Some(3.0));
    }

    #[test]
    fn test_separator_normalization() {
        let ex = Extractor::default();
        assert_eq!(
            ex.extract_score("****0001* A, B 7,3333"),
            ex.extract_score("****0001* A, B 7.3333")
        );
        assert_eq!(ex.extract_score("****0001* A, B 7.3333"), Some(7.3333));
    }

    #[test]
    fn test_marked_line_without_score() {
        let ex = Extractor::default();
        assert_eq!(
            ex.classify("****1234* APELLIDOS Y NOMBRE"),
            LineOutcome::Rejected(Rejection::NoScore)
        );
    }

    #[test]
    fn test_unmarked_line_is_skipped() {
        let ex = Extractor::default();
        assert_eq!(ex.classify("Total 7,3333 page footer"), LineOutcome::Unmarked);
    }

    #[test]
    fn test_capture_group_selects_token() {
        let ex = Extractor::new(
            patterns::DEFAULT_MARKER_PATTERN,
            r",\s+(\d{1,2},\d{4})",
            ",",
            ScorePosition::First,
            ScoreRange::default(),
            OutOfRangePolicy::Drop,
        )
        .unwrap();
        let line = "****4321* 1,5000 SANZ GIL MARTA, 6,2500 1,0000";

        assert_eq!(ex.score_tokens(line), vec!["6,2500"]);
        assert_eq!(ex.extract_score(line), Some(6.25));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = Extractor::new(
            "(unclosed",
            r"\d",
            ",",
            ScorePosition::First,
            ScoreRange::default(),
            OutOfRangePolicy::Drop,
        )
        .unwrap_err();
        assert!(matches!(err, BaremoError::InvalidPattern { .. }));
    }

    #[test]
    fn test_score_range_rejects_inverted_bounds() {
        assert!(ScoreRange::new(10.0, 0.0).is_err());
        assert!(ScoreRange::new(0.0, f64::NAN).is_err());
        assert!(ScoreRange::new(5.0, 5.0).is_ok());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: classify never panics on arbitrary input
        #[test]
        fn classify_never_panics(line in ".{0,200}") {
            let _ = Extractor::default().classify(&line);
        }

        /// Property: every accepted score lies inside the range, under both policies
        #[test]
        fn accepted_scores_stay_in_range(
            int_part in 0u32..100,
            frac in 0u32..10000,
            clamp in any::<bool>(),
        ) {
            let policy = if clamp { OutOfRangePolicy::Clamp } else { OutOfRangePolicy::Drop };
            let ex = Extractor::new(
                patterns::DEFAULT_MARKER_PATTERN,
                &patterns::score_pattern(",.", 4, false),
                ",.",
                ScorePosition::First,
                ScoreRange::default(),
                policy,
            ).unwrap();
            let line = format!("****1234* NOMBRE, X {},{:04}", int_part, frac);

            if let Some(score) = ex.extract_score(&line) {
                prop_assert!((0.0..=10.0).contains(&score));
            }
        }

        /// Property: comma and period separators parse to the same value
        #[test]
        fn separators_parse_identically(int_part in 0u32..100, frac in 0u32..10000) {
            let comma = format!("{},{:04}", int_part, frac);
            let period = format!("{}.{:04}", int_part, frac);
            prop_assert_eq!(parse_decimal(&comma, ",."), parse_decimal(&period, ",."));
        }
    }
}
