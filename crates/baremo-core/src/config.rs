//! Per-specialty configuration
//!
//! Each specialty is described by one TOML file: where its rows live in the
//! document, how to recognize and read them, and which hand-checked samples
//! to compare against.
//!
//! ```toml
//! [specialty]
//! name = "Informática"
//! code = "107"
//!
//! [document]
//! path = "data/rh03_257_2025_590_12_baremo_prov.pdf"
//! page_start = 2649
//! page_end = 2697
//!
//! [patterns]
//! position = "first"
//!
//! [validation.first_page]
//! page = 2649
//! scores = [2.4167, 7.3333, 3.6500]
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BaremoError, Result};
use crate::extractor::{Extractor, OutOfRangePolicy, ScorePosition, ScoreRange};
use crate::patterns;

/// Configuration for one specialty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialtyConfig {
    /// Specialty identity, used in reports and file names
    pub specialty: SpecialtyInfo,
    /// Source document and page range
    pub document: DocumentConfig,
    /// Record marker and score patterns
    #[serde(default)]
    pub patterns: PatternConfig,
    /// Valid score interval and out-of-range handling
    #[serde(default)]
    pub range: RangeConfig,
    /// Reference samples and advisory thresholds
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Export settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl SpecialtyConfig {
    /// Load a configuration from a TOML file.
    ///
    /// Relative `document.path` and `output.dir` are resolved against the
    /// directory holding the configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config = Self::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.document.path = resolve(base, &config.document.path);
            config.output.dir = resolve(base, &config.output.dir);
        }
        Ok(config)
    }

    /// Parse a configuration from a TOML string
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }

    /// Inclusive page range to walk
    pub fn page_range(&self) -> PageRange {
        PageRange {
            start: self.document.page_start,
            end: self.document.page_end,
        }
    }

    /// Check the configuration and compile it into an [`Extractor`].
    ///
    /// Fails before any page is read if patterns do not compile, the page
    /// range or score range is inverted or empty, a validation sample is
    /// empty, epsilon/threshold are out of bounds, or the report would have
    /// no histogram bins.
    pub fn extractor(&self) -> Result<Extractor> {
        self.page_range().check()?;
        self.validation.check()?;
        self.output.check()?;

        let range = ScoreRange::new(self.range.low, self.range.high)?;
        if range.width() <= 0.0 {
            return Err(BaremoError::InvalidConfig(format!(
                "score range [{}, {}] has no width",
                range.low, range.high
            )));
        }
        let score = match &self.patterns.score {
            Some(pattern) => pattern.clone(),
            None => {
                if self.patterns.fraction_digits == 0 {
                    return Err(BaremoError::InvalidConfig(
                        "fraction_digits must be at least 1".to_string(),
                    ));
                }
                patterns::score_pattern(
                    &self.patterns.separators,
                    self.patterns.fraction_digits,
                    self.patterns.word_boundaries,
                )
            }
        };

        Extractor::new(
            &self.patterns.marker,
            &score,
            &self.patterns.separators,
            self.patterns.position,
            range,
            self.range.policy,
        )
    }

    /// Base name for exported files, e.g. `informatica_107`
    pub fn file_stem(&self) -> String {
        if let Some(stem) = &self.output.stem {
            return stem.clone();
        }
        let name: String = self
            .specialty
            .name
            .to_lowercase()
            .chars()
            .map(fold_accent)
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        let name = name
            .split('_')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_");
        format!("{}_{}", name, self.specialty.code)
    }
}

/// Specialty identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialtyInfo {
    /// Display name (e.g. "Matemáticas")
    pub name: String,
    /// Official specialty code (e.g. "008")
    pub code: String,
}

/// Source document and page range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Path to the PDF or a form-feed separated text dump
    pub path: PathBuf,
    /// First page of the specialty, 1-based
    pub page_start: usize,
    /// Last page of the specialty, 1-based and inclusive
    pub page_end: usize,
}

/// Record marker and score token patterns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Regex identifying candidate lines
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Explicit score regex; built from `separators` and `fraction_digits` when absent
    #[serde(default)]
    pub score: Option<String>,
    /// Characters accepted as decimal separator
    #[serde(default = "default_separators")]
    pub separators: String,
    /// Fractional digits of a score token
    #[serde(default = "default_fraction_digits")]
    pub fraction_digits: usize,
    /// Require score tokens to stand alone; off so glued columns still split
    #[serde(default)]
    pub word_boundaries: bool,
    /// Which token on the line is the total
    #[serde(default)]
    pub position: ScorePosition,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            score: None,
            separators: default_separators(),
            fraction_digits: default_fraction_digits(),
            word_boundaries: false,
            position: ScorePosition::default(),
        }
    }
}

fn default_marker() -> String {
    patterns::DEFAULT_MARKER_PATTERN.to_string()
}

fn default_separators() -> String {
    patterns::DEFAULT_SEPARATORS.to_string()
}

fn default_fraction_digits() -> usize {
    patterns::DEFAULT_FRACTION_DIGITS
}

/// Valid score interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeConfig {
    #[serde(default = "default_low")]
    pub low: f64,
    #[serde(default = "default_high")]
    pub high: f64,
    /// Drop (default) or clamp values outside `[low, high]`
    #[serde(default)]
    pub policy: OutOfRangePolicy,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            low: default_low(),
            high: default_high(),
            policy: OutOfRangePolicy::default(),
        }
    }
}

fn default_low() -> f64 {
    0.0
}

fn default_high() -> f64 {
    10.0
}

/// Hand-checked scores for one page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationSample {
    /// Page the sample was transcribed from, 1-based
    pub page: usize,
    /// Expected totals in document order
    pub scores: Vec<f64>,
}

/// Expected number of candidates for the whole specialty
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateBounds {
    pub min: usize,
    pub max: usize,
}

/// Reference samples and advisory thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Absolute tolerance for a position-wise match
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Agreement ratio at or above which a page counts as validated
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub first_page: Option<ValidationSample>,
    #[serde(default)]
    pub last_page: Option<ValidationSample>,
    #[serde(default)]
    pub expected_candidates: Option<CandidateBounds>,
    /// Rows a full page is expected to hold
    #[serde(default)]
    pub expected_per_page: Option<usize>,
}

impl ValidationConfig {
    /// Samples in page order
    pub fn samples(&self) -> impl Iterator<Item = &ValidationSample> {
        self.first_page.iter().chain(self.last_page.iter())
    }

    fn check(&self) -> Result<()> {
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(BaremoError::InvalidConfig(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(BaremoError::InvalidConfig(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        for sample in self.samples() {
            if sample.scores.is_empty() {
                return Err(BaremoError::InvalidConfig(format!(
                    "validation sample for page {} has no scores",
                    sample.page
                )));
            }
        }
        if let Some(bounds) = self.expected_candidates {
            if bounds.min > bounds.max {
                return Err(BaremoError::InvalidConfig(format!(
                    "expected_candidates min {} exceeds max {}",
                    bounds.min, bounds.max
                )));
            }
        }
        Ok(())
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            threshold: default_threshold(),
            first_page: None,
            last_page: None,
            expected_candidates: None,
            expected_per_page: None,
        }
    }
}

fn default_epsilon() -> f64 {
    1e-3
}

fn default_threshold() -> f64 {
    0.7
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving exported files
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Base file name; derived from the specialty when absent
    #[serde(default)]
    pub stem: Option<String>,
    /// Histogram bin count for reports
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
    /// Scores at or above this count as high in reports
    #[serde(default = "default_high_score_threshold")]
    pub high_score_threshold: f64,
    /// Length of the ranked top listing in reports
    #[serde(default = "default_top")]
    pub top: usize,
}

impl OutputConfig {
    fn check(&self) -> Result<()> {
        if self.histogram_bins == 0 {
            return Err(BaremoError::InvalidConfig(
                "histogram_bins must be at least 1".to_string(),
            ));
        }
        if !self.high_score_threshold.is_finite() {
            return Err(BaremoError::InvalidConfig(format!(
                "high_score_threshold must be finite, got {}",
                self.high_score_threshold
            )));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            stem: None,
            histogram_bins: default_histogram_bins(),
            high_score_threshold: default_high_score_threshold(),
            top: default_top(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_histogram_bins() -> usize {
    25
}

fn default_high_score_threshold() -> f64 {
    9.0
}

fn default_top() -> usize {
    10
}

/// Inclusive, 1-based page range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageRange {
    pub start: usize,
    pub end: usize,
}

impl PageRange {
    pub fn new(start: usize, end: usize) -> Result<Self> {
        let range = Self { start, end };
        range.check()?;
        Ok(range)
    }

    /// Number of pages in the range
    pub fn page_count(&self) -> usize {
        if self.end < self.start {
            return 0;
        }
        (self.end - self.start).saturating_add(1)
    }

    pub fn contains(&self, page: usize) -> bool {
        page >= self.start && page <= self.end
    }

    fn check(&self) -> Result<()> {
        if self.start == 0 {
            return Err(BaremoError::InvalidRange(
                "pages are numbered from 1".to_string(),
            ));
        }
        if self.start > self.end {
            return Err(BaremoError::InvalidRange(format!(
                "start page {} is after end page {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = r#"
        [specialty]
        name = "Lengua Castellana y Literatura"
        code = "004"

        [document]
        path = "baremo.pdf"
        page_start = 113
        page_end = 359
    "#;

    #[test]
    fn test_minimal_config_defaults() {
        let config = SpecialtyConfig::from_str(MINIMAL).unwrap();

        assert_eq!(config.patterns.marker, patterns::DEFAULT_MARKER_PATTERN);
        assert_eq!(config.patterns.position, ScorePosition::First);
        assert_eq!(config.range.low, 0.0);
        assert_eq!(config.range.high, 10.0);
        assert_eq!(config.range.policy, OutOfRangePolicy::Drop);
        assert_eq!(config.validation.epsilon, 1e-3);
        assert_eq!(config.validation.threshold, 0.7);
        assert_eq!(config.output.histogram_bins, 25);
        assert_eq!(config.output.high_score_threshold, 9.0);
        assert_eq!(config.output.top, 10);
        assert!(!config.patterns.word_boundaries);
        assert_eq!(config.page_range(), PageRange { start: 113, end: 359 });
        assert!(config.extractor().is_ok());
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
            [specialty]
            name = "Matemáticas"
            code = "008"

            [document]
            path = "baremo.pdf"
            page_start = 10
            page_end = 12

            [patterns]
            position = "last"
            separators = ","
            fraction_digits = 4

            [range]
            policy = "clamp"

            [validation]
            epsilon = 0.0001
            threshold = 0.9
            expected_per_page = 7
            expected_candidates = { min = 300, max = 340 }

            [validation.first_page]
            page = 10
            scores = [2.4167, 7.3333]

            [output]
            dir = "out"
            stem = "mates"
        "#;
        let config = SpecialtyConfig::from_str(toml).unwrap();

        assert_eq!(config.patterns.position, ScorePosition::Last);
        assert_eq!(config.range.policy, OutOfRangePolicy::Clamp);
        assert_eq!(config.validation.expected_per_page, Some(7));
        assert_eq!(
            config.validation.expected_candidates,
            Some(CandidateBounds { min: 300, max: 340 })
        );
        assert_eq!(
            config.validation.first_page,
            Some(ValidationSample {
                page: 10,
                scores: vec![2.4167, 7.3333]
            })
        );
        assert_eq!(config.file_stem(), "mates");

        let extractor = config.extractor().unwrap();
        assert_eq!(extractor.position(), ScorePosition::Last);
        assert_eq!(extractor.extract_score("****1234* A, B 1,0000 12,0000"), Some(10.0));
    }

    #[test]
    fn test_inverted_page_range_rejected() {
        let mut config = SpecialtyConfig::from_str(MINIMAL).unwrap();
        config.document.page_start = 400;

        assert!(matches!(
            config.extractor(),
            Err(BaremoError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_empty_sample_rejected() {
        let mut config = SpecialtyConfig::from_str(MINIMAL).unwrap();
        config.validation.last_page = Some(ValidationSample {
            page: 359,
            scores: vec![],
        });

        assert!(matches!(
            config.extractor(),
            Err(BaremoError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_bad_epsilon_rejected() {
        let mut config = SpecialtyConfig::from_str(MINIMAL).unwrap();
        config.validation.epsilon = 0.0;
        assert!(config.extractor().is_err());
    }

    #[test]
    fn test_report_settings_checked_before_walking() {
        let mut config = SpecialtyConfig::from_str(MINIMAL).unwrap();
        config.output.histogram_bins = 0;
        assert!(matches!(
            config.extractor(),
            Err(BaremoError::InvalidConfig(_))
        ));

        let mut config = SpecialtyConfig::from_str(MINIMAL).unwrap();
        config.range.low = 5.0;
        config.range.high = 5.0;
        assert!(matches!(
            config.extractor(),
            Err(BaremoError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_word_boundaries_opt_in() {
        let line = "****1234* RUIZ, EVA 3,00005,0000 8,5000";
        let mut config = SpecialtyConfig::from_str(MINIMAL).unwrap();
        assert_eq!(config.extractor().unwrap().extract_score(line), Some(3.0));

        config.patterns.word_boundaries = true;
        assert_eq!(config.extractor().unwrap().extract_score(line), Some(8.5));
    }

    #[test]
    fn test_page_count_saturates() {
        assert_eq!(PageRange { start: 2649, end: 2697 }.page_count(), 49);
        assert_eq!(PageRange { start: 1, end: usize::MAX }.page_count(), usize::MAX);
        assert_eq!(PageRange { start: 5, end: 4 }.page_count(), 0);
    }

    #[test]
    fn test_file_stem_folds_accents() {
        let config = SpecialtyConfig::from_str(MINIMAL).unwrap();
        assert_eq!(config.file_stem(), "lengua_castellana_y_literatura_004");
    }

    #[test]
    fn test_from_file_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lengua.toml");
        fs::write(&path, MINIMAL).unwrap();

        let config = SpecialtyConfig::from_file(&path).unwrap();
        assert_eq!(config.document.path, dir.path().join("baremo.pdf"));
        assert_eq!(config.output.dir, dir.path().join("output"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = SpecialtyConfig::from_file("/nonexistent/specialty.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
