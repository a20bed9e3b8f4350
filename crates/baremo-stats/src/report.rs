//! Everything known about one specialty's scores, ready for reporting

use baremo_core::{
    ExtractionReport, ExtractionRun, PageRange, ScoreRange, SpecialtyConfig, ValidationSummary,
};
use serde::{Deserialize, Serialize};

use crate::buckets::{bin_scores, Bin, RANGE_BUCKETS};
use crate::error::Result;
use crate::summary::{count_exact, ScoreSummary};

/// Scores shown at each end of the document-order preview
pub const PREVIEW_LEN: usize = 10;

/// Length of the ranked listing unless configured otherwise
pub const DEFAULT_TOP_LEN: usize = 10;

/// Scores at or above this count as high unless configured otherwise
pub const DEFAULT_HIGH_SCORE_THRESHOLD: f64 = 9.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub title: String,
    /// RFC 3339 timestamp
    pub generated_at: String,
    /// Source document, when the scores came from an extraction
    pub source: Option<String>,
    pub pages: Option<PageRange>,
    pub range: ScoreRange,
    /// Scores in document order
    pub scores: Vec<f64>,
    /// Highest scores, descending; `scores` keeps document order
    pub top: Vec<f64>,
    pub high_score_threshold: f64,
    /// Candidates scoring at or above `high_score_threshold`
    pub high_scores: usize,
    pub summary: Option<ScoreSummary>,
    pub buckets: Vec<Bin>,
    pub histogram: Vec<Bin>,
    /// Candidates holding the maximum of the valid range
    pub exact_max: usize,
    pub extraction: Option<ExtractionReport>,
    pub validation: Option<ValidationSummary>,
}

impl ScoreReport {
    pub fn build(
        title: impl Into<String>,
        scores: Vec<f64>,
        range: ScoreRange,
        histogram_bins: usize,
    ) -> Result<Self> {
        let buckets = bin_scores(&scores, range, RANGE_BUCKETS)?;
        let histogram = bin_scores(&scores, range, histogram_bins)?;

        Ok(Self {
            title: title.into(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            source: None,
            pages: None,
            range,
            summary: ScoreSummary::from_scores(&scores),
            exact_max: count_exact(&scores, range.high),
            top: ranked(&scores, DEFAULT_TOP_LEN),
            high_score_threshold: DEFAULT_HIGH_SCORE_THRESHOLD,
            high_scores: count_at_least(&scores, DEFAULT_HIGH_SCORE_THRESHOLD),
            scores,
            buckets,
            histogram,
            extraction: None,
            validation: None,
        })
    }

    /// Report for a finished extraction run of `config`'s specialty
    pub fn from_run(config: &SpecialtyConfig, run: &ExtractionRun) -> Result<Self> {
        let range = ScoreRange {
            low: config.range.low,
            high: config.range.high,
        };
        let mut report = Self::build(
            title(config),
            run.result.scores(),
            range,
            config.output.histogram_bins,
        )?
        .with_top(config.output.top)
        .with_high_score_threshold(config.output.high_score_threshold);
        report.source = Some(config.document.path.display().to_string());
        report.pages = Some(run.result.range);
        report.extraction = Some(run.result.report.clone());
        report.validation = Some(run.validation.clone());
        Ok(report)
    }

    /// Keep the `len` highest scores in the ranked listing
    pub fn with_top(mut self, len: usize) -> Self {
        self.top = ranked(&self.scores, len);
        self
    }

    pub fn with_high_score_threshold(mut self, threshold: f64) -> Self {
        self.high_score_threshold = threshold;
        self.high_scores = count_at_least(&self.scores, threshold);
        self
    }

    pub fn high_scores_percent(&self) -> f64 {
        if self.scores.is_empty() {
            0.0
        } else {
            self.high_scores as f64 * 100.0 / self.scores.len() as f64
        }
    }

    /// First scores in document order
    pub fn head(&self) -> &[f64] {
        &self.scores[..self.scores.len().min(PREVIEW_LEN)]
    }

    /// Last scores in document order
    pub fn tail(&self) -> &[f64] {
        &self.scores[self.scores.len().saturating_sub(PREVIEW_LEN)..]
    }

    pub fn exact_max_percent(&self) -> f64 {
        if self.scores.is_empty() {
            0.0
        } else {
            self.exact_max as f64 * 100.0 / self.scores.len() as f64
        }
    }
}

fn ranked(scores: &[f64], len: usize) -> Vec<f64> {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    sorted.truncate(len);
    sorted
}

fn count_at_least(scores: &[f64], threshold: f64) -> usize {
    scores.iter().filter(|&&s| s >= threshold).count()
}

/// Display title, e.g. `Informática (107)`
pub fn title(config: &SpecialtyConfig) -> String {
    format!("{} ({})", config.specialty.name, config.specialty.code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use baremo_core::{BaremoEngine, MemoryProvider};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_report() {
        let scores = vec![10.0, 2.5, 7.25, 10.0];
        let report = ScoreReport::build("Test", scores, ScoreRange::default(), 25).unwrap();

        assert_eq!(report.exact_max, 2);
        assert_eq!(report.exact_max_percent(), 50.0);
        assert_eq!(report.buckets.len(), 5);
        assert_eq!(report.histogram.len(), 25);
        assert_eq!(report.summary.as_ref().unwrap().count, 4);
        assert_eq!(report.head(), &[10.0, 2.5, 7.25, 10.0]);
    }

    #[test]
    fn test_top_and_high_scores() {
        let scores = vec![2.5, 9.0, 7.25, 10.0, 8.9999, 9.5];
        let report = ScoreReport::build("Test", scores.clone(), ScoreRange::default(), 25).unwrap();

        assert_eq!(report.top, vec![10.0, 9.5, 9.0, 8.9999, 7.25, 2.5]);
        assert_eq!(report.scores, scores);
        assert_eq!(report.high_score_threshold, 9.0);
        assert_eq!(report.high_scores, 3);
        assert_eq!(report.high_scores_percent(), 50.0);

        let report = report.with_top(2).with_high_score_threshold(7.0);
        assert_eq!(report.top, vec![10.0, 9.5]);
        assert_eq!(report.high_scores, 5);
        assert_eq!(report.scores, scores);
    }

    #[test]
    fn test_head_and_tail() {
        let scores: Vec<f64> = (0..25).map(|i| i as f64 / 4.0).collect();
        let report = ScoreReport::build("Test", scores, ScoreRange::default(), 25).unwrap();

        assert_eq!(report.head().len(), 10);
        assert_eq!(report.head()[0], 0.0);
        assert_eq!(report.tail().len(), 10);
        assert_eq!(report.tail()[9], 6.0);
    }

    #[test]
    fn test_empty_report() {
        let report = ScoreReport::build("Empty", vec![], ScoreRange::default(), 25).unwrap();
        assert!(report.summary.is_none());
        assert_eq!(report.exact_max_percent(), 0.0);
        assert!(report.head().is_empty());
        assert!(report.tail().is_empty());
    }

    #[test]
    fn test_from_run() {
        let config = SpecialtyConfig::from_str(
            r#"
            [specialty]
            name = "Informática"
            code = "107"

            [document]
            path = "baremo.pdf"
            page_start = 1
            page_end = 1

            [output]
            histogram_bins = 10
            high_score_threshold = 7.0
            top = 1
            "#,
        )
        .unwrap();
        let provider = MemoryProvider::new(["****1234* A, B 7,3333\n****2345* C, D 2,4167"]);
        let run = BaremoEngine::new(config.clone()).unwrap().run(&provider);
        let report = ScoreReport::from_run(&config, &run).unwrap();

        assert_eq!(report.title, "Informática (107)");
        assert_eq!(report.scores, vec![7.3333, 2.4167]);
        assert_eq!(report.histogram.len(), 10);
        assert_eq!(report.top, vec![7.3333]);
        assert_eq!(report.high_scores, 1);
        assert_eq!(report.pages, Some(PageRange { start: 1, end: 1 }));
        assert_eq!(report.source.as_deref(), Some("baremo.pdf"));
        assert_eq!(report.extraction.as_ref().unwrap().records, 2);
    }
}
