//! Reference validation against hand-checked samples
//!
//! Purely advisory: outcomes are logged and reported, extraction results are
//! kept regardless of agreement.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{CandidateBounds, ValidationConfig, ValidationSample};
use crate::walker::ExtractionResult;

/// Whether a check met its threshold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Validated,
    NeedsReview,
}

impl ValidationStatus {
    pub fn is_validated(&self) -> bool {
        matches!(self, ValidationStatus::Validated)
    }
}

/// A sample position whose extracted value disagrees with the reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionMismatch {
    /// 1-based position within the page
    pub position: usize,
    pub expected: f64,
    /// `None` when the page yielded fewer records than the sample holds
    pub extracted: Option<f64>,
}

/// Agreement between one page and its reference sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageValidation {
    pub page: usize,
    pub expected: usize,
    pub matched: usize,
    pub ratio: f64,
    pub status: ValidationStatus,
    pub mismatches: Vec<PositionMismatch>,
}

/// Total candidate count checked against the expected bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountValidation {
    pub found: usize,
    pub bounds: CandidateBounds,
    pub status: ValidationStatus,
}

/// Every advisory check run for one extraction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub pages: Vec<PageValidation>,
    pub count: Option<CountValidation>,
}

impl ValidationSummary {
    /// True when every check that ran was validated
    pub fn all_validated(&self) -> bool {
        self.pages.iter().all(|p| p.status.is_validated())
            && self.count.as_ref().map_or(true, |c| c.status.is_validated())
    }
}

/// Fraction of sample positions matched within `epsilon`.
///
/// Positions are compared pairwise from the start of both slices; sample
/// positions with no extracted counterpart count as mismatches. An empty
/// sample yields `0.0`.
///
/// # Examples
///
/// ```
/// use baremo_core::validator::agreement_ratio;
///
/// let ratio = agreement_ratio(&[3.5, 8.5, 2.5], &[3.5, 8.5, 2.4], 0.001);
/// assert!((ratio - 2.0 / 3.0).abs() < 1e-12);
/// ```
pub fn agreement_ratio(extracted: &[f64], expected: &[f64], epsilon: f64) -> f64 {
    if expected.is_empty() {
        return 0.0;
    }
    let matched = count_matches(extracted, expected, epsilon);
    matched as f64 / expected.len() as f64
}

fn count_matches(extracted: &[f64], expected: &[f64], epsilon: f64) -> usize {
    expected
        .iter()
        .zip(extracted.iter())
        .filter(|(e, x)| (*e - *x).abs() <= epsilon)
        .count()
}

/// Compares extracted pages against reference samples
#[derive(Debug, Clone, Copy)]
pub struct ReferenceValidator {
    epsilon: f64,
    threshold: f64,
}

impl ReferenceValidator {
    pub fn new(epsilon: f64, threshold: f64) -> Self {
        Self { epsilon, threshold }
    }

    pub fn from_config(config: &ValidationConfig) -> Self {
        Self::new(config.epsilon, config.threshold)
    }

    /// Compare the scores extracted from a page with its sample
    pub fn check_page(&self, sample: &ValidationSample, extracted: &[f64]) -> PageValidation {
        let ratio = agreement_ratio(extracted, &sample.scores, self.epsilon);
        let matched = count_matches(extracted, &sample.scores, self.epsilon);

        let mismatches = sample
            .scores
            .iter()
            .enumerate()
            .filter_map(|(idx, &expected)| {
                let extracted = extracted.get(idx).copied();
                match extracted {
                    Some(value) if (value - expected).abs() <= self.epsilon => None,
                    _ => Some(PositionMismatch {
                        position: idx + 1,
                        expected,
                        extracted,
                    }),
                }
            })
            .collect();

        let status = self.status(ratio);
        match status {
            ValidationStatus::Validated => info!(
                page = sample.page,
                matched,
                expected = sample.scores.len(),
                "reference sample validated"
            ),
            ValidationStatus::NeedsReview => warn!(
                page = sample.page,
                matched,
                expected = sample.scores.len(),
                ratio,
                "reference sample below threshold, needs review"
            ),
        }

        PageValidation {
            page: sample.page,
            expected: sample.scores.len(),
            matched,
            ratio,
            status,
            mismatches,
        }
    }

    /// Run every configured check against an extraction result
    pub fn check_result(
        &self,
        result: &ExtractionResult,
        config: &ValidationConfig,
    ) -> ValidationSummary {
        let pages = config
            .samples()
            .map(|sample| self.check_page(sample, &result.scores_on_page(sample.page)))
            .collect();

        let count = config.expected_candidates.map(|bounds| {
            let found = result.len();
            let status = if found >= bounds.min && found <= bounds.max {
                ValidationStatus::Validated
            } else {
                warn!(
                    found,
                    min = bounds.min,
                    max = bounds.max,
                    "candidate count outside expected bounds"
                );
                ValidationStatus::NeedsReview
            };
            CountValidation {
                found,
                bounds,
                status,
            }
        });

        ValidationSummary { pages, count }
    }

    fn status(&self, ratio: f64) -> ValidationStatus {
        if ratio >= self.threshold {
            ValidationStatus::Validated
        } else {
            ValidationStatus::NeedsReview
        }
    }
}
