//! Descriptive statistics over a list of scores
//!
//! Every score counts, repeated values included: two candidates with the same
//! total are two data points.

use serde::{Deserialize, Serialize};

/// Calculate a percentile of `samples` with linear interpolation between
/// the nearest ranks.
///
/// Returns `None` for an empty slice or `p` outside `0.0..=100.0`.
///
/// # Examples
///
/// ```
/// use baremo_stats::summary::percentile;
///
/// let data = vec![1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile(&data, 50.0), Some(2.5));
/// assert_eq!(percentile(&data, 25.0), Some(1.75));
/// ```
pub fn percentile(samples: &[f64], p: f64) -> Option<f64> {
    if samples.is_empty() || !(0.0..=100.0).contains(&p) {
        return None;
    }

    let sorted = sorted(samples);
    Some(percentile_sorted(&sorted, p))
}

fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let fraction = rank - lower as f64;
        sorted[lower] + fraction * (sorted[upper] - sorted[lower])
    }
}

fn sorted(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Summary of one specialty's scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub p25: f64,
    pub p75: f64,
    /// Number of different values
    pub distinct: usize,
    /// Candidates sharing a value with an earlier candidate (`count - distinct`)
    pub repeated: usize,
}

impl ScoreSummary {
    /// Summarize `scores`, or `None` when there are none.
    ///
    /// # Examples
    ///
    /// ```
    /// use baremo_stats::summary::ScoreSummary;
    ///
    /// let summary = ScoreSummary::from_scores(&[2.0, 4.0, 4.0, 6.0]).unwrap();
    /// assert_eq!(summary.count, 4);
    /// assert_eq!(summary.mean, 4.0);
    /// assert_eq!(summary.distinct, 3);
    /// assert_eq!(summary.repeated, 1);
    /// ```
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }

        let sorted = sorted(scores);
        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let variance = sorted.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / count as f64;

        let mut unique = sorted.clone();
        unique.dedup();
        let distinct = unique.len();

        Some(Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean,
            median: percentile_sorted(&sorted, 50.0),
            std_dev: variance.sqrt(),
            p25: percentile_sorted(&sorted, 25.0),
            p75: percentile_sorted(&sorted, 75.0),
            distinct,
            repeated: count - distinct,
        })
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.p75 - self.p25
    }
}

/// Candidates whose score equals `value`
pub fn count_exact(scores: &[f64], value: f64) -> usize {
    scores.iter().filter(|&&s| (s - value).abs() < 1e-9).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_edges() {
        let data = vec![5.0, 1.0, 3.0];
        assert_eq!(percentile(&data, 0.0), Some(1.0));
        assert_eq!(percentile(&data, 100.0), Some(5.0));
        assert_eq!(percentile(&data, 50.0), Some(3.0));
        assert_eq!(percentile(&data, 101.0), None);
        assert_eq!(percentile(&[], 50.0), None);
        assert_eq!(percentile(&[7.0], 25.0), Some(7.0));
    }

    #[test]
    fn test_summary_population_std_dev() {
        let summary = ScoreSummary::from_scores(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();

        assert_eq!(summary.mean, 5.0);
        assert_eq!(summary.std_dev, 2.0);
        assert_eq!(summary.median, 4.5);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);
        assert_eq!(summary.distinct, 5);
        assert_eq!(summary.repeated, 3);
    }

    #[test]
    fn test_summary_quartiles() {
        let summary = ScoreSummary::from_scores(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(summary.p25, 2.0);
        assert_eq!(summary.p75, 4.0);
        assert_eq!(summary.iqr(), 2.0);
    }

    #[test]
    fn test_summary_single_score() {
        let summary = ScoreSummary::from_scores(&[7.3333]).unwrap();
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.median, 7.3333);
        assert_eq!(summary.repeated, 0);
    }

    #[test]
    fn test_summary_empty() {
        assert!(ScoreSummary::from_scores(&[]).is_none());
    }

    #[test]
    fn test_count_exact() {
        assert_eq!(count_exact(&[10.0, 9.9999, 10.0, 3.0], 10.0), 2);
        assert_eq!(count_exact(&[], 10.0), 0);
    }
}
