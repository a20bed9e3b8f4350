//! Equal-width binning across the valid score interval

use baremo_core::ScoreRange;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};

/// Coarse buckets used in reports (2 points wide on a 0..10 scale)
pub const RANGE_BUCKETS: usize = 5;

/// Fine bins used for the histogram
pub const DEFAULT_HISTOGRAM_BINS: usize = 25;

/// One bin; half-open `[low, high)` except the last, which includes `high`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub low: f64,
    pub high: f64,
    pub count: usize,
    /// Share of all binned scores, 0..=100
    pub percent: f64,
}

impl Bin {
    pub fn label(&self) -> String {
        format!("{}-{}", trim_float(self.low), trim_float(self.high))
    }
}

/// Split `range` into `bins` equal-width bins and count `scores` into them.
///
/// Scores outside the range are not counted. A maximum score lands in the
/// last bin.
///
/// # Examples
///
/// ```
/// use baremo_core::ScoreRange;
/// use baremo_stats::buckets::bin_scores;
///
/// let bins = bin_scores(&[1.0, 2.0, 9.5, 10.0], ScoreRange::default(), 5).unwrap();
/// let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
/// assert_eq!(counts, vec![1, 1, 0, 0, 2]);
/// ```
pub fn bin_scores(scores: &[f64], range: ScoreRange, bins: usize) -> Result<Vec<Bin>> {
    if bins == 0 {
        return Err(StatsError::InvalidBins);
    }
    let width = range.width();
    if width <= 0.0 {
        return Err(StatsError::EmptyRange);
    }

    // Scale before dividing so edges like 1.2 with 25 bins stay exact
    let edge = |idx: usize| range.low + width * idx as f64 / bins as f64;
    let mut counts = vec![0usize; bins];
    for &score in scores.iter().filter(|&&s| range.contains(s)) {
        let idx = (((score - range.low) * bins as f64 / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let total: usize = counts.iter().sum();
    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| Bin {
            low: edge(idx),
            high: if idx + 1 == bins {
                range.high
            } else {
                edge(idx + 1)
            },
            count,
            percent: if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            },
        })
        .collect())
}

fn trim_float(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn every_in_range_score_is_binned(
            scores in prop::collection::vec(0.0f64..=10.0, 0..200),
            bins in 1usize..40,
        ) {
            let result = bin_scores(&scores, ScoreRange::default(), bins).unwrap();
            prop_assert_eq!(result.len(), bins);
            prop_assert_eq!(result.iter().map(|b| b.count).sum::<usize>(), scores.len());
        }
    }
}
