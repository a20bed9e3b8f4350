//! Statistics, exports and reports for extracted baremo scores
//!
//! # Example
//!
//! ```
//! use baremo_core::ScoreRange;
//! use baremo_stats::{ScoreReport, ScoreSummary};
//!
//! let scores = vec![2.4167, 7.3333, 3.65, 10.0];
//! let summary = ScoreSummary::from_scores(&scores).unwrap();
//! assert_eq!(summary.max, 10.0);
//!
//! let report = ScoreReport::build("Informática (107)", scores, ScoreRange::default(), 25).unwrap();
//! assert_eq!(report.exact_max, 1);
//! ```

pub mod buckets;
pub mod error;
pub mod export;
pub mod load;
pub mod report;
pub mod reporter;
pub mod summary;

pub use buckets::{bin_scores, Bin};
pub use error::StatsError;
pub use load::load_scores;
pub use report::ScoreReport;
pub use reporter::{OutputFormat, Reporter};
pub use summary::{percentile, ScoreSummary};
