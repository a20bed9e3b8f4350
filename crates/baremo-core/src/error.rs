use thiserror::Error;

/// Errors that abort an extraction before any page is read.
///
/// Everything that can go wrong *during* a walk (unmarked lines, missing
/// scores, out-of-range values, unreadable pages) is counted in the
/// [`ExtractionReport`](crate::ExtractionReport) instead.
#[derive(Error, Debug)]
pub enum BaremoError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid page range: {0}")]
    InvalidRange(String),
}

pub type Result<T> = std::result::Result<T, BaremoError>;
