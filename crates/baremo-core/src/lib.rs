//! Candidate score extraction for provisional baremo listings
//!
//! The official listing is a very long PDF where every teaching specialty
//! occupies a page range and every candidate occupies one text line, marked
//! by a masked national ID and followed by a run of decimal scores. This
//! crate turns the text of such a page range into an ordered list of total
//! scores:
//!
//! - [`Extractor`] decides whether a line is a candidate row and reads its total
//! - [`PageWalker`] drives the extractor over a page range in document order
//! - [`ReferenceValidator`] compares pages against hand-checked samples
//! - [`SpecialtyLocator`] finds where a specialty starts and ends
//!
//! # Example
//!
//! ```
//! use baremo_core::{BaremoEngine, MemoryProvider, SpecialtyConfig};
//!
//! let config = SpecialtyConfig::from_str(r#"
//!     [specialty]
//!     name = "Informática"
//!     code = "107"
//!
//!     [document]
//!     path = "baremo.pdf"
//!     page_start = 1
//!     page_end = 1
//! "#).unwrap();
//!
//! let provider = MemoryProvider::new(["****1234* GARCIA LOPEZ, ANA 7,3333"]);
//! let run = BaremoEngine::new(config).unwrap().run(&provider);
//! assert_eq!(run.result.scores(), vec![7.3333]);
//! ```

pub mod config;
pub mod error;
pub mod extractor;
pub mod locate;
pub mod patterns;
pub mod provider;
pub mod validator;
pub mod walker;

pub use config::{PageRange, SpecialtyConfig, ValidationSample};
pub use error::{BaremoError, Result};
pub use extractor::{Extractor, LineOutcome, OutOfRangePolicy, Rejection, ScorePosition, ScoreRange};
pub use locate::{LocateReport, SpecialtyLocator};
pub use provider::{MemoryProvider, PageTextProvider};
pub use validator::{ReferenceValidator, ValidationStatus, ValidationSummary};
pub use walker::{CandidateRecord, ExtractionReport, ExtractionResult, PageWalker};

use tracing::info;

/// Extraction plus the advisory validation that ran on it
#[derive(Debug, Clone)]
pub struct ExtractionRun {
    pub result: ExtractionResult,
    pub validation: ValidationSummary,
}

/// One specialty's configuration, checked and compiled
pub struct BaremoEngine {
    config: SpecialtyConfig,
    extractor: Extractor,
}

impl BaremoEngine {
    /// Validate the configuration and compile its patterns.
    ///
    /// Fails fast on any configuration problem, before a page is read.
    pub fn new(config: SpecialtyConfig) -> Result<Self> {
        let extractor = config.extractor()?;
        Ok(Self { config, extractor })
    }

    pub fn config(&self) -> &SpecialtyConfig {
        &self.config
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Walk the configured page range and validate the result
    pub fn run<P: PageTextProvider + ?Sized>(&self, provider: &P) -> ExtractionRun {
        let range = self.config.page_range();
        info!(
            specialty = %self.config.specialty.name,
            code = %self.config.specialty.code,
            start = range.start,
            end = range.end,
            "starting extraction"
        );

        let result = PageWalker::new(&self.extractor, range)
            .expect_per_page(self.config.validation.expected_per_page)
            .walk(provider);

        let validation = ReferenceValidator::from_config(&self.config.validation)
            .check_result(&result, &self.config.validation);

        ExtractionRun { result, validation }
    }
}
