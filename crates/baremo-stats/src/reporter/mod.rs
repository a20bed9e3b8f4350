//! Report output
//!
//! # Output Formats
//!
//! - **Console**: box-drawn summary with text bar charts
//! - **Json** / **JsonPretty**: the whole [`ScoreReport`]
//! - **Text**: plain statistics file saved next to the exports
//!
//! # Example
//!
//! ```no_run
//! use baremo_stats::reporter::{OutputFormat, Reporter};
//! use baremo_stats::ScoreReport;
//!
//! # fn example(report: ScoreReport) -> anyhow::Result<()> {
//! Reporter::new(OutputFormat::Console).report(&report)?;
//! Reporter::new(OutputFormat::Text).write_to_file(&report, "informatica_107_stats.txt")?;
//! # Ok(())
//! # }
//! ```

mod console;
mod json;
mod text;

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::report::ScoreReport;

pub use console::ConsoleReporter;
pub use json::JsonReporter;
pub use text::TextReporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable tables and bar charts
    #[default]
    Console,
    Json,
    JsonPretty,
    /// Plain statistics file
    Text,
}

pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the report to stdout
    pub fn report(&self, report: &ScoreReport) -> Result<()> {
        let output = self.format_report(report)?;
        print!("{}", output);
        io::stdout().flush()?;
        Ok(())
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, report: &ScoreReport, path: P) -> Result<()> {
        let path = path.as_ref();
        let output = self.format_report(report)?;
        fs::write(path, output).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn format_report(&self, report: &ScoreReport) -> Result<String> {
        match self.format {
            OutputFormat::Console => ConsoleReporter::format(report),
            OutputFormat::Json => JsonReporter::format(report, false),
            OutputFormat::JsonPretty => JsonReporter::format(report, true),
            OutputFormat::Text => TextReporter::format(report),
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}

#[cfg(test)]
pub(crate) fn sample_report() -> ScoreReport {
    use baremo_core::ScoreRange;

    ScoreReport::build(
        "Informática (107)",
        vec![2.4167, 7.3333, 3.65, 5.2084, 2.5, 4.3333, 5.75, 10.0],
        ScoreRange::default(),
        25,
    )
    .unwrap()
}
