//! `baremo inspect`: show how each line of a page is classified

use anyhow::{bail, Result};
use std::fmt::Write;
use std::path::PathBuf;

use baremo_core::walker::inspect_page;
use baremo_core::{LineOutcome, PageTextProvider, Rejection, SpecialtyConfig};

#[derive(Debug, Clone)]
pub struct InspectOptions {
    pub config: PathBuf,
    pub page: usize,
    /// Also list lines without the record marker
    pub all: bool,
}

pub fn run(opts: &InspectOptions) -> Result<String> {
    let config = SpecialtyConfig::from_file(&opts.config)?;
    let extractor = config.extractor()?;
    let provider = baremo_pdf::open_document(&config.document.path)?;

    let Some(lines) = inspect_page(&provider, &extractor, opts.page) else {
        bail!(
            "page {} has no text (document has {} pages)",
            opts.page,
            provider.page_count()
        );
    };

    let records = lines
        .iter()
        .filter(|l| matches!(l.outcome, LineOutcome::Record { .. }))
        .count();
    let marked = lines.iter().filter(|l| l.marked).count();

    let mut output = String::new();
    writeln!(
        output,
        "Page {}: {} lines, {} marked, {} records (position: {:?})",
        opts.page,
        lines.len(),
        marked,
        records,
        extractor.position()
    )?;
    writeln!(output)?;

    for line in lines.iter().filter(|l| opts.all || l.marked) {
        writeln!(
            output,
            "{:>4} {:<22} [{}] {}",
            line.line_number,
            describe(&line.outcome),
            line.tokens.join(" "),
            line.text.trim()
        )?;
    }
    Ok(output)
}

fn describe(outcome: &LineOutcome) -> String {
    match outcome {
        LineOutcome::Unmarked => "-".to_string(),
        LineOutcome::Record {
            score,
            clamped: false,
        } => format!("✓ {:.4}", score),
        LineOutcome::Record {
            score,
            clamped: true,
        } => format!("✓ {:.4} (clamped)", score),
        LineOutcome::Rejected(Rejection::NoScore) => "✗ no score".to_string(),
        LineOutcome::Rejected(Rejection::Unparsable { token }) => {
            format!("✗ unparsable {}", token)
        }
        LineOutcome::Rejected(Rejection::OutOfRange { value }) => {
            format!("✗ out of range {}", value)
        }
    }
}
