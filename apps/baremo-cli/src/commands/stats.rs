//! `baremo stats`: statistics for previously exported scores

use anyhow::{Context, Result};
use std::path::PathBuf;

use baremo_core::ScoreRange;
use baremo_stats::reporter::{OutputFormat, Reporter};
use baremo_stats::{load_scores, ScoreReport};

#[derive(Debug, Clone)]
pub struct StatsOptions {
    pub input: PathBuf,
    /// Report title; the input file name when absent
    pub title: Option<String>,
    pub low: f64,
    pub high: f64,
    pub bins: usize,
    /// Scores at or above this are counted as high
    pub threshold: f64,
    /// Length of the ranked listing
    pub top: usize,
    pub format: OutputFormat,
    /// Also save the plain statistics file here
    pub output: Option<PathBuf>,
}

pub fn run(opts: &StatsOptions) -> Result<String> {
    let scores = load_scores(&opts.input)
        .with_context(|| format!("Failed to load scores from {}", opts.input.display()))?;
    let range = ScoreRange::new(opts.low, opts.high)?;

    let title = opts.title.clone().unwrap_or_else(|| {
        opts.input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scores".to_string())
    });
    let report = ScoreReport::build(title, scores, range, opts.bins)?
        .with_top(opts.top)
        .with_high_score_threshold(opts.threshold);

    if let Some(path) = &opts.output {
        Reporter::new(OutputFormat::Text).write_to_file(&report, path)?;
    }
    Reporter::new(opts.format).format_report(&report)
}
