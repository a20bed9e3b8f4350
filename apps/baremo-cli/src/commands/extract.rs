//! `baremo extract`: walk a specialty's pages and export its scores

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;

use baremo_core::{BaremoEngine, PageRange, SpecialtyConfig};
use baremo_stats::export::{format_listing, format_rust_literal, write_csv};
use baremo_stats::reporter::{OutputFormat, Reporter};
use baremo_stats::ScoreReport;

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub config: PathBuf,
    /// Overrides the configured page range
    pub pages: Option<PageRange>,
    /// Overrides the configured output directory
    pub output_dir: Option<PathBuf>,
    pub format: OutputFormat,
    /// Write export files
    pub export: bool,
}

/// What an extraction produced
#[derive(Debug)]
pub struct ExtractOutput {
    pub report: ScoreReport,
    pub files: Vec<PathBuf>,
    /// Report text for stdout
    pub rendered: String,
}

pub fn run(opts: &ExtractOptions) -> Result<ExtractOutput> {
    let mut config = SpecialtyConfig::from_file(&opts.config)?;
    if let Some(pages) = opts.pages {
        config.document.page_start = pages.start;
        config.document.page_end = pages.end;
    }
    if let Some(dir) = &opts.output_dir {
        config.output.dir = dir.clone();
    }

    let engine = BaremoEngine::new(config.clone())
        .with_context(|| format!("Invalid configuration in {}", opts.config.display()))?;
    let provider = baremo_pdf::open_document(&config.document.path)?;
    let run = engine.run(&provider);

    let report = ScoreReport::from_run(&config, &run)?;
    let files = if opts.export {
        write_exports(&config.output.dir, &config.file_stem(), &report)?
    } else {
        Vec::new()
    };

    let mut rendered = Reporter::new(opts.format).format_report(&report)?;
    if opts.format == OutputFormat::Console && !files.is_empty() {
        rendered.push_str("Files:\n");
        for file in &files {
            rendered.push_str(&format!("  {}\n", file.display()));
        }
    }

    Ok(ExtractOutput {
        report,
        files,
        rendered,
    })
}

/// Write CSV, listing, Rust literal, statistics and JSON files for `report`
pub fn write_exports(dir: &Path, stem: &str, report: &ScoreReport) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let csv_path = dir.join(format!("{}.csv", stem));
    let csv_file = File::create(&csv_path)
        .with_context(|| format!("Failed to create {}", csv_path.display()))?;
    write_csv(csv_file, &report.scores)?;

    let listing_path = dir.join(format!("{}.txt", stem));
    fs::write(&listing_path, format_listing(&report.title, &report.scores))
        .with_context(|| format!("Failed to write {}", listing_path.display()))?;

    let literal_path = dir.join(format!("{}.rs", stem));
    fs::write(&literal_path, format_rust_literal(stem, &report.scores))
        .with_context(|| format!("Failed to write {}", literal_path.display()))?;

    let stats_path = dir.join(format!("{}_stats.txt", stem));
    Reporter::new(OutputFormat::Text).write_to_file(report, &stats_path)?;

    let json_path = dir.join(format!("{}.json", stem));
    Reporter::new(OutputFormat::JsonPretty).write_to_file(report, &json_path)?;

    let files = vec![csv_path, listing_path, literal_path, stats_path, json_path];
    info!(dir = %dir.display(), files = files.len(), "exports written");
    Ok(files)
}
