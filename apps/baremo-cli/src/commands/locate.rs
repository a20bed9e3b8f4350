//! `baremo locate`: find a specialty's page range in the full document

use anyhow::{bail, Result};
use std::fmt::Write;
use std::path::PathBuf;

use baremo_core::locate::DEFAULT_MIN_CANDIDATES;
use baremo_core::patterns::specialty_heading_patterns;
use baremo_core::{Extractor, LocateReport, SpecialtyLocator};

#[derive(Debug, Clone)]
pub struct LocateOptions {
    pub document: PathBuf,
    pub name: Option<String>,
    pub code: Option<String>,
    /// Extra heading regexes
    pub patterns: Vec<String>,
    pub min_candidates: usize,
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self {
            document: PathBuf::new(),
            name: None,
            code: None,
            patterns: Vec::new(),
            min_candidates: DEFAULT_MIN_CANDIDATES,
        }
    }
}

pub fn run(opts: &LocateOptions) -> Result<(LocateReport, String)> {
    let mut patterns = match (&opts.name, &opts.code) {
        (Some(name), Some(code)) => specialty_heading_patterns(name, code),
        (None, None) => Vec::new(),
        _ => bail!("--name and --code must be given together"),
    };
    patterns.extend(opts.patterns.iter().cloned());
    if patterns.is_empty() {
        bail!("nothing to search for: give --name and --code, or --pattern");
    }

    let provider = baremo_pdf::open_document(&opts.document)?;
    let extractor = Extractor::default();
    let report = SpecialtyLocator::new(&patterns, &extractor)?
        .min_candidates(opts.min_candidates)
        .scan(&provider);

    let rendered = render(&report)?;
    Ok((report, rendered))
}

fn render(report: &LocateReport) -> Result<String> {
    let mut output = String::new();
    writeln!(output, "Scanned {} pages", report.pages_scanned)?;
    writeln!(output)?;

    if report.hits.is_empty() {
        writeln!(output, "No heading matches.")?;
    } else {
        writeln!(output, "Heading matches:")?;
        for hit in &report.hits {
            let preview: String = hit
                .preview
                .lines()
                .find(|l| !l.trim().is_empty())
                .unwrap_or("")
                .chars()
                .take(70)
                .collect();
            writeln!(output, "  page {:>5}  {}", hit.page, preview.trim())?;
        }
    }

    if !report.candidate_pages.is_empty() {
        let first = report.candidate_pages[0].0;
        let last = report.candidate_pages[report.candidate_pages.len() - 1].0;
        writeln!(output)?;
        writeln!(
            output,
            "Pages with candidate rows: {} (from {} to {})",
            report.candidate_pages.len(),
            first,
            last
        )?;
    }

    if let Some(range) = report.suggested_range() {
        writeln!(output)?;
        writeln!(output, "Suggested configuration:")?;
        writeln!(output, "[document]")?;
        writeln!(output, "page_start = {}", range.start)?;
        writeln!(output, "page_end = {}", range.end)?;
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_without_code_rejected() {
        let opts = LocateOptions {
            name: Some("Matemáticas".into()),
            ..Default::default()
        };
        assert!(run(&opts).is_err());
    }

    #[test]
    fn test_no_patterns_rejected() {
        let err = run(&LocateOptions::default()).unwrap_err();
        assert!(err.to_string().contains("nothing to search for"));
    }
}
