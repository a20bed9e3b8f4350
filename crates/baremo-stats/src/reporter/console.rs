//! Console reporter
//!
//! Tables and text bar charts for a terminal. Histogram bins are drawn
//! without axis labels on every row to keep them compact.

use anyhow::Result;
use std::fmt::Write;

use crate::buckets::Bin;
use crate::report::ScoreReport;

const BAR_WIDTH: usize = 40;

pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn format(report: &ScoreReport) -> Result<String> {
        let mut output = String::new();

        writeln!(output)?;
        writeln!(output, "╔══════════════════════════════════════════════════════════════╗")?;
        writeln!(output, "║                      BAREMO SCORE REPORT                      ║")?;
        writeln!(output, "╚══════════════════════════════════════════════════════════════╝")?;
        writeln!(output)?;

        writeln!(output, "Specialty:  {}", report.title)?;
        if let Some(source) = &report.source {
            writeln!(output, "Source:     {}", source)?;
        }
        if let Some(pages) = &report.pages {
            writeln!(output, "Pages:      {}-{}", pages.start, pages.end)?;
        }
        writeln!(output, "Generated:  {}", report.generated_at)?;
        writeln!(output)?;

        let Some(summary) = &report.summary else {
            writeln!(output, "No scores extracted.")?;
            Self::format_extraction(&mut output, report)?;
            return Ok(output);
        };

        writeln!(output, "  ┌──────────┬──────────┬──────────┬──────────┬──────────┬──────────┐")?;
        writeln!(output, "  │  Count   │   Min    │   P25    │  Median  │   P75    │   Max    │")?;
        writeln!(output, "  ├──────────┼──────────┼──────────┼──────────┼──────────┼──────────┤")?;
        writeln!(
            output,
            "  │ {:>8} │ {:>8.4} │ {:>8.4} │ {:>8.4} │ {:>8.4} │ {:>8.4} │",
            summary.count, summary.min, summary.p25, summary.median, summary.p75, summary.max
        )?;
        writeln!(output, "  └──────────┴──────────┴──────────┴──────────┴──────────┴──────────┘")?;
        writeln!(output)?;
        writeln!(
            output,
            "  Mean: {:.4}, StdDev: {:.4}, Distinct: {}, Repeated: {}",
            summary.mean, summary.std_dev, summary.distinct, summary.repeated
        )?;
        writeln!(
            output,
            "  Exactly {}: {} ({:.1}%)",
            report.range.high,
            report.exact_max,
            report.exact_max_percent()
        )?;
        writeln!(
            output,
            "  Scores >= {}: {} ({:.1}%)",
            report.high_score_threshold,
            report.high_scores,
            report.high_scores_percent()
        )?;
        writeln!(output)?;

        if !report.top.is_empty() {
            writeln!(output, "Top {}:", report.top.len())?;
            for (rank, score) in report.top.iter().enumerate() {
                writeln!(output, "  {:>3}. {:.4}", rank + 1, score)?;
            }
            writeln!(output)?;
        }

        writeln!(output, "Score ranges:")?;
        Self::format_bars(&mut output, &report.buckets, true)?;
        writeln!(output)?;

        writeln!(output, "Histogram ({} bins):", report.histogram.len())?;
        Self::format_bars(&mut output, &report.histogram, false)?;

        Self::format_extraction(&mut output, report)?;
        Self::format_validation(&mut output, report)?;

        writeln!(output)?;
        Ok(output)
    }

    fn format_bars(output: &mut String, bins: &[Bin], with_percent: bool) -> Result<()> {
        let peak = bins.iter().map(|b| b.count).max().unwrap_or(0);
        for bin in bins {
            let bar = bar(bin.count, peak);
            if with_percent {
                writeln!(
                    output,
                    "  {:>7} │ {:<width$} {} ({:.1}%)",
                    bin.label(),
                    bar,
                    bin.count,
                    bin.percent,
                    width = BAR_WIDTH
                )?;
            } else {
                writeln!(
                    output,
                    "  {:>5.2} │ {:<width$} {}",
                    bin.low,
                    bar,
                    bin.count,
                    width = BAR_WIDTH
                )?;
            }
        }
        Ok(())
    }

    fn format_extraction(output: &mut String, report: &ScoreReport) -> Result<()> {
        let Some(extraction) = &report.extraction else {
            return Ok(());
        };

        writeln!(output)?;
        writeln!(output, "────────────────────────────────────────────────────────────────")?;
        writeln!(output, "Extraction:")?;
        writeln!(
            output,
            "  Pages walked: {} of {}",
            extraction.pages_walked, extraction.pages_requested
        )?;
        writeln!(
            output,
            "  Lines scanned: {}, marked: {}, records: {}",
            extraction.lines_scanned, extraction.marked_lines, extraction.records
        )?;
        writeln!(
            output,
            "  Dropped: {} (no score {}, unparsable {}, out of range {}), clamped: {}",
            extraction.dropped(),
            extraction.dropped_no_score,
            extraction.dropped_unparsable,
            extraction.dropped_out_of_range,
            extraction.clamped
        )?;
        if let Some(page) = extraction.stopped_at {
            writeln!(output, "  ⚠ Stopped at page {} (past end of document)", page)?;
        }
        if !extraction.failed_pages.is_empty() {
            writeln!(output, "  ⚠ Unreadable pages: {:?}", extraction.failed_pages)?;
        }
        for mismatch in &extraction.page_count_mismatches {
            writeln!(
                output,
                "  ⚠ Page {}: {} records, expected {}",
                mismatch.page, mismatch.found, mismatch.expected
            )?;
        }
        Ok(())
    }

    fn format_validation(output: &mut String, report: &ScoreReport) -> Result<()> {
        let Some(validation) = &report.validation else {
            return Ok(());
        };
        if validation.pages.is_empty() && validation.count.is_none() {
            return Ok(());
        }

        writeln!(output)?;
        writeln!(output, "Validation:")?;
        for page in &validation.pages {
            let symbol = if page.status.is_validated() { "✓" } else { "✗" };
            writeln!(
                output,
                "  {} Page {}: {}/{} matched ({:.1}%)",
                symbol,
                page.page,
                page.matched,
                page.expected,
                page.ratio * 100.0
            )?;
            for mismatch in &page.mismatches {
                match mismatch.extracted {
                    Some(value) => writeln!(
                        output,
                        "      #{}: expected {:.4}, got {:.4}",
                        mismatch.position, mismatch.expected, value
                    )?,
                    None => writeln!(
                        output,
                        "      #{}: expected {:.4}, missing",
                        mismatch.position, mismatch.expected
                    )?,
                }
            }
        }
        if let Some(count) = &validation.count {
            let symbol = if count.status.is_validated() { "✓" } else { "✗" };
            writeln!(
                output,
                "  {} Candidates: {} (expected {}-{})",
                symbol, count.found, count.bounds.min, count.bounds.max
            )?;
        }
        Ok(())
    }
}

fn bar(count: usize, peak: usize) -> String {
    if peak == 0 {
        return String::new();
    }
    let len = (count * BAR_WIDTH).div_ceil(peak);
    "█".repeat(len)
}
