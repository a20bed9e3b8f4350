//! Plain statistics file

use anyhow::Result;
use std::fmt::Write;

use crate::report::ScoreReport;

pub struct TextReporter;

impl TextReporter {
    pub fn format(report: &ScoreReport) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "{} - SCORE STATISTICS", report.title.to_uppercase())?;
        writeln!(output, "{}", "=".repeat(50))?;
        writeln!(output)?;
        if let Some(pages) = &report.pages {
            writeln!(output, "Pages: {}-{}", pages.start, pages.end)?;
        }
        writeln!(output, "Candidates: {}", report.scores.len())?;
        writeln!(output, "Generated: {}", report.generated_at)?;
        writeln!(output)?;

        if let Some(summary) = &report.summary {
            writeln!(output, "DESCRIPTIVE STATISTICS:")?;
            writeln!(output, "- Maximum: {:.4}", summary.max)?;
            writeln!(output, "- Minimum: {:.4}", summary.min)?;
            writeln!(output, "- Mean: {:.4}", summary.mean)?;
            writeln!(output, "- Median: {:.4}", summary.median)?;
            writeln!(output, "- Standard deviation: {:.4}", summary.std_dev)?;
            writeln!(output, "- P25: {:.4}", summary.p25)?;
            writeln!(output, "- P75: {:.4}", summary.p75)?;
            writeln!(output)?;
        }

        writeln!(output, "DISTRIBUTION:")?;
        for bucket in &report.buckets {
            writeln!(
                output,
                "- {} points: {} candidates ({:.1}%)",
                bucket.label(),
                bucket.count,
                bucket.percent
            )?;
        }
        writeln!(output)?;

        writeln!(
            output,
            "Exactly {} points: {} candidates ({:.1}%)",
            report.range.high,
            report.exact_max,
            report.exact_max_percent()
        )?;
        writeln!(
            output,
            "Scores >= {}: {} candidates ({:.1}%)",
            report.high_score_threshold,
            report.high_scores,
            report.high_scores_percent()
        )?;
        if let Some(summary) = &report.summary {
            writeln!(output, "Distinct values: {}", summary.distinct)?;
            writeln!(output, "Repeated values: {}", summary.repeated)?;
        }
        writeln!(output)?;

        writeln!(output, "TOP {} (highest first):", report.top.len())?;
        for (rank, score) in report.top.iter().enumerate() {
            writeln!(output, "{:>4}. {:.4}", rank + 1, score)?;
        }
        writeln!(output)?;

        writeln!(output, "FIRST {} (document order):", report.head().len())?;
        for (idx, score) in report.head().iter().enumerate() {
            writeln!(output, "{:>4}. {:.4}", idx + 1, score)?;
        }
        writeln!(output)?;

        let offset = report.scores.len() - report.tail().len();
        writeln!(output, "LAST {} (document order):", report.tail().len())?;
        for (idx, score) in report.tail().iter().enumerate() {
            writeln!(output, "{:>4}. {:.4}", offset + idx + 1, score)?;
        }

        Ok(output)
    }
}
