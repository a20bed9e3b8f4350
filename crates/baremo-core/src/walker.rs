//! Sequential walk over a page range
//!
//! Pages are visited in ascending order and lines in the order the provider
//! returns them, so `sequence_index` always reflects document order. Nothing
//! that happens inside the walk is fatal: unreadable pages, empty pages and
//! dropped lines are counted in the [`ExtractionReport`], and running past
//! the end of the document stops the walk with whatever was collected.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::PageRange;
use crate::extractor::{Extractor, LineOutcome, Rejection};
use crate::provider::PageTextProvider;

/// One candidate row recovered from the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Position in extraction order, starting at 0
    pub sequence_index: usize,
    /// Page the row was found on, 1-based
    pub source_page: usize,
    /// Line within the page, 1-based
    pub line_number: usize,
    /// Total score, already inside the valid range
    pub total_score: f64,
    /// True when the parsed value was pinned to a range bound
    #[serde(default)]
    pub clamped: bool,
    /// Line the score was read from
    pub raw_line: String,
}

impl CandidateRecord {
    /// 1-based position used in exports
    pub fn position(&self) -> usize {
        self.sequence_index + 1
    }
}

/// Per-page outcome of the walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    pub page: usize,
    pub records: usize,
    /// False when the provider returned no text for the page
    pub readable: bool,
}

/// A page whose record count differs from `expected_per_page`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCountMismatch {
    pub page: usize,
    pub expected: usize,
    pub found: usize,
}

/// Counters describing extraction quality
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub pages_requested: usize,
    pub pages_walked: usize,
    /// First requested page beyond the end of the document, if the walk stopped early
    pub stopped_at: Option<usize>,
    /// Pages whose text could not be extracted
    pub failed_pages: Vec<usize>,
    /// Readable pages that produced no record
    pub empty_pages: Vec<usize>,
    pub lines_scanned: usize,
    /// Lines carrying the record marker
    pub marked_lines: usize,
    pub records: usize,
    pub dropped_no_score: usize,
    pub dropped_unparsable: usize,
    pub dropped_out_of_range: usize,
    pub clamped: usize,
    pub page_count_mismatches: Vec<PageCountMismatch>,
}

impl ExtractionReport {
    /// Marked lines that did not become records
    pub fn dropped(&self) -> usize {
        self.dropped_no_score + self.dropped_unparsable + self.dropped_out_of_range
    }

    pub fn stopped_early(&self) -> bool {
        self.stopped_at.is_some()
    }
}

/// Records in document order plus the counters gathered while walking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub range: PageRange,
    pub records: Vec<CandidateRecord>,
    pub pages: Vec<PageSummary>,
    pub report: ExtractionReport,
}

impl ExtractionResult {
    /// Scores in extraction order
    pub fn scores(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.total_score).collect()
    }

    /// Scores found on one page, in line order
    pub fn scores_on_page(&self, page: usize) -> Vec<f64> {
        self.records
            .iter()
            .filter(|r| r.source_page == page)
            .map(|r| r.total_score)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Drives the extractor over an inclusive page range
#[derive(Debug, Clone)]
pub struct PageWalker<'a> {
    extractor: &'a Extractor,
    range: PageRange,
    expected_per_page: Option<usize>,
}

impl<'a> PageWalker<'a> {
    pub fn new(extractor: &'a Extractor, range: PageRange) -> Self {
        Self {
            extractor,
            range,
            expected_per_page: None,
        }
    }

    /// Warn about full pages whose record count differs from `expected`.
    /// The last walked page is exempt since it is usually partial.
    pub fn expect_per_page(mut self, expected: Option<usize>) -> Self {
        self.expected_per_page = expected;
        self
    }

    /// Walk the range and collect records in document order
    pub fn walk<P: PageTextProvider + ?Sized>(&self, provider: &P) -> ExtractionResult {
        let page_count = provider.page_count();
        let last_page = self.range.end.min(page_count);

        let mut records: Vec<CandidateRecord> = Vec::new();
        let mut pages = Vec::new();
        let mut report = ExtractionReport {
            pages_requested: self.range.page_count(),
            ..Default::default()
        };

        for page in self.range.start..=self.range.end {
            if page > page_count {
                warn!(
                    page,
                    page_count, "page beyond end of document, stopping walk"
                );
                report.stopped_at = Some(page);
                break;
            }
            report.pages_walked += 1;

            let Some(text) = provider.page_text(page) else {
                warn!(page, "page text unavailable, skipping");
                report.failed_pages.push(page);
                pages.push(PageSummary {
                    page,
                    records: 0,
                    readable: false,
                });
                continue;
            };

            let mut found = 0;
            for (idx, line) in text.lines().enumerate() {
                report.lines_scanned += 1;
                match self.extractor.classify(line) {
                    LineOutcome::Unmarked => {}
                    LineOutcome::Record { score, clamped } => {
                        report.marked_lines += 1;
                        if clamped {
                            report.clamped += 1;
                            debug!(page, line = idx + 1, score, "score clamped into range");
                        }
                        records.push(CandidateRecord {
                            sequence_index: records.len(),
                            source_page: page,
                            line_number: idx + 1,
                            total_score: score,
                            clamped,
                            raw_line: line.to_string(),
                        });
                        found += 1;
                    }
                    LineOutcome::Rejected(rejection) => {
                        report.marked_lines += 1;
                        match &rejection {
                            Rejection::NoScore => report.dropped_no_score += 1,
                            Rejection::Unparsable { .. } => report.dropped_unparsable += 1,
                            Rejection::OutOfRange { .. } => report.dropped_out_of_range += 1,
                        }
                        debug!(page, line = idx + 1, ?rejection, text = line, "dropped marked line");
                    }
                }
            }

            if found == 0 {
                debug!(page, "no records on page");
                report.empty_pages.push(page);
            } else {
                debug!(page, records = found, "page processed");
            }

            if let Some(expected) = self.expected_per_page {
                if found != expected && page != last_page {
                    warn!(page, expected, found, "unexpected number of records on page");
                    report.page_count_mismatches.push(PageCountMismatch {
                        page,
                        expected,
                        found,
                    });
                }
            }

            pages.push(PageSummary {
                page,
                records: found,
                readable: true,
            });
        }

        report.records = records.len();
        info!(
            records = report.records,
            pages = report.pages_walked,
            dropped = report.dropped(),
            clamped = report.clamped,
            "extraction finished"
        );

        ExtractionResult {
            range: self.range,
            records,
            pages,
            report,
        }
    }
}

/// How one line of a page was classified, for calibrating patterns
#[derive(Debug, Clone, PartialEq)]
pub struct LineInspection {
    pub line_number: usize,
    pub text: String,
    pub marked: bool,
    /// Every score-shaped token on the line, left to right
    pub tokens: Vec<String>,
    pub outcome: LineOutcome,
}

/// Classify every line of a single page.
///
/// Returns `None` when the page does not exist or has no text.
pub fn inspect_page<P: PageTextProvider + ?Sized>(
    provider: &P,
    extractor: &Extractor,
    page: usize,
) -> Option<Vec<LineInspection>> {
    let text = provider.page_text(page)?;
    Some(
        text.lines()
            .enumerate()
            .map(|(idx, line)| LineInspection {
                line_number: idx + 1,
                text: line.to_string(),
                marked: extractor.is_record(line),
                tokens: extractor
                    .score_tokens(line)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                outcome: extractor.classify(line),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{OutOfRangePolicy, ScorePosition, ScoreRange};
    use crate::patterns;
    use crate::provider::MemoryProvider;
    use pretty_assertions::assert_eq;

    fn range(start: usize, end: usize) -> PageRange {
        PageRange::new(start, end).unwrap()
    }

    fn clamping() -> Extractor {
        Extractor::new(
            patterns::DEFAULT_MARKER_PATTERN,
            &patterns::score_pattern(",.", 4, false),
            ",.",
            ScorePosition::First,
            ScoreRange::default(),
            OutOfRangePolicy::Clamp,
        )
        .unwrap()
    }

    #[test]
    fn test_walk_preserves_document_order() {
        let provider = MemoryProvider::new([
            "HEADER\n****0001* A, B 5,0000\n****0002* C, D 3,2500",
            "****0003* E, F 9,1000\nfooter 1 de 2",
        ]);
        let extractor = Extractor::default();
        let result = PageWalker::new(&extractor, range(1, 2)).walk(&provider);

        assert_eq!(result.scores(), vec![5.0, 3.25, 9.1]);
        let indices: Vec<usize> = result.records.iter().map(|r| r.sequence_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        let pages: Vec<usize> = result.records.iter().map(|r| r.source_page).collect();
        assert_eq!(pages, vec![1, 1, 2]);
        assert_eq!(result.records[1].line_number, 3);
        assert_eq!(result.records[2].position(), 3);
    }

    #[test]
    fn test_unreadable_page_does_not_halt_walk() {
        let provider = MemoryProvider::with_failures(vec![
            Some("****0001* A, B 5,0000".into()),
            None,
            Some("****0002* C, D 6,0000".into()),
        ]);
        let extractor = Extractor::default();
        let result = PageWalker::new(&extractor, range(1, 3)).walk(&provider);

        assert_eq!(result.scores(), vec![5.0, 6.0]);
        assert_eq!(result.report.failed_pages, vec![2]);
        assert_eq!(result.report.pages_walked, 3);
        assert!(!result.pages[1].readable);
    }

    #[test]
    fn test_range_past_document_end_returns_partial() {
        let provider = MemoryProvider::new(["****0001* A, B 5,0000", "****0002* C, D 6,0000"]);
        let extractor = Extractor::default();
        let result = PageWalker::new(&extractor, range(2, 5)).walk(&provider);

        assert_eq!(result.scores(), vec![6.0]);
        assert_eq!(result.report.stopped_at, Some(3));
        assert_eq!(result.report.pages_requested, 4);
        assert_eq!(result.report.pages_walked, 1);
        assert!(result.report.stopped_early());
    }

    #[test]
    fn test_counters_for_dropped_and_clamped_lines() {
        let provider = MemoryProvider::new([
            "****0001* SIN NOTA\n****0002* A, B 12,0000\n****0003* C, D 4,0000\nno marker 5,0000",
        ]);

        let dropping = Extractor::default();
        let result = PageWalker::new(&dropping, range(1, 1)).walk(&provider);
        assert_eq!(result.report.lines_scanned, 4);
        assert_eq!(result.report.marked_lines, 3);
        assert_eq!(result.report.dropped_no_score, 1);
        assert_eq!(result.report.dropped_out_of_range, 1);
        assert_eq!(result.report.dropped(), 2);
        assert_eq!(result.scores(), vec![4.0]);

        let clamping = clamping();
        let result = PageWalker::new(&clamping, range(1, 1)).walk(&provider);
        assert_eq!(result.report.clamped, 1);
        assert_eq!(result.scores(), vec![10.0, 4.0]);
        assert!(result.records[0].clamped);
    }

    #[test]
    fn test_empty_pages_are_counted() {
        let provider = MemoryProvider::new(["cover page", "****0001* A, B 5,0000"]);
        let extractor = Extractor::default();
        let result = PageWalker::new(&extractor, range(1, 2)).walk(&provider);

        assert_eq!(result.report.empty_pages, vec![1]);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_expected_per_page_skips_last_page() {
        let provider = MemoryProvider::new([
            "****0001* A, B 5,0000\n****0002* A, B 5,0000",
            "****0003* A, B 5,0000",
            "****0004* A, B 5,0000",
        ]);
        let extractor = Extractor::default();
        let result = PageWalker::new(&extractor, range(1, 3))
            .expect_per_page(Some(2))
            .walk(&provider);

        assert_eq!(
            result.report.page_count_mismatches,
            vec![PageCountMismatch {
                page: 2,
                expected: 2,
                found: 1
            }]
        );
    }

    #[test]
    fn test_scores_on_page() {
        let provider = MemoryProvider::new([
            "****0001* A, B 1,0000",
            "****0002* A, B 2,0000\n****0003* A, B 3,0000",
        ]);
        let extractor = Extractor::default();
        let result = PageWalker::new(&extractor, range(1, 2)).walk(&provider);

        assert_eq!(result.scores_on_page(2), vec![2.0, 3.0]);
        assert!(result.scores_on_page(7).is_empty());
    }

    #[test]
    fn test_inspect_page() {
        let provider = MemoryProvider::new(["title\n****0001* A, B 1,5000 2,0000"]);
        let extractor = Extractor::default();
        let lines = inspect_page(&provider, &extractor, 1).unwrap();

        assert_eq!(lines.len(), 2);
        assert!(!lines[0].marked);
        assert_eq!(lines[0].outcome, LineOutcome::Unmarked);
        assert!(lines[1].marked);
        assert_eq!(lines[1].tokens, vec!["1,5000", "2,0000"]);
        assert_eq!(
            lines[1].outcome,
            LineOutcome::Record {
                score: 1.5,
                clamped: false
            }
        );
        assert!(inspect_page(&provider, &extractor, 2).is_none());
    }
}
