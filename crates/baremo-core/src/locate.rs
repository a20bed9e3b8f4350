//! Locating a specialty inside the full document
//!
//! Scans every page for heading patterns and suggests the page range to put
//! in the specialty configuration. Pages with many candidate rows are also
//! listed, which helps when headings are missing from the text layer.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::PageRange;
use crate::error::{BaremoError, Result};
use crate::extractor::Extractor;
use crate::provider::PageTextProvider;

/// Pages with more marked lines than this are reported as candidate pages
pub const DEFAULT_MIN_CANDIDATES: usize = 5;

const PROGRESS_EVERY: usize = 100;

/// A page whose text matched a heading pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingHit {
    pub page: usize,
    pub pattern: String,
    /// First characters of the page, for eyeballing
    pub preview: String,
}

/// Outcome of a locate scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocateReport {
    pub pages_scanned: usize,
    pub hits: Vec<HeadingHit>,
    /// `(page, marked lines)` for pages above the candidate threshold
    pub candidate_pages: Vec<(usize, usize)>,
}

impl LocateReport {
    /// Range spanning the first and last heading hit
    pub fn suggested_range(&self) -> Option<PageRange> {
        let first = self.hits.iter().map(|h| h.page).min()?;
        let last = self.hits.iter().map(|h| h.page).max()?;
        Some(PageRange {
            start: first,
            end: last,
        })
    }
}

/// Scans a document for specialty headings
#[derive(Debug)]
pub struct SpecialtyLocator<'a> {
    headings: Vec<Regex>,
    extractor: &'a Extractor,
    min_candidates: usize,
}

impl<'a> SpecialtyLocator<'a> {
    pub fn new<S: AsRef<str>>(patterns: &[S], extractor: &'a Extractor) -> Result<Self> {
        let headings = patterns
            .iter()
            .map(|p| {
                Regex::new(p.as_ref()).map_err(|source| BaremoError::InvalidPattern {
                    pattern: p.as_ref().to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            headings,
            extractor,
            min_candidates: DEFAULT_MIN_CANDIDATES,
        })
    }

    pub fn min_candidates(mut self, min: usize) -> Self {
        self.min_candidates = min;
        self
    }

    /// Scan every page of the document
    pub fn scan<P: PageTextProvider + ?Sized>(&self, provider: &P) -> LocateReport {
        let page_count = provider.page_count();
        let mut report = LocateReport::default();

        for page in 1..=page_count {
            report.pages_scanned += 1;
            if page % PROGRESS_EVERY == 0 {
                info!(page, page_count, "locate progress");
            }

            let Some(text) = provider.page_text(page) else {
                debug!(page, "page text unavailable");
                continue;
            };

            if let Some(heading) = self.headings.iter().find(|re| re.is_match(&text)) {
                debug!(page, pattern = heading.as_str(), "heading found");
                report.hits.push(HeadingHit {
                    page,
                    pattern: heading.as_str().to_string(),
                    preview: text.chars().take(200).collect(),
                });
            }

            let marked = text.lines().filter(|l| self.extractor.is_record(l)).count();
            if marked > self.min_candidates {
                report.candidate_pages.push((page, marked));
            }
        }

        info!(
            hits = report.hits.len(),
            candidate_pages = report.candidate_pages.len(),
            "locate finished"
        );
        report
    }
}
