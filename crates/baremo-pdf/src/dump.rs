//! Plain-text dumps with form-feed page breaks
//!
//! `pdftotext -layout` writes one `\x0C` after every page, which makes a
//! dump far faster to re-scan than the PDF itself.

use std::fs;
use std::path::Path;

use baremo_core::PageTextProvider;
use tracing::debug;

use crate::error::PdfSourceError;

const PAGE_BREAK: char = '\x0C';

/// Pages split out of a text dump
#[derive(Debug, Clone)]
pub struct TextDumpProvider {
    pages: Vec<String>,
}

impl TextDumpProvider {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PdfSourceError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PdfSourceError::NotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|source| PdfSourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let provider = Self::from_text(&text);
        debug!(path = %path.display(), page_count = provider.pages.len(), "opened text dump");
        Ok(provider)
    }

    /// Split on form feeds; a trailing break does not open an extra page
    pub fn from_text(text: &str) -> Self {
        let mut pages: Vec<String> = text.split(PAGE_BREAK).map(str::to_string).collect();
        if pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }
        Self { pages }
    }
}

impl PageTextProvider for TextDumpProvider {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page: usize) -> Option<String> {
        page.checked_sub(1)
            .and_then(|idx| self.pages.get(idx))
            .cloned()
    }
}
