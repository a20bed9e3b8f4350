//! Page text straight from a PDF via lopdf

use std::path::{Path, PathBuf};

use baremo_core::PageTextProvider;
use lopdf::Document;
use tracing::{debug, warn};

use crate::error::PdfSourceError;

/// A parsed PDF whose pages are decoded on demand
pub struct PdfTextProvider {
    path: PathBuf,
    doc: Document,
    page_count: usize,
}

impl PdfTextProvider {
    /// Parse the document at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PdfSourceError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(PdfSourceError::NotFound(path));
        }

        let doc = Document::load(&path).map_err(|e| PdfSourceError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(Self::from_document(path, doc))
    }

    /// Parse a PDF held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PdfSourceError> {
        let path = PathBuf::from("<memory>");
        let doc = Document::load_mem(bytes).map_err(|e| PdfSourceError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(Self::from_document(path, doc))
    }

    fn from_document(path: PathBuf, doc: Document) -> Self {
        let page_count = doc.get_pages().len();
        debug!(path = %path.display(), page_count, "opened PDF");
        Self {
            path,
            doc,
            page_count,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageTextProvider for PdfTextProvider {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_text(&self, page: usize) -> Option<String> {
        if page == 0 || page > self.page_count {
            return None;
        }
        let number = u32::try_from(page).ok()?;
        match self.doc.extract_text(&[number]) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(page, error = %e, "failed to extract page text");
                None
            }
        }
    }
}

impl std::fmt::Debug for PdfTextProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfTextProvider")
            .field("path", &self.path)
            .field("page_count", &self.page_count)
            .finish()
    }
}
