//! Page text sources for baremo listings
//!
//! Two sources implement [`PageTextProvider`]:
//! - [`PdfTextProvider`] reads the official PDF with lopdf
//! - [`TextDumpProvider`] reads a `pdftotext` dump split on form feeds
//!
//! [`open_document`] picks one by file extension.

pub mod dump;
pub mod error;
pub mod pdf;

pub use dump::TextDumpProvider;
pub use error::PdfSourceError;
pub use pdf::PdfTextProvider;

use std::path::Path;

use baremo_core::PageTextProvider;

/// Open a document, choosing the reader by extension.
///
/// `.pdf` files go through lopdf; anything else is treated as a text dump.
pub fn open_document<P: AsRef<Path>>(path: P) -> Result<Box<dyn PageTextProvider>, PdfSourceError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PdfSourceError::NotFound(path.to_path_buf()));
    }

    if is_pdf(path) {
        Ok(Box::new(PdfTextProvider::open(path)?))
    } else {
        Ok(Box::new(TextDumpProvider::open(path)?))
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
