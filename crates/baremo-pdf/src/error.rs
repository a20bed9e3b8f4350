use std::path::PathBuf;
use thiserror::Error;

/// Failures opening a source document.
///
/// Only opening is fatal. Once a document is open, a page whose text cannot
/// be extracted is reported as missing by the provider instead.
#[derive(Error, Debug)]
pub enum PdfSourceError {
    #[error("Document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse PDF {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
