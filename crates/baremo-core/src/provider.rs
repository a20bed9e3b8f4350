//! Page text sources
//!
//! The walker only needs the number of pages and the text of a page by its
//! 1-based number. Concrete sources (PDF, text dumps) live in `baremo-pdf`.

/// Read-only access to the text of a paged document
pub trait PageTextProvider {
    /// Total pages in the document
    fn page_count(&self) -> usize;

    /// Text of page `page` (1-based), or `None` when the page is out of
    /// bounds or its text could not be extracted
    fn page_text(&self, page: usize) -> Option<String>;
}

impl<P: PageTextProvider + ?Sized> PageTextProvider for &P {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn page_text(&self, page: usize) -> Option<String> {
        (**self).page_text(page)
    }
}

impl<P: PageTextProvider + ?Sized> PageTextProvider for Box<P> {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn page_text(&self, page: usize) -> Option<String> {
        (**self).page_text(page)
    }
}

/// Pages held in memory; `None` entries model pages whose extraction failed
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    pages: Vec<Option<String>>,
}

impl MemoryProvider {
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(|p| Some(p.into())).collect(),
        }
    }

    /// Build from pages where some may be unreadable
    pub fn with_failures(pages: Vec<Option<String>>) -> Self {
        Self { pages }
    }
}

impl PageTextProvider for MemoryProvider {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page: usize) -> Option<String> {
        page.checked_sub(1)
            .and_then(|idx| self.pages.get(idx))
            .and_then(|text| text.clone())
    }
}
