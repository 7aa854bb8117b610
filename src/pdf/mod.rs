//! PDF text extraction.
//!
//! A [`PdfDocument`] is the scoped handle for an opened file: it owns the
//! parsed document and releases it when dropped. A [`Page`] borrows from
//! its document, so the compiler rejects any page that outlives it.
//!
//! # Example
//!
//! ```no_run
//! use textgrab::pdf::{with_document, LopdfSource};
//!
//! fn main() -> textgrab::Result<()> {
//!     let text = with_document(&LopdfSource, "report.pdf", |doc| {
//!         doc.first_page()?.extract_text()
//!     })?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

mod backend;

pub use backend::{DocumentInfo, DocumentSource, LopdfBackend, LopdfSource, PdfBackend};

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::text::ExtractedText;

/// An opened PDF document.
pub struct PdfDocument<B: PdfBackend> {
    backend: B,
    path: Option<PathBuf>,
}

impl<B: PdfBackend> PdfDocument<B> {
    /// Wrap an already opened backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            path: None,
        }
    }

    /// Open the document at `path` through `source`.
    pub fn open<S>(source: &S, path: impl AsRef<Path>) -> Result<Self>
    where
        S: DocumentSource<Backend = B>,
    {
        let path = path.as_ref();
        let backend = source.open(path)?;
        log::debug!(
            "Opened {} ({} pages)",
            path.display(),
            backend.page_count()
        );
        Ok(Self {
            backend,
            path: Some(path.to_path_buf()),
        })
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.backend.page_count()
    }

    /// Page at 0-based `index`.
    pub fn page(&self, index: usize) -> Result<Page<'_, B>> {
        let count = self.page_count();
        if index >= count {
            return Err(Error::PageOutOfRange { index, count });
        }
        Ok(Page { doc: self, index })
    }

    /// The first page.
    pub fn first_page(&self) -> Result<Page<'_, B>> {
        self.page(0)
    }

    /// All pages in document order.
    pub fn pages(&self) -> impl Iterator<Item = Page<'_, B>> + '_ {
        (0..self.page_count()).map(move |index| Page { doc: self, index })
    }

    /// Document-level information.
    pub fn info(&self) -> DocumentInfo {
        self.backend.info()
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: PdfBackend> Drop for PdfDocument<B> {
    fn drop(&mut self) {
        if let Some(ref path) = self.path {
            log::debug!("Released {}", path.display());
        }
    }
}

/// A read-only view of one page.
pub struct Page<'a, B: PdfBackend> {
    doc: &'a PdfDocument<B>,
    index: usize,
}

impl<'a, B: PdfBackend> Page<'a, B> {
    /// 0-based position in the document.
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based page number.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Extract this page's text layer.
    pub fn extract_text(&self) -> Result<ExtractedText> {
        let text = self.doc.backend.page_text(self.index)?;
        log::debug!("Page {}: extracted {} bytes", self.number(), text.len());
        Ok(ExtractedText::new(text))
    }
}

/// Open `path`, run `f` against the document, then release it.
///
/// The document is dropped on every exit path out of `f`, including errors
/// returned with `?` and unwinding panics.
pub fn with_document<S, P, F, R>(source: &S, path: P, f: F) -> Result<R>
where
    S: DocumentSource,
    P: AsRef<Path>,
    F: FnOnce(&PdfDocument<S::Backend>) -> Result<R>,
{
    let document = PdfDocument::open(source, path)?;
    f(&document)
}

/// Extracts the text of one page (the first, by default) from a PDF file.
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor<S = LopdfSource> {
    source: S,
    page: usize,
}

impl PdfTextExtractor<LopdfSource> {
    /// Create an extractor backed by lopdf.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: DocumentSource> PdfTextExtractor<S> {
    /// Create an extractor over a custom document source.
    pub fn with_source(source: S) -> Self {
        Self { source, page: 0 }
    }

    /// Select the 0-based page index to extract.
    pub fn with_page(mut self, index: usize) -> Self {
        self.page = index;
        self
    }

    /// The selected 0-based page index.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Extract the selected page's text from the PDF at `path`.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<ExtractedText> {
        with_document(&self.source, path, |doc| doc.page(self.page)?.extract_text())
    }
}
