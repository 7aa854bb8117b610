//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface for PDF operations, isolating
//! the concrete PDF library (lopdf) from the extraction logic.

use std::fs::File;
use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::error::{Error, Result};

/// Document-level information read from the trailer and Info dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Number of pages
    pub page_count: usize,
    /// Whether the document is encrypted
    pub encrypted: bool,
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Producing application
    pub producer: Option<String>,
}

/// Abstract interface for an opened PDF document.
///
/// Pages are addressed by 0-based index in document order.
pub trait PdfBackend {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Extract the text layer of the page at `index`.
    fn page_text(&self, index: usize) -> Result<String>;

    /// Document-level information.
    fn info(&self) -> DocumentInfo;
}

/// Something that opens a PDF by path.
pub trait DocumentSource {
    /// The backend type produced by [`DocumentSource::open`].
    type Backend: PdfBackend;

    /// Open and parse the document at `path`.
    fn open(&self, path: &Path) -> Result<Self::Backend>;
}

// ---------------------------------------------------------------------------
// LopdfBackend — concrete implementation backed by lopdf
// ---------------------------------------------------------------------------

/// Default [`DocumentSource`] that loads files with lopdf.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfSource;

impl DocumentSource for LopdfSource {
    type Backend = LopdfBackend;

    fn open(&self, path: &Path) -> Result<LopdfBackend> {
        LopdfBackend::load_file(path)
    }
}

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
    /// lopdf page numbers (1-based) in document order.
    page_numbers: Vec<u32>,
}

impl LopdfBackend {
    /// Load from a file path.
    ///
    /// The file is read and closed before this returns; the parsed
    /// document lives in memory.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::from_io(path, e))?;
        let doc = LopdfDocument::load_from(file)?;
        Self::from_document(doc)
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc)
    }

    fn from_document(doc: LopdfDocument) -> Result<Self> {
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Err(Error::MalformedDocument("document has no pages".to_string()));
        }
        Ok(Self { doc, page_numbers })
    }

    /// Direct access to the underlying `lopdf::Document`.
    pub fn raw_doc(&self) -> &LopdfDocument {
        &self.doc
    }
}

impl PdfBackend for LopdfBackend {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        let page_num = *self.page_numbers.get(index).ok_or(Error::PageOutOfRange {
            index,
            count: self.page_numbers.len(),
        })?;

        self.doc
            .extract_text(&[page_num])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_num, e)))
    }

    fn info(&self) -> DocumentInfo {
        let mut info = DocumentInfo {
            version: self.doc.version.to_string(),
            page_count: self.page_numbers.len(),
            encrypted: self.doc.is_encrypted(),
            ..Default::default()
        };

        let info_dict = self
            .doc
            .trailer
            .get(b"Info")
            .and_then(|o| o.as_reference())
            .and_then(|r| self.doc.get_dictionary(r));

        if let Ok(dict) = info_dict {
            info.title = get_string_from_dict(dict, b"Title");
            info.author = get_string_from_dict(dict, b"Author");
            info.producer = get_string_from_dict(dict, b"Producer");
        }

        info
    }
}

/// Helper to get a string from a PDF dictionary.
fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        lopdf::Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        lopdf::Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE with BOM, else UTF-8, else Latin-1.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_pdf_string_utf8() {
        assert_eq!(decode_pdf_string(b"Hello"), "Hello");
    }

    #[test]
    fn test_decode_pdf_string_latin1() {
        // 0xE9 = 'é' in Latin-1
        let bytes = vec![0x48, 0x65, 0x6C, 0x6C, 0xE9];
        assert_eq!(decode_pdf_string(&bytes), "Hellé");
    }

    #[test]
    fn test_decode_pdf_string_utf16be() {
        // UTF-16BE BOM + "Hi"
        let bytes = vec![0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_pdf_string(&bytes), "Hi");
    }

    #[test]
    fn test_load_bytes_rejects_garbage() {
        let result = LopdfBackend::load_bytes(b"<!DOCTYPE html><html></html>");
        assert!(matches!(result, Err(Error::MalformedDocument(_))));
    }

    #[test]
    fn test_load_file_missing() {
        let result = LopdfBackend::load_file("definitely/not/here.pdf");
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
