//! # textgrab
//!
//! Two small text extraction paths:
//!
//! - **PDF**: open a document with [lopdf](https://docs.rs/lopdf) and read
//!   the text layer of one page (the first, by default).
//! - **OCR**: decode an image into a pixel array and run it through
//!   Tesseract.
//!
//! The paths share nothing but [`Error`] and [`ExtractedText`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use textgrab::{extract_image_text, extract_pdf_text, TesseractConfig};
//!
//! fn main() -> textgrab::Result<()> {
//!     let page = extract_pdf_text("report.pdf")?;
//!     println!("{}", page);
//!
//!     let scan = extract_image_text("scan.png", &TesseractConfig::from_env()?)?;
//!     println!("{}", scan);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod ocr;
pub mod pdf;
pub mod text;

// Re-export commonly used types
pub use error::{Error, Result};
pub use ocr::{OcrEngine, OcrExtractor, PixelArray, TesseractConfig, TesseractEngine};
pub use pdf::{
    with_document, DocumentInfo, DocumentSource, LopdfBackend, LopdfSource, Page, PdfBackend,
    PdfDocument, PdfTextExtractor,
};
pub use text::ExtractedText;

use std::path::Path;

/// Extract the text of the first page of a PDF file.
///
/// # Example
///
/// ```no_run
/// use textgrab::extract_pdf_text;
///
/// let text = extract_pdf_text("document.pdf").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_pdf_text<P: AsRef<Path>>(path: P) -> Result<ExtractedText> {
    PdfTextExtractor::new().extract(path)
}

/// OCR an image file with Tesseract.
///
/// The engine config is resolved before the image is read, so a bad
/// executable path fails with [`Error::EngineNotFound`] up front.
pub fn extract_image_text<P: AsRef<Path>>(
    path: P,
    config: &TesseractConfig,
) -> Result<ExtractedText> {
    let engine = TesseractEngine::new(config.clone())?;
    OcrExtractor::new(engine).extract(path)
}
