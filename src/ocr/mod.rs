//! Optical character recognition over image files.
//!
//! An image is decoded into a [`PixelArray`] and handed to an
//! [`OcrEngine`]. [`TesseractEngine`] is the bundled engine; tests and
//! embedders can plug in their own.
//!
//! # Example
//!
//! ```no_run
//! use textgrab::ocr::{OcrExtractor, TesseractConfig, TesseractEngine};
//!
//! fn main() -> textgrab::Result<()> {
//!     let engine = TesseractEngine::new(TesseractConfig::from_env()?)?;
//!     let text = OcrExtractor::new(engine).extract("scan.png")?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

mod pixels;
mod tesseract;

pub use pixels::PixelArray;
pub use tesseract::{
    TesseractConfig, TesseractEngine, TESSERACT_CMD_ENV, TESSERACT_LANG_ENV, TESSERACT_PSM_ENV,
};

use std::path::Path;

use crate::error::Result;
use crate::text::ExtractedText;

/// Trait that all OCR engines implement.
pub trait OcrEngine: Send + Sync {
    /// Engine identifier (e.g., "tesseract").
    fn name(&self) -> &'static str;

    /// Recognize the text in `pixels`, returned exactly as the engine
    /// produced it.
    fn recognize(&self, pixels: &PixelArray) -> Result<String>;
}

impl<E: OcrEngine + ?Sized> OcrEngine for Box<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn recognize(&self, pixels: &PixelArray) -> Result<String> {
        (**self).recognize(pixels)
    }
}

/// Loads an image file and runs it through an OCR engine.
#[derive(Debug, Clone)]
pub struct OcrExtractor<E> {
    engine: E,
}

impl<E: OcrEngine> OcrExtractor<E> {
    /// Create an extractor over `engine`.
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Decode the image at `path` and recognize its text.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<ExtractedText> {
        let path = path.as_ref();
        let pixels = PixelArray::load(path)?;
        log::info!("Running {} OCR on {}", self.engine.name(), path.display());
        self.recognize(&pixels)
    }

    /// Recognize text in an already decoded pixel array.
    pub fn recognize(&self, pixels: &PixelArray) -> Result<ExtractedText> {
        let text = self.engine.recognize(pixels)?;
        log::debug!("{} returned {} bytes", self.engine.name(), text.len());
        Ok(ExtractedText::new(text))
    }
}
