//! Error types for textgrab.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for textgrab operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting text.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading files or talking to the OCR engine.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input path does not resolve to a file.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The file is not a valid PDF, or has no pages.
    #[error("Malformed PDF document: {0}")]
    MalformedDocument(String),

    /// The PDF document is encrypted and requires a password.
    #[error("Document is encrypted")]
    Encrypted,

    /// Page index is out of range.
    #[error("Page index {index} is out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    /// The PDF library failed to extract a page's text.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// The image file could not be decoded.
    #[error("Image decode error: {0}")]
    Decode(String),

    /// A pixel array has a shape the OCR path cannot handle.
    #[error("Invalid pixel array: {0}")]
    PixelArray(String),

    /// The pixel array could not be re-encoded for the OCR engine.
    #[error("Image encode error: {0}")]
    ImageEncode(String),

    /// The configured OCR executable is missing or not runnable.
    #[error("OCR engine not found: {} (set TESSERACT_CMD or pass --tesseract)", .0.display())]
    EngineNotFound(PathBuf),

    /// The OCR executable ran but reported failure.
    #[error("OCR engine failed ({status}): {stderr}")]
    Engine { status: String, stderr: String },

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Map an I/O error raised while opening `path`, turning NotFound into
    /// [`Error::FileNotFound`].
    pub(crate) fn from_io(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Error::FileNotFound(path.to_path_buf())
        } else {
            Error::Io(err)
        }
    }

    /// Whether this error reports a missing input file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::FileNotFound(_))
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::MalformedDocument(err.to_string()),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Error::Io(e),
            _ => Error::Decode(err.to_string()),
        }
    }
}
