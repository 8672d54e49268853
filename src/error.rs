//! Error types for pdfbook.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfbook operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting or importing a book.
#[derive(Error, Debug)]
pub enum Error {
    /// The source document does not exist or cannot be read.
    #[error("Document not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The source is not a PDF, or the PDF library could not parse it.
    #[error("Corrupt document: {0}")]
    CorruptDocument(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// A required field of the book is missing.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Error extracting or encoding an embedded image.
    #[error("Image extraction error: {0}")]
    ImageExtract(String),

    /// Error extracting page text.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// I/O error when writing output files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error serializing a book.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::CorruptDocument(err.to_string()),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ImageExtract(err.to_string())
    }
}
