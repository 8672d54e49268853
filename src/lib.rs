//! # pdfbook
//!
//! Page-oriented PDF extraction into a lightweight in-memory book.
//!
//! Each page of a PDF contributes one entry of plain text and zero or more
//! images, which are written to disk as PNG files named
//! `page_<n>_image_<k>.png`. The resulting [`Book`] can then be handed to an
//! [`Importer`], which validates it and reports every text and image as it
//! goes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfbook::{extract_file, import_book};
//!
//! fn main() -> pdfbook::Result<()> {
//!     let mut book = extract_file("report.pdf")?;
//!     println!("{} pages, {} images", book.page_count(), book.figures.len());
//!
//!     let id = import_book(&mut book)?;
//!     println!("imported as {}", id);
//!     Ok(())
//! }
//! ```

pub mod detect;
pub mod error;
pub mod extract;
pub mod import;
pub mod model;
pub mod render;

pub use error::{Error, Result};
pub use extract::{ErrorMode, ExtractOptions, Extractor};
pub use import::{ImportEvent, ImportProgress, Importer, LogProgress, SimulatedImporter};
pub use model::{Book, DocumentId, ImageRef, PageRecord};
pub use render::JsonFormat;

use std::path::Path;

/// Extract a PDF file into a book, writing images to `extracted_images/`.
///
/// # Example
///
/// ```no_run
/// let book = pdfbook::extract_file("report.pdf").unwrap();
/// assert_eq!(book.texts.len(), book.page_count());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Book> {
    Extractor::open(path)?.extract()
}

/// Extract a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfbook::{extract_file_with_options, ExtractOptions};
///
/// let options = ExtractOptions::new()
///     .with_output_dir("out/images")
///     .with_text_dump("out/extracted_text.txt")
///     .lenient();
/// let book = extract_file_with_options("report.pdf", options).unwrap();
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Book> {
    Extractor::open_with_options(path, options)?.extract()
}

/// Extract a PDF held in memory. `name` stands in for the file name.
pub fn extract_bytes(data: &[u8], name: &str, options: ExtractOptions) -> Result<Book> {
    Extractor::from_bytes(data, name, options)?.extract()
}

/// Import a book with the [`SimulatedImporter`], logging progress.
pub fn import_book(book: &mut Book) -> Result<DocumentId> {
    SimulatedImporter::new().import(book, &mut LogProgress)
}
