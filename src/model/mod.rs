//! Data model shared by the extractor and the importer.
//!
//! A [`Book`] is built page by page from [`PageRecord`]s and carries the
//! [`ImageRef`]s of every image written to disk.

mod book;
mod figure;
mod page;

pub use book::{Book, DocumentId};
pub use figure::ImageRef;
pub use page::PageRecord;
