//! Flat text dump of an extracted book.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::Book;

/// Render page texts under `--- Page <n> ---` headers, 1-based.
///
/// Each page is followed by a blank line.
pub fn to_text(book: &Book) -> String {
    let mut output = String::new();
    for (i, text) in book.texts.iter().enumerate() {
        output.push_str(&format!("--- Page {} ---\n", i + 1));
        output.push_str(text);
        output.push_str("\n\n");
    }
    output
}

/// Write the text dump of a book to `path`, replacing any existing file.
pub fn write_text(book: &Book, path: &Path) -> Result<()> {
    super::ensure_parent(path)?;
    fs::write(path, to_text(book))?;
    Ok(())
}
