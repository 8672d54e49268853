//! JSON manifest of an extracted book.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Book;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a book, including its image references, to JSON.
pub fn to_json(book: &Book, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(book),
        JsonFormat::Compact => serde_json::to_string(book),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Write the JSON manifest of a book to `path`.
pub fn write_json(book: &Book, path: &Path, format: JsonFormat) -> Result<()> {
    let json = to_json(book, format)?;
    super::ensure_parent(path)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Book, ImageRef};

    fn sample_book() -> Book {
        let mut book = Book::new("Inspection");
        book.external_company_id = Some("acme".to_string());
        book.add_text("Hello");
        book.add_figure(ImageRef::new(0, 0, "extracted_images/page_0_image_0.png"));
        book
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample_book(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\": \"Inspection\""));
        assert!(json.contains("page_0_image_0.png"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact_roundtrips() {
        let json = to_json(&sample_book(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));

        let back: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(back.texts, vec!["Hello"]);
        assert_eq!(back.external_company_id.as_deref(), Some("acme"));
        assert!(back.id.is_none());
    }
}
