//! Book importers.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{Book, DocumentId};

use super::progress::{ImportEvent, ImportProgress};

/// Company id used when the book carries none.
pub const DEFAULT_COMPANY_ID: &str = "mock-company";

/// Trait for components that take an extracted book somewhere.
pub trait Importer {
    /// Importer name, for logs.
    fn name(&self) -> &str;

    /// Check that the book has everything an import needs.
    fn validate(&self, book: &Book) -> Result<()>;

    /// Import the book, reporting one event per text and image.
    ///
    /// On success the assigned identifier is also stored in `book.id`.
    fn import(&self, book: &mut Book, progress: &mut dyn ImportProgress) -> Result<DocumentId>;
}

/// An importer that stores nothing and only reports what it would upload.
#[derive(Debug, Clone)]
pub struct SimulatedImporter {
    company_id: String,
}

impl SimulatedImporter {
    /// Create an importer using [`DEFAULT_COMPANY_ID`].
    pub fn new() -> Self {
        Self {
            company_id: DEFAULT_COMPANY_ID.to_string(),
        }
    }

    /// Set the company id used for books without an external company id.
    pub fn with_company_id(mut self, id: impl Into<String>) -> Self {
        self.company_id = id.into();
        self
    }

    /// Identifier the book would be stored under.
    pub fn assign_id(&self, book: &Book) -> DocumentId {
        let company = book
            .external_company_id
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(self.company_id.as_str());
        DocumentId::new(format!("{}/{}", company, slugify(&book.title)))
    }
}

impl Default for SimulatedImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Importer for SimulatedImporter {
    fn name(&self) -> &str {
        "simulated"
    }

    fn validate(&self, book: &Book) -> Result<()> {
        if book.title.trim().is_empty() {
            return Err(Error::Validation("book title must not be empty".to_string()));
        }
        Ok(())
    }

    fn import(&self, book: &mut Book, progress: &mut dyn ImportProgress) -> Result<DocumentId> {
        self.validate(book)?;

        let id = self.assign_id(book);
        progress.report(ImportEvent::Started {
            title: book.title.clone(),
            id: id.clone(),
        });

        for (page, text) in (0u32..).zip(&book.texts) {
            progress.report(ImportEvent::Text {
                page,
                text: text.clone(),
            });
        }

        for figure in &book.figures {
            progress.report(ImportEvent::Image {
                page: figure.page,
                path: figure.path.clone(),
            });
        }

        progress.report(ImportEvent::Finished { id: id.clone() });
        book.id = Some(id.clone());
        Ok(id)
    }
}

/// Lowercase `s` and collapse runs of anything but letters and digits to `-`.
fn slugify(s: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let re = NON_ALNUM.get_or_init(|| Regex::new(r"[^\p{L}\p{N}]+").expect("valid regex"));

    let slug = re.replace_all(&s.to_lowercase(), "-").trim_matches('-').to_string();
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageRef;

    fn sample_book() -> Book {
        let mut book = Book::new("Floor Epoxy: Peeling Off");
        book.add_text("Hello");
        book.add_text("World");
        book.add_figure(ImageRef::new(1, 0, "out/page_1_image_0.png"));
        book
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Floor Epoxy: Peeling Off"), "floor-epoxy-peeling-off");
        assert_eq!(slugify("  --Report_01--  "), "report-01");
        assert_eq!(slugify("Größe"), "größe");
        assert_eq!(slugify("!!!"), "untitled");
    }

    #[test]
    fn test_assign_id_prefers_external_company() {
        let importer = SimulatedImporter::new();
        let mut book = sample_book();
        assert_eq!(
            importer.assign_id(&book).as_str(),
            "mock-company/floor-epoxy-peeling-off"
        );

        book.external_company_id = Some("acme".to_string());
        assert_eq!(importer.assign_id(&book).as_str(), "acme/floor-epoxy-peeling-off");
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let importer = SimulatedImporter::new();
        assert!(importer.validate(&Book::new("Report")).is_ok());
        assert!(matches!(
            importer.validate(&Book::new("")),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            importer.validate(&Book::new("   ")),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_import_reports_items_in_order() {
        let importer = SimulatedImporter::new().with_company_id("tests");
        let mut book = sample_book();
        let mut events: Vec<ImportEvent> = Vec::new();

        let id = importer.import(&mut book, &mut events).unwrap();

        assert_eq!(id.as_str(), "tests/floor-epoxy-peeling-off");
        assert_eq!(book.id.as_ref(), Some(&id));
        assert_eq!(events.len(), 5);
        assert!(matches!(events[0], ImportEvent::Started { .. }));
        assert!(matches!(&events[1], ImportEvent::Text { page: 0, text } if text == "Hello"));
        assert!(matches!(&events[2], ImportEvent::Text { page: 1, text } if text == "World"));
        assert!(matches!(&events[3], ImportEvent::Image { page: 1, .. }));
        assert!(matches!(events[4], ImportEvent::Finished { .. }));
    }

    #[test]
    fn test_import_invalid_book_reports_nothing() {
        let importer = SimulatedImporter::new();
        let mut book = Book::new("");
        book.add_text("orphan text");
        let mut events: Vec<ImportEvent> = Vec::new();

        let result = importer.import(&mut book, &mut events);

        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(events.is_empty());
        assert!(book.id.is_none());
    }
}
