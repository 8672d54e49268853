//! The book aggregate produced by extraction and consumed by import.

use super::{ImageRef, PageRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Identifier assigned to a book by an importer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wrap an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document extracted page by page.
///
/// `texts` holds exactly one entry per page, in page order. `figures` holds
/// every image written during extraction, in the order they were written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Book title; must be non-empty before import
    pub title: String,

    /// Reference to the owning company in an external system
    pub external_company_id: Option<String>,

    /// Extracted text, one entry per page
    pub texts: Vec<String>,

    /// Extracted images across all pages
    pub figures: Vec<ImageRef>,

    /// Identifier assigned by an importer
    pub id: Option<DocumentId>,

    /// Path the book was extracted from
    pub source: Option<PathBuf>,

    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Creation date from the PDF Info dictionary
    pub created: Option<DateTime<Utc>>,

    /// When extraction finished
    pub extracted_at: DateTime<Utc>,
}

impl Book {
    /// Create an empty book.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            external_company_id: None,
            texts: Vec::new(),
            figures: Vec::new(),
            id: None,
            source: None,
            pdf_version: String::new(),
            created: None,
            extracted_at: Utc::now(),
        }
    }

    /// Append one page of text.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.texts.push(text.into());
    }

    /// Append an extracted image.
    pub fn add_figure(&mut self, figure: ImageRef) {
        self.figures.push(figure);
    }

    /// Fold a page record into the book.
    pub fn add_page(&mut self, page: PageRecord) {
        self.texts.push(page.text);
        self.figures.extend(page.images);
    }

    /// Number of pages folded into the book.
    pub fn page_count(&self) -> usize {
        self.texts.len()
    }

    /// Images that came from the given 0-based page.
    pub fn figures_on_page(&self, page: u32) -> impl Iterator<Item = &ImageRef> {
        self.figures.iter().filter(move |f| f.page == page)
    }

    /// Whether the book has been through an importer.
    pub fn is_imported(&self) -> bool {
        self.id.is_some()
    }
}
