//! Progress events emitted while importing a book.

use std::fmt;
use std::path::PathBuf;

use crate::model::DocumentId;

/// Events emitted during an import, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportEvent {
    /// Import has started and an identifier has been assigned.
    Started {
        /// Book title
        title: String,
        /// Identifier assigned to the book
        id: DocumentId,
    },

    /// One page of text was imported.
    Text {
        /// 0-based page index
        page: u32,
        /// The page text
        text: String,
    },

    /// One image reference was imported.
    Image {
        /// 0-based page index the image came from
        page: u32,
        /// Location of the image file
        path: PathBuf,
    },

    /// Import has completed.
    Finished {
        /// Identifier assigned to the book
        id: DocumentId,
    },
}

impl ImportEvent {
    /// Check if this event reports a single imported item.
    pub fn is_item(&self) -> bool {
        matches!(self, ImportEvent::Text { .. } | ImportEvent::Image { .. })
    }
}

impl fmt::Display for ImportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportEvent::Started { title, id } => write!(f, "Importing book: {} ({})", title, id),
            ImportEvent::Text { page, text } => {
                write!(f, "Text from page {}:\n{}", page + 1, text)
            }
            ImportEvent::Image { path, .. } => write!(f, "Image saved: {}", path.display()),
            ImportEvent::Finished { id } => write!(f, "Imported book as {}", id),
        }
    }
}

/// Receives import progress.
pub trait ImportProgress {
    /// Called once per event, in import order.
    fn report(&mut self, event: ImportEvent);
}

/// Collects events, mostly useful for inspection in tests.
impl ImportProgress for Vec<ImportEvent> {
    fn report(&mut self, event: ImportEvent) {
        self.push(event);
    }
}

/// Reports progress through the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn report(&mut self, event: ImportEvent) {
        log::info!("{}", event);
    }
}
