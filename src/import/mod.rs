//! Importing extracted books.
//!
//! An [`Importer`] validates a [`Book`](crate::model::Book), assigns it an
//! identifier and walks its texts and images in order, reporting each one to
//! an [`ImportProgress`].

mod importer;
mod progress;

pub use importer::{Importer, SimulatedImporter, DEFAULT_COMPANY_ID};
pub use progress::{ImportEvent, ImportProgress, LogProgress};
