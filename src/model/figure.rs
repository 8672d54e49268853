//! References to images written during extraction.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An image extracted from a page and persisted to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Page index (0-based)
    pub page: u32,

    /// Position of the image within its page (0-based)
    pub index: u32,

    /// Where the image was written
    pub path: PathBuf,

    /// Width in pixels, when known
    pub width: Option<u32>,

    /// Height in pixels, when known
    pub height: Option<u32>,
}

impl ImageRef {
    /// Create an image reference.
    pub fn new(page: u32, index: u32, path: impl Into<PathBuf>) -> Self {
        Self {
            page,
            index,
            path: path.into(),
            width: None,
            height: None,
        }
    }

    /// Set image dimensions.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// File name for an image, e.g. `page_0_image_1.png`.
    ///
    /// `base` is added to `index` so callers can number images from 1.
    pub fn file_name(page: u32, index: u32, base: u32) -> String {
        format!("page_{}_image_{}.png", page, index + base)
    }

    /// Path of the persisted file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
