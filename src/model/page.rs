//! Page-level types.

use super::ImageRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The output of extracting a single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// Page index (0-based)
    pub index: u32,

    /// Title of the parent book
    pub title: String,

    /// Extracted text, possibly empty
    pub text: String,

    /// Images written for this page
    pub images: Vec<ImageRef>,

    /// Free-form metadata
    pub metadata: BTreeMap<String, String>,
}

impl PageRecord {
    /// Create a page record with no images.
    pub fn new(index: u32, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            text: text.into(),
            images: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Add an image to the page.
    pub fn add_image(&mut self, image: ImageRef) {
        self.images.push(image);
    }

    /// 1-based page number, as shown to users.
    pub fn number(&self) -> u32 {
        self.index + 1
    }

    /// Check if the page has neither text nor images.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.images.is_empty()
    }
}
