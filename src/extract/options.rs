//! Extraction options and configuration.

use std::path::PathBuf;

/// Default directory images are written to.
pub const DEFAULT_IMAGE_DIR: &str = "extracted_images";

/// Default file name for the flat text dump.
pub const DEFAULT_TEXT_FILE: &str = "extracted_text.txt";

/// Options for extracting a PDF into a book.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Directory image files are written to
    pub output_dir: PathBuf,

    /// Whether to write embedded images to disk
    pub extract_images: bool,

    /// Number added to the per-page image index in file names (0 or 1)
    pub image_index_base: u32,

    /// Where to write the flat per-page text dump, if anywhere
    pub text_dump: Option<PathBuf>,

    /// Book title; defaults to the source file name without `.pdf`
    pub title: Option<String>,

    /// External company reference carried on the book
    pub external_company_id: Option<String>,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip undecodable images and unreadable text).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the image output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Enable or disable image extraction.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.extract_images = extract;
        self
    }

    /// Number images from 1 instead of 0 in file names.
    pub fn one_based_images(mut self) -> Self {
        self.image_index_base = 1;
        self
    }

    /// Write a flat text dump to `path`.
    pub fn with_text_dump(mut self, path: impl Into<PathBuf>) -> Self {
        self.text_dump = Some(path.into());
        self
    }

    /// Override the book title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the external company reference.
    pub fn with_external_company_id(mut self, id: impl Into<String>) -> Self {
        self.external_company_id = Some(id.into());
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            output_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            extract_images: true,
            image_index_base: 0,
            text_dump: None,
            title: None,
            external_company_id: None,
        }
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Log and continue past per-page and per-image failures
    Lenient,
}
