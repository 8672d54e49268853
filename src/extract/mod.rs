//! PDF extraction module.

mod extractor;
mod image;
mod options;

pub use self::image::{encode_png, EncodedImage};
pub use extractor::Extractor;
pub use options::{ErrorMode, ExtractOptions, DEFAULT_IMAGE_DIR, DEFAULT_TEXT_FILE};
