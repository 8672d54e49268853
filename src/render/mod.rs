//! Output writers for extracted books.

mod json;
mod text;

pub use json::{to_json, write_json, JsonFormat};
pub use text::{to_text, write_text};

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Create the parent directory of `path` if it has one.
fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
