//! PDF header sniffing.
//!
//! Used before a file is handed to lopdf so that an obviously wrong input is
//! reported as a corrupt document without attempting a full parse.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"
const HEADER_LEN: u64 = 16;

/// Read the header of `path` and return the PDF version it declares.
///
/// A missing or unreadable file is [`Error::NotFound`]; anything that does
/// not start with a `%PDF-x.y` header is [`Error::CorruptDocument`].
pub fn sniff_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
            Error::NotFound(path.to_path_buf())
        }
        _ => Error::Io(e),
    })?;

    let mut header = Vec::with_capacity(HEADER_LEN as usize);
    file.take(HEADER_LEN).read_to_end(&mut header)?;
    sniff_bytes(&header)
}

/// Return the PDF version declared by the first bytes of `data`.
pub fn sniff_bytes(data: &[u8]) -> Result<String> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::CorruptDocument("missing %PDF- header".to_string()));
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::CorruptDocument(format!(
            "unsupported PDF version: {}",
            version
        )));
    }

    Ok(version)
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}
