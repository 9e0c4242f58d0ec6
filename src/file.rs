use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Reads a candidate file as UTF-8 text.
///
/// Files containing null bytes are rejected as binary before any UTF-8
/// conversion is attempted; everything else must decode cleanly.
///
/// # Errors
///
/// Returns an error if the file cannot be read, contains null bytes, or is
/// not valid UTF-8.
pub(crate) fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;

    if memchr::memchr(0, &bytes).is_some() {
        return Err(Error::invalid_utf8(path));
    }

    String::from_utf8(bytes).map_err(|_| Error::invalid_utf8(path))
}
