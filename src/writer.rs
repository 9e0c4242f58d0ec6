use crate::error::{Error, Result};
use std::{
    ffi::OsString,
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Computes the output path for a candidate: the sibling `<name>.md`.
pub(crate) fn output_path(candidate: &Path) -> PathBuf {
    let mut name = OsString::from(candidate.as_os_str());
    name.push(".md");
    PathBuf::from(name)
}

/// Persists the response text verbatim to the candidate's `.md` sibling.
///
/// The write goes through a temporary file and an atomic rename, which
/// overwrites any existing output without a prior existence check.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, written,
/// synced, or renamed into place.
pub(crate) fn write_markdown(candidate: &Path, content: &str) -> Result<PathBuf> {
    let path = output_path(candidate);
    let temp_path = path.with_extension("tmp");

    let mut temp_file = fs::File::create(&temp_path).map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .sync_all()
        .map_err(|e| Error::io(&temp_path, e))?;

    drop(temp_file);

    fs::rename(&temp_path, &path).map_err(|e| Error::io(&path, e))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(path)
}
