use crate::{
    config::Config,
    error::{Error, Result},
};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, trace};

/// Discovers files that still need conversion.
///
/// A candidate is a regular file whose name contains no `.` character and
/// for which no sibling `<name>.md` regular file exists. The decision is a
/// pure function of directory state at call time; files created later in
/// the same run are not re-observed.
pub struct Selector {
    root_dir: PathBuf,
}

impl Selector {
    /// Creates a new selector from configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            root_dir: config.root_dir.clone(),
        }
    }

    /// Creates a selector for an arbitrary directory.
    #[must_use]
    pub fn for_dir(path: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: path.into(),
        }
    }

    /// Lists the directory once and returns candidate names, sorted.
    ///
    /// Directory entries that are not regular files are excluded from both
    /// partitions: a subdirectory named without a dot is never a candidate,
    /// and a subdirectory ending in `.md` does not mask one.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read. This is fatal for
    /// the run; no per-file recovery applies here.
    pub fn select(&self) -> Result<Vec<String>> {
        let mut extensionless = Vec::new();
        let mut converted: HashSet<String> = HashSet::new();

        let entries = fs::read_dir(&self.root_dir).map_err(|e| Error::io(&self.root_dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&self.root_dir, e))?;
            let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
            if !file_type.is_file() {
                continue;
            }

            let Ok(name) = entry.file_name().into_string() else {
                // A non-UTF-8 name cannot equal any UTF-8 stem, so it can
                // neither be a candidate nor mask one.
                trace!("Skipping non-UTF-8 file name in {}", self.root_dir.display());
                continue;
            };

            if let Some(stem) = name.strip_suffix(".md") {
                converted.insert(stem.to_string());
            } else if !name.contains('.') {
                extensionless.push(name);
            }
        }

        let mut candidates: Vec<String> = extensionless
            .into_iter()
            .filter(|name| !converted.contains(name))
            .collect();
        candidates.sort();

        debug!(
            "Selected {} candidate(s) in {}",
            candidates.len(),
            self.root_dir.display()
        );

        Ok(candidates)
    }
}
