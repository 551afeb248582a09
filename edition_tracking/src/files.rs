//! Discovery of definition files under a resource directory

use crate::error::{Result, TrackingError};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Collect every `*.txt` file below `dir`, sorted by path.
///
/// Hidden files and ignore files are not special here; every definition file
/// counts. Unreadable entries are logged and skipped.
pub fn text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(TrackingError::MissingDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    let mut builder = WalkBuilder::new(dir);
    builder.standard_filters(false);
    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Read a whole file, attaching the path to any error
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| TrackingError::io(path, e))
}
