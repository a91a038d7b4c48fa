//! File enumeration for integrity commands

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{IntegrityError, Result};

/// Collect every non-directory path denoted by `path`
///
/// # Arguments
/// * `path` - A file or a directory to walk recursively
///
/// # Returns
/// The path itself when it names a file, otherwise every non-directory
/// entry beneath it. Symlinks are not followed and are listed like files.
/// Any walk error discards the partial result.
pub fn list_files(path: &Path) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(path).map_err(|source| IntegrityError::PathNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|source| IntegrityError::Scan {
            path: path.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_dir() {
            files.push(entry.into_path());
        }
    }

    tracing::debug!(root = %path.display(), count = files.len(), "enumerated files");
    Ok(files)
}
