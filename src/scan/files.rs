//! Filesystem discovery and validation for batch scanning.

use crate::config::ScanConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors that abort a batch scan before any image is analyzed.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("not a directory: {0}")]
    NotADirectory(String),
    #[error("cannot access directory {path}: {message}")]
    Inaccessible { path: String, message: String },
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
    #[error("failed to build worker pool: {0}")]
    PoolBuild(String),
}

/// Validates that a directory exists and is readable.
///
/// Resolves to an absolute path so later log lines and failure records
/// are unambiguous.
pub fn validate_directory(directory: &Path) -> Result<PathBuf, ScanError> {
    let abs_path = directory
        .canonicalize()
        .map_err(|e| ScanError::Inaccessible {
            path: directory.display().to_string(),
            message: e.to_string(),
        })?;

    if !abs_path.is_dir() {
        return Err(ScanError::NotADirectory(abs_path.display().to_string()));
    }

    // Probe readability up front; a permission error here should fail the
    // whole scan, not surface as an empty result set
    std::fs::read_dir(&abs_path).map_err(|e| ScanError::Inaccessible {
        path: abs_path.display().to_string(),
        message: e.to_string(),
    })?;

    Ok(abs_path)
}

/// Discovers candidate image files in the top level of a directory.
///
/// Only the directory itself is searched (no recursion), matching files
/// are filtered by the configured extensions, and the result is sorted by
/// file name so batch output order is reproducible.
pub fn discover_images(directory: &Path, config: &ScanConfig) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(directory).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let ext = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        if config.allows_extension(&ext) {
            files.push(entry.into_path());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    files
}
