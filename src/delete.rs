//! Deletion of excess log files

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{CleanerError, Result};

/// What deleting did, or would do, to one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// File is missing or not a regular file
    NotFound,
}

/// Remove a log file; a missing file is reported, not an error
pub fn delete(path: &Path) -> Result<DeleteOutcome> {
    if plan_delete(path)? == DeleteOutcome::NotFound {
        return Ok(DeleteOutcome::NotFound);
    }

    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!("Deleted {}", path.display());
            Ok(DeleteOutcome::Deleted)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(DeleteOutcome::NotFound),
        Err(e) => Err(CleanerError::access(path, e)),
    }
}

/// Predict what `delete` would do without touching the file
pub fn plan_delete(path: &Path) -> Result<DeleteOutcome> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_file() => Ok(DeleteOutcome::Deleted),
        Ok(_) => Ok(DeleteOutcome::NotFound),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(DeleteOutcome::NotFound),
        Err(e) => Err(CleanerError::access(path, e)),
    }
}
