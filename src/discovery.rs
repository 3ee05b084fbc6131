//! Log file discovery
//!
//! Walks the log root and groups `.log` files by the directory they live in.
//! Each directory is scoped on its own so retention never mixes files from
//! different directories.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use walkdir::WalkDir;

use crate::config::RetentionConfig;
use crate::error::{CleanerError, Result};

/// Extension a file must carry to be treated as a log (case-sensitive)
pub const LOG_FILE_EXTENSION: &str = "log";

/// A discovered log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    /// Full path to the file
    pub path: PathBuf,
    /// Last modification time at discovery
    pub modified: SystemTime,
}

impl LogFile {
    pub fn new(path: PathBuf, modified: SystemTime) -> Self {
        Self { path, modified }
    }

    /// File name for display
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn modified_local(&self) -> DateTime<Local> {
        DateTime::<Local>::from(self.modified)
    }
}

/// One directory and its candidate log files, newest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryScope {
    pub directory: PathBuf,
    pub files: Vec<LogFile>,
}

/// Result of walking the log root
#[derive(Debug, Default)]
pub struct Discovery {
    /// Scopes ordered by directory path, root first
    pub scopes: Vec<DirectoryScope>,
    /// Directories or files that could not be read; siblings were still scanned
    pub failures: Vec<CleanerError>,
}

impl Discovery {
    pub fn file_count(&self) -> usize {
        self.scopes.iter().map(|s| s.files.len()).sum()
    }
}

/// Find all log files under `root`, grouped per directory
///
/// A missing root yields an empty result. Failing to list the root itself is
/// an error; failing to list a subdirectory is recorded in `failures`.
pub fn discover(root: &Path, config: &RetentionConfig) -> Result<Discovery> {
    match std::fs::metadata(root) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("Log directory {} does not exist", root.display());
            return Ok(Discovery::default());
        }
        Err(e) => return Err(CleanerError::discovery(root, e)),
    }

    let max_depth = if config.process_subfolders {
        usize::MAX
    } else {
        1
    };

    let mut scopes: BTreeMap<PathBuf, Vec<LogFile>> = BTreeMap::new();
    let mut failures = Vec::new();

    for entry in WalkDir::new(root).max_depth(max_depth).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let depth = err.depth();
                let path = err.path().unwrap_or(root).to_path_buf();
                let source: io::Error = err.into();

                if depth == 0 {
                    return Err(CleanerError::discovery(path, source));
                }
                if source.kind() == io::ErrorKind::NotFound {
                    tracing::debug!("{} vanished during discovery", path.display());
                    continue;
                }

                tracing::warn!("Could not read {}: {}", path.display(), source);
                scopes.remove(&path);
                failures.push(CleanerError::discovery(path, source));
                continue;
            }
        };

        let path = entry.path();

        if entry.file_type().is_dir() {
            scopes.entry(path.to_path_buf()).or_default();
            continue;
        }

        if !entry.file_type().is_file()
            || path.extension() != Some(OsStr::new(LOG_FILE_EXTENSION))
        {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if config.exclude.is_excluded(&name) {
            tracing::debug!("Excluded {}", path.display());
            continue;
        }

        let modified = match entry
            .metadata()
            .map_err(io::Error::from)
            .and_then(|m| m.modified())
        {
            Ok(modified) => modified,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => {
                tracing::warn!("Could not stat {}: {}", path.display(), e);
                failures.push(CleanerError::access(path, e));
                continue;
            }
        };

        let directory = path.parent().unwrap_or(root).to_path_buf();
        scopes
            .entry(directory)
            .or_default()
            .push(LogFile::new(path.to_path_buf(), modified));
    }

    let scopes = scopes
        .into_iter()
        .map(|(directory, mut files)| {
            sort_newest_first(&mut files);
            DirectoryScope { directory, files }
        })
        .collect();

    Ok(Discovery { scopes, failures })
}

/// Newest first; equal times fall back to path order
pub fn sort_newest_first(files: &mut [LogFile]) {
    files.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| a.path.cmp(&b.path))
    });
}
