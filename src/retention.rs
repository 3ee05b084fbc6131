//! Log file retention
//!
//! Splits a directory's newest-first file list into the files to keep and
//! the excess files that may be deleted.

use crate::discovery::LogFile;

/// Outcome of applying a retention count to one directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<'a> {
    /// The most recent files, newest first
    pub keep: &'a [LogFile],
    /// Everything older, in the same relative order
    pub excess: &'a [LogFile],
}

/// Keep the first `files_to_keep` entries of a newest-first list
pub fn select(files: &[LogFile], files_to_keep: usize) -> Selection<'_> {
    let (keep, excess) = files.split_at(files_to_keep.min(files.len()));
    Selection { keep, excess }
}
