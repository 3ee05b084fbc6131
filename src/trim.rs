//! Log trimming
//!
//! Cuts a log down to its last N lines. The new content is written to a
//! temporary file next to the log and renamed over it, so readers see either
//! the old file or the trimmed one, never a partial write. Permissions and
//! the modification time carry over, so trimming never changes which files
//! retention treats as newest.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use filetime::FileTime;
use tempfile::NamedTempFile;

use crate::error::{CleanerError, Result};

/// What trimming did, or would do, to one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimOutcome {
    /// File was cut from `lines_before` down to `lines_kept`
    Trimmed {
        lines_before: usize,
        lines_kept: usize,
    },
    /// File already had `lines` lines or fewer
    Unchanged { lines: usize },
    /// File is missing or not a regular file
    NotFound,
}

/// Trim `path` to its last `lines_to_keep` lines
pub fn trim(path: &Path, lines_to_keep: usize) -> Result<TrimOutcome> {
    let Some(content) = read_log(path)? else {
        return Ok(TrimOutcome::NotFound);
    };

    let lines_before = count_lines(&content);
    if lines_before <= lines_to_keep {
        return Ok(TrimOutcome::Unchanged {
            lines: lines_before,
        });
    }

    let offset = tail_offset(&content, lines_to_keep);
    match replace_contents(path, &content[offset..]) {
        Ok(()) => {
            tracing::debug!(
                "Trimmed {} from {} to {} lines",
                path.display(),
                lines_before,
                lines_to_keep
            );
            Ok(TrimOutcome::Trimmed {
                lines_before,
                lines_kept: lines_to_keep,
            })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(TrimOutcome::NotFound),
        Err(e) => Err(CleanerError::access(path, e)),
    }
}

/// Predict what `trim` would do without touching the file
pub fn plan_trim(path: &Path, lines_to_keep: usize) -> Result<TrimOutcome> {
    let Some(content) = read_log(path)? else {
        return Ok(TrimOutcome::NotFound);
    };

    let lines_before = count_lines(&content);
    if lines_before <= lines_to_keep {
        Ok(TrimOutcome::Unchanged {
            lines: lines_before,
        })
    } else {
        Ok(TrimOutcome::Trimmed {
            lines_before,
            lines_kept: lines_to_keep,
        })
    }
}

/// Number of lines, counting a final line without a trailing newline
pub fn count_lines(content: &[u8]) -> usize {
    let newlines = content.iter().filter(|&&b| b == b'\n').count();
    match content.last() {
        Some(&b) if b != b'\n' => newlines + 1,
        _ => newlines,
    }
}

/// Byte offset at which the last `lines_to_keep` lines start
fn tail_offset(content: &[u8], lines_to_keep: usize) -> usize {
    let total = count_lines(content);
    if total <= lines_to_keep {
        return 0;
    }

    // Every skipped line is newline-terminated since at least one line follows it
    let skip = total - lines_to_keep;
    content
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == b'\n')
        .nth(skip - 1)
        .map(|(i, _)| i + 1)
        .unwrap_or(0)
}

fn read_log(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Ok(None),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(CleanerError::access(path, e)),
    }

    match fs::read(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CleanerError::access(path, e)),
    }
}

fn replace_contents(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let meta = fs::metadata(path)?;
    let modified = FileTime::from_last_modification_time(&meta);

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.as_file().set_permissions(meta.permissions())?;
    filetime::set_file_mtime(tmp.path(), modified)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn numbered(count: usize) -> String {
        (1..=count).map(|i| format!("line {}\n", i)).collect()
    }

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(b""), 0);
        assert_eq!(count_lines(b"one"), 1);
        assert_eq!(count_lines(b"one\n"), 1);
        assert_eq!(count_lines(b"one\ntwo"), 2);
        assert_eq!(count_lines(b"\n\n"), 2);
    }

    #[test]
    fn test_trims_to_last_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("laravel.log");
        fs::write(&path, numbered(30)).unwrap();

        let outcome = trim(&path, 20).unwrap();
        assert_eq!(
            outcome,
            TrimOutcome::Trimmed {
                lines_before: 30,
                lines_kept: 20
            }
        );

        let content = fs::read_to_string(&path).unwrap();
        let expected: String = (11..=30).map(|i| format!("line {}\n", i)).collect();
        assert_eq!(content, expected);
    }

    #[test]
    fn test_unterminated_last_line_is_kept() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        fs::write(&path, "a\nb\nc\nd").unwrap();

        trim(&path, 2).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "c\nd");
    }

    #[test]
    fn test_short_file_is_byte_identical() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("laravel.log");
        let original = numbered(19);
        fs::write(&path, &original).unwrap();

        assert_eq!(trim(&path, 20).unwrap(), TrimOutcome::Unchanged { lines: 19 });
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_exact_line_count_is_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("laravel.log");
        fs::write(&path, numbered(20)).unwrap();

        assert_eq!(trim(&path, 20).unwrap(), TrimOutcome::Unchanged { lines: 20 });
    }

    #[test]
    fn test_trim_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("laravel.log");
        fs::write(&path, numbered(50)).unwrap();

        trim(&path, 10).unwrap();
        let once = fs::read(&path).unwrap();
        assert_eq!(trim(&path, 10).unwrap(), TrimOutcome::Unchanged { lines: 10 });
        assert_eq!(fs::read(&path).unwrap(), once);
    }

    #[test]
    fn test_non_utf8_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary.log");
        fs::write(&path, b"\xff\xfe\n\x00one\ntwo\n").unwrap();

        trim(&path, 1).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"two\n");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gone.log");
        assert_eq!(trim(&path, 10).unwrap(), TrimOutcome::NotFound);
        assert_eq!(plan_trim(&path, 10).unwrap(), TrimOutcome::NotFound);
    }

    #[test]
    fn test_directory_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(trim(temp_dir.path(), 10).unwrap(), TrimOutcome::NotFound);
    }

    #[test]
    fn test_plan_does_not_modify() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("laravel.log");
        let original = numbered(30);
        fs::write(&path, &original).unwrap();

        assert_eq!(
            plan_trim(&path, 20).unwrap(),
            TrimOutcome::Trimmed {
                lines_before: 30,
                lines_kept: 20
            }
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("laravel.log");
        fs::write(&path, numbered(30)).unwrap();

        trim(&path, 5).unwrap();
        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_modification_time_is_preserved() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("laravel-3.log");
        fs::write(&path, numbered(30)).unwrap();
        let old = FileTime::from_unix_time(1_600_000_000, 0);
        filetime::set_file_mtime(&path, old).unwrap();

        trim(&path, 5).unwrap();
        let meta = fs::metadata(&path).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&meta), old);
        assert_eq!(count_lines(&fs::read(&path).unwrap()), 5);
    }

    #[cfg(unix)]
    #[test]
    fn test_permissions_are_preserved() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("laravel.log");
        fs::write(&path, numbered(30)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        trim(&path, 5).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }
}
