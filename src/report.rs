//! Human-readable run report
//!
//! Collects one line per file outcome. Dry-run lines read "would be ..."
//! where a real run says what was done.

use std::fmt;
use std::path::Path;

use crate::delete::DeleteOutcome;
use crate::error::CleanerError;
use crate::trim::TrimOutcome;

pub const DRY_RUN_NOTICE: &str = "This is a dry-run. We are not deleting or truncating any actual logs.";
pub const DELETING_HEADER: &str = "Deleting old log files...";
pub const TRIMMING_HEADER: &str = "Trimming log files...";
pub const DELETING_SKIPPED: &str = "Skipping deleting old log files.";
pub const TRIMMING_SKIPPED: &str = "Skipping trimming.";

/// Counters for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub trimmed: usize,
    pub unchanged: usize,
    pub deleted: usize,
    pub not_found: usize,
    pub failed: usize,
}

/// Outcome lines of one invocation, grouped by stage
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    dry_run: bool,
    deletion: Vec<String>,
    trimming: Vec<String>,
    summary: RunSummary,
}

impl RunReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn deletion_lines(&self) -> &[String] {
        &self.deletion
    }

    pub fn trimming_lines(&self) -> &[String] {
        &self.trimming
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn deleting_skipped(&mut self) {
        self.deletion.push(DELETING_SKIPPED.to_string());
    }

    pub fn trimming_skipped(&mut self) {
        self.trimming.push(TRIMMING_SKIPPED.to_string());
    }

    pub fn record_delete(&mut self, path: &Path, outcome: DeleteOutcome) {
        let name = display_name(path);
        let line = match outcome {
            DeleteOutcome::Deleted => {
                self.summary.deleted += 1;
                if self.dry_run {
                    format!("{} would be deleted", name)
                } else {
                    format!("Deleted {}.", name)
                }
            }
            DeleteOutcome::NotFound => {
                self.summary.not_found += 1;
                not_found_line(&name)
            }
        };
        self.deletion.push(line);
    }

    pub fn record_trim(&mut self, path: &Path, outcome: TrimOutcome) {
        let name = display_name(path);
        let line = match outcome {
            TrimOutcome::Trimmed { lines_kept, .. } => {
                self.summary.trimmed += 1;
                if self.dry_run {
                    format!("{} would be trimmed to {} lines.", name, lines_kept)
                } else {
                    format!("{} was trimmed to {} lines.", name, lines_kept)
                }
            }
            TrimOutcome::Unchanged { lines } => {
                self.summary.unchanged += 1;
                format!("{} has {} lines, nothing to trim.", name, lines)
            }
            TrimOutcome::NotFound => {
                self.summary.not_found += 1;
                not_found_line(&name)
            }
        };
        self.trimming.push(line);
    }

    pub fn delete_failed(&mut self, path: &Path, err: &CleanerError) {
        self.summary.failed += 1;
        self.deletion
            .push(format!("Failed to delete {}: {}", display_name(path), err));
    }

    pub fn trim_failed(&mut self, path: &Path, err: &CleanerError) {
        self.summary.failed += 1;
        self.trimming
            .push(format!("Failed to trim {}: {}", display_name(path), err));
    }

    /// Part of the tree could not be scanned; noted under both stages
    pub fn discovery_failed(&mut self, err: &CleanerError) {
        self.summary.failed += 1;
        let line = format!("Skipped: {}", err);
        self.deletion.push(line.clone());
        self.trimming.push(line);
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn not_found_line(name: &str) -> String {
    format!("File {} could not be found", name)
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dry_run {
            writeln!(f, "{}", DRY_RUN_NOTICE)?;
        }

        writeln!(f, "{}", DELETING_HEADER)?;
        for line in &self.deletion {
            writeln!(f, "{}", line)?;
        }

        writeln!(f, "{}", TRIMMING_HEADER)?;
        for line in &self.trimming {
            writeln!(f, "{}", line)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_real_and_dry_run_wording_differ() {
        let path = PathBuf::from("/logs/laravel.log");

        let mut real = RunReport::new(false);
        real.record_delete(&path, DeleteOutcome::Deleted);
        real.record_trim(
            &path,
            TrimOutcome::Trimmed {
                lines_before: 30,
                lines_kept: 20,
            },
        );
        assert_eq!(real.deletion_lines(), ["Deleted laravel.log."]);
        assert_eq!(real.trimming_lines(), ["laravel.log was trimmed to 20 lines."]);

        let mut dry = RunReport::new(true);
        dry.record_delete(&path, DeleteOutcome::Deleted);
        dry.record_trim(
            &path,
            TrimOutcome::Trimmed {
                lines_before: 30,
                lines_kept: 20,
            },
        );
        assert_eq!(dry.deletion_lines(), ["laravel.log would be deleted"]);
        assert_eq!(dry.trimming_lines(), ["laravel.log would be trimmed to 20 lines."]);
    }

    #[test]
    fn test_not_found_line() {
        let mut report = RunReport::new(false);
        report.record_delete(Path::new("/logs/gone.log"), DeleteOutcome::NotFound);
        assert_eq!(report.deletion_lines(), ["File gone.log could not be found"]);
        assert_eq!(report.summary().not_found, 1);
    }

    #[test]
    fn test_display_orders_deletion_before_trimming() {
        let mut report = RunReport::new(true);
        report.trimming_skipped();
        report.record_delete(Path::new("/logs/a.log"), DeleteOutcome::Deleted);

        let text = report.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                DRY_RUN_NOTICE,
                DELETING_HEADER,
                "a.log would be deleted",
                TRIMMING_HEADER,
                TRIMMING_SKIPPED,
            ]
        );
    }

    #[test]
    fn test_summary_counts() {
        let mut report = RunReport::new(false);
        let path = Path::new("/logs/a.log");
        report.record_trim(path, TrimOutcome::Unchanged { lines: 3 });
        report.record_delete(path, DeleteOutcome::Deleted);
        report.trim_failed(path, &CleanerError::config("boom"));

        assert_eq!(
            report.summary(),
            RunSummary {
                trimmed: 0,
                unchanged: 1,
                deleted: 1,
                not_found: 0,
                failed: 1,
            }
        );
    }
}
