//! Run orchestration
//!
//! One pass per invocation: discover, then per directory trim every log and
//! delete the excess ones, collecting a line per outcome. Per-file failures
//! are reported and the run moves on.

use crate::config::RetentionConfig;
use crate::delete::{delete, plan_delete};
use crate::discovery::{discover, DirectoryScope, LogFile};
use crate::error::Result;
use crate::report::RunReport;
use crate::retention::select;
use crate::trim::{plan_trim, trim};

/// Executes one cleaning run
#[derive(Debug, Clone)]
pub struct Driver {
    config: RetentionConfig,
    dry_run: bool,
}

impl Driver {
    pub fn new(config: RetentionConfig, dry_run: bool) -> Self {
        Self { config, dry_run }
    }

    pub fn config(&self) -> &RetentionConfig {
        &self.config
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Run all stages and return the report
    ///
    /// Only an unreadable log root fails the run. In dry-run mode the
    /// filesystem is only read.
    pub fn run(&self) -> Result<RunReport> {
        let mut report = RunReport::new(self.dry_run);

        if !self.config.exclude.is_empty() {
            tracing::debug!("Applying {} exclude patterns", self.config.exclude.len());
        }

        let discovery = discover(&self.config.log_path, &self.config)?;
        tracing::info!(
            "Found {} log files in {} directories under {}",
            discovery.file_count(),
            discovery.scopes.len(),
            self.config.log_path.display()
        );
        for failure in &discovery.failures {
            report.discovery_failed(failure);
        }

        if !self.config.deleting_enabled {
            tracing::info!("Deleting old log files is not enabled");
            report.deleting_skipped();
        }
        if !self.config.trimming_enabled {
            tracing::info!("Log trimming is not enabled");
            report.trimming_skipped();
        }

        for scope in &discovery.scopes {
            self.process_scope(scope, &mut report);
        }

        let summary = report.summary();
        tracing::info!(
            dry_run = self.dry_run,
            trimmed = summary.trimmed,
            unchanged = summary.unchanged,
            deleted = summary.deleted,
            not_found = summary.not_found,
            failed = summary.failed,
            "Log cleaning finished"
        );

        Ok(report)
    }

    fn process_scope(&self, scope: &DirectoryScope, report: &mut RunReport) {
        tracing::debug!(
            "Processing {} ({} log files)",
            scope.directory.display(),
            scope.files.len()
        );

        if self.config.trimming_enabled {
            for file in &scope.files {
                self.trim_file(file, report);
            }
        }

        if self.config.deleting_enabled {
            let selection = select(&scope.files, self.config.files_to_keep);
            for file in selection.keep {
                tracing::debug!(
                    "Keeping {} (modified {})",
                    file.path.display(),
                    file.modified_local().format("%Y-%m-%d %H:%M:%S")
                );
            }
            for file in selection.excess {
                self.delete_file(file, report);
            }
        }
    }

    fn trim_file(&self, file: &LogFile, report: &mut RunReport) {
        let lines = self.config.lines_to_keep;
        let result = if self.dry_run {
            plan_trim(&file.path, lines)
        } else {
            trim(&file.path, lines)
        };

        match result {
            Ok(outcome) => report.record_trim(&file.path, outcome),
            Err(e) => {
                tracing::warn!("Failed to trim {}: {}", file.path.display(), e);
                report.trim_failed(&file.path, &e);
            }
        }
    }

    fn delete_file(&self, file: &LogFile, report: &mut RunReport) {
        let result = if self.dry_run {
            plan_delete(&file.path)
        } else {
            delete(&file.path)
        };

        match result {
            Ok(outcome) => report.record_delete(&file.path, outcome),
            Err(e) => {
                tracing::warn!("Failed to delete {}: {}", file.path.display(), e);
                report.delete_failed(&file.path, &e);
            }
        }
    }
}
