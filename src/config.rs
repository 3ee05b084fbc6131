//! Configuration management for the log cleaner
//!
//! `Config` is what lives in `config.toml`. `RetentionConfig` is the
//! validated, per-run view the driver works from, built by merging the file
//! with command-line overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CleanerError;
use crate::exclude::ExcludeList;

/// Environment variable that switches trimming on or off
pub const TRIMMING_ENABLED_ENV: &str = "LOGCLEANER_TRIMMING_ENABLED";

/// Environment variable that switches deletion of old files on or off
pub const DELETING_ENABLED_ENV: &str = "LOGCLEANER_DELETING_ENABLED";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the logs. `~` is expanded, relative paths are
    /// resolved against the directory containing the config file
    #[serde(default)]
    pub log_path: String,

    /// Enables trimming of big log files (default: true)
    #[serde(default = "default_enabled")]
    pub trimming_enabled: bool,

    /// Number of trailing lines every log keeps when trimmed (default: 20000)
    #[serde(default = "default_log_lines_to_keep")]
    pub log_lines_to_keep: usize,

    /// Enables deletion of old log files (default: true)
    #[serde(default = "default_enabled")]
    pub deleting_enabled: bool,

    /// Number of most recent log files kept per directory (default: 30)
    #[serde(default = "default_log_files_to_keep")]
    pub log_files_to_keep: usize,

    /// File names that are never trimmed or deleted. Wildcards are supported,
    /// e.g. `*.txt`
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Also clean every subdirectory of `log_path` (default: true)
    #[serde(default = "default_enabled")]
    pub process_subfolders: bool,

    /// Directory relative log paths are resolved against
    #[serde(skip)]
    pub app_root: Option<PathBuf>,
}

fn default_enabled() -> bool {
    true
}

fn default_log_lines_to_keep() -> usize {
    20_000
}

fn default_log_files_to_keep() -> usize {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: String::new(),
            trimming_enabled: default_enabled(),
            log_lines_to_keep: default_log_lines_to_keep(),
            deleting_enabled: default_enabled(),
            log_files_to_keep: default_log_files_to_keep(),
            exclude: Vec::new(),
            process_subfolders: default_enabled(),
            app_root: None,
        }
    }
}

impl Config {
    /// Load configuration and apply environment overrides
    ///
    /// An explicit path must exist. Without one, `~/.logcleaner/config.toml`
    /// is read if present, otherwise defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_file_path(), false),
        };

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let mut config = Self::from_toml(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            config.app_root = path.parent().map(Path::to_path_buf);
            config
        } else if required {
            anyhow::bail!("Config file {} does not exist", path.display());
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid configuration")
    }

    /// Apply `LOGCLEANER_*_ENABLED` from the process environment
    pub fn apply_env_overrides(&mut self) -> std::result::Result<(), CleanerError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply enable/disable switches from an arbitrary variable lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> std::result::Result<(), CleanerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(TRIMMING_ENABLED_ENV) {
            self.trimming_enabled = parse_bool(TRIMMING_ENABLED_ENV, &value)?;
        }
        if let Some(value) = lookup(DELETING_ENABLED_ENV) {
            self.deleting_enabled = parse_bool(DELETING_ENABLED_ENV, &value)?;
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> std::result::Result<bool, CleanerError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(CleanerError::config(format!(
            "{} must be true or false, got '{}'",
            key, value
        ))),
    }
}

/// Per-invocation values that win over the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub lines_to_keep: Option<usize>,
    pub files_to_keep: Option<usize>,
    pub log_path: Option<PathBuf>,
}

/// Effective thresholds for one run
#[derive(Debug, Clone)]
pub struct RetentionConfig {
    pub log_path: PathBuf,
    pub trimming_enabled: bool,
    pub lines_to_keep: usize,
    pub deleting_enabled: bool,
    pub files_to_keep: usize,
    pub exclude: ExcludeList,
    pub process_subfolders: bool,
}

impl RetentionConfig {
    /// Merge configuration with overrides and validate the result
    pub fn resolve(
        config: &Config,
        overrides: &Overrides,
    ) -> std::result::Result<Self, CleanerError> {
        let log_path = match &overrides.log_path {
            Some(path) => resolve_log_path(&path.to_string_lossy(), None)?,
            None => resolve_log_path(&config.log_path, config.app_root.as_deref())?,
        };

        if log_path.exists() && !log_path.is_dir() {
            return Err(CleanerError::config(format!(
                "log path {} is not a directory",
                log_path.display()
            )));
        }

        let lines_to_keep = overrides.lines_to_keep.unwrap_or(config.log_lines_to_keep);
        if lines_to_keep == 0 {
            return Err(CleanerError::config(
                "number of lines to keep must be greater than zero",
            ));
        }

        Ok(Self {
            log_path,
            trimming_enabled: config.trimming_enabled,
            lines_to_keep,
            deleting_enabled: config.deleting_enabled,
            files_to_keep: overrides.files_to_keep.unwrap_or(config.log_files_to_keep),
            exclude: ExcludeList::new(config.exclude.as_slice())?,
            process_subfolders: config.process_subfolders,
        })
    }
}

fn resolve_log_path(
    raw: &str,
    app_root: Option<&Path>,
) -> std::result::Result<PathBuf, CleanerError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CleanerError::config("log_path is not set"));
    }

    let expanded = PathBuf::from(shellexpand::tilde(raw).into_owned());
    if expanded.is_absolute() {
        return Ok(expanded);
    }

    let root = match app_root {
        Some(root) => root.to_path_buf(),
        None => std::env::current_dir().map_err(|e| {
            CleanerError::config(format!("cannot determine current directory: {}", e))
        })?,
    };
    Ok(root.join(expanded))
}

/// Get the base configuration directory (~/.logcleaner)
/// Falls back to ./.logcleaner if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".logcleaner"))
        .unwrap_or_else(|| {
            tracing::warn!("Could not determine home directory, using current directory for config");
            PathBuf::from(".logcleaner")
        })
}

/// Get the path to the default config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
