//! Error types for the cleaner core
//!
//! A vanished file is not an error here: trim and delete report it as a
//! `NotFound` outcome instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures the cleaner can hit while processing a log directory
#[derive(Debug, Error)]
pub enum CleanerError {
    /// Missing or invalid settings; fatal for the run, nothing is mutated
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A directory listing could not be read
    #[error("could not read directory {}: {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading, writing or removing a single file failed
    #[error("could not access {}: {source}", path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CleanerError {
    pub fn config(msg: impl Into<String>) -> Self {
        CleanerError::Configuration(msg.into())
    }

    pub fn access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CleanerError::Access {
            path: path.into(),
            source,
        }
    }

    pub fn discovery(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CleanerError::Discovery {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CleanerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_error_names_path() {
        let err = CleanerError::access(
            "/var/log/app/laravel.log",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/var/log/app/laravel.log"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_configuration_error_message() {
        let err = CleanerError::config("log_path is empty");
        assert_eq!(err.to_string(), "invalid configuration: log_path is empty");
    }
}
