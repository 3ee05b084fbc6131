//! Logcleaner - keeps log directories from growing unbounded
//!
//! Trims big log files to their most recent lines and deletes all but the
//! most recent log files in every directory.

pub mod cli;
pub mod config;
pub mod delete;
pub mod discovery;
pub mod driver;
pub mod error;
pub mod exclude;
pub mod logging;
pub mod report;
pub mod retention;
pub mod trim;

pub use config::{Config, Overrides, RetentionConfig};
pub use driver::Driver;
pub use error::CleanerError;
pub use report::RunReport;
