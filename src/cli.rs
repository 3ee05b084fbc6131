//! Command-line interface

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::config::Overrides;

#[derive(Debug, Parser)]
#[command(
    name = "logcleaner",
    about = "Removes and truncates old logs, directory by directory",
    version
)]
pub struct Cli {
    /// Run without actually cleaning any logs
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// The number of lines to keep when trimming log files
    #[arg(long, value_name = "LINES")]
    pub keeplines: Option<usize>,

    /// The number of log files to keep when deleting old log files
    #[arg(long, value_name = "FILES")]
    pub keepfiles: Option<usize>,

    /// Config file (default: ~/.logcleaner/config.toml)
    #[arg(short, long, value_name = "PATH", env = "LOGCLEANER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Clean this directory instead of the configured log_path
    #[arg(long, value_name = "DIR")]
    pub log_path: Option<PathBuf>,

    /// Print progress to stderr (-vv for per-file detail)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Values from this invocation that win over the config file
    pub fn overrides(&self) -> Overrides {
        Overrides {
            lines_to_keep: self.keeplines,
            files_to_keep: self.keepfiles,
            log_path: self.log_path.clone(),
        }
    }
}
