use anyhow::{Context, Result};
use clap::Parser;

use logcleaner::cli::Cli;
use logcleaner::config::{Config, RetentionConfig};
use logcleaner::driver::Driver;
use logcleaner::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging BEFORE any tracing calls
    logging::init_logging(cli.verbose)?;

    let config = Config::load(cli.config.as_deref())?;
    let retention = RetentionConfig::resolve(&config, &cli.overrides())?;

    let driver = Driver::new(retention, cli.dry_run);
    tracing::info!(
        dry_run = driver.is_dry_run(),
        "Cleaning logs in {}",
        driver.config().log_path.display()
    );

    let report = driver.run().context("Log cleaning failed")?;

    print!("{}", report);
    Ok(())
}
