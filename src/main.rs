//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `getpages` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Mapping the run result to the process exit status
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use getpages::app::log_summary;
use getpages::initialization::init_logger_with;
use getpages::{run, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from(Opt::parse());

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let report = match run(&config).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("getpages error: {:#}", e);
            process::exit(1);
        }
    };

    if config.summary {
        log_summary(report.sink.stats(), report.elapsed);
    }

    if let Err(e) = &report.source_result {
        log::error!("Exit: {}", e);
    }
    let code = report.exit_code();
    if code != 0 {
        process::exit(code);
    }
    Ok(())
}
