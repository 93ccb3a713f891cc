//! Roster CLI Binary
//!
//! Command-line interface for the student roster.

use anyhow::Context;
use clap::Parser;
use roster::logging::init_logging;
use roster::tooling::cli::{Cli, CliContext};
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let base_dir = std::env::current_dir().context("Failed to read current directory")?;
    let config = CliContext::load_config(cli.config.as_deref(), &base_dir)?;

    let logging = config.logging.clone().with_overrides(
        cli.log_level.as_deref(),
        cli.log_format.as_deref(),
        cli.log_output.as_deref(),
        cli.log_file.clone(),
    );
    // Logging problems must not block the command itself.
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Warning: {}", e);
    }

    let context = CliContext::new(&config, cli.data_file.as_deref(), &base_dir)?;
    Ok(context.execute(&cli.command)?)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
