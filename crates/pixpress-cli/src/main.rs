//! Main entry point for the pixpress CLI application.
//!
//! `pixpress optimize` shrinks images in place under a size budget and
//! `pixpress extract` copies rendered previews out of `.sketch` files.
//! Status lines go to stdout; diagnostics go to stderr through `tracing`.

use std::io;

use anyhow::{anyhow, Result};
use clap::Parser;
use pixpress_core::ReduceOptions;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod report;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.default_log_filter())?;
    tracing::debug!(?cli, "parsed arguments");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Optimize { path, max_size_kb } => {
            commands::optimize(&mut out, path, &ReduceOptions::new(*max_size_kb))?;
        }
        Command::Extract { sketch, output_dir } => {
            commands::extract(&mut out, sketch, output_dir.as_deref())?;
        }
    }

    Ok(())
}

/// Install the stderr log formatter. `RUST_LOG` takes precedence over the
/// verbosity flags.
fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}
