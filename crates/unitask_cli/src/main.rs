//! UniTask command-line renderer.
//!
//! # Responsibility
//! - Parse arguments, start rolling logs, and drive one `UniTaskApp` session.
//! - Render core view models as plain text.

use anyhow::Result;
use clap::Parser;

mod commands;
mod render;

use commands::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging failure is not fatal for the CLI.
    match cli.resolved_log_dir() {
        Ok(log_dir) => {
            if let Err(err) = unitask_core::init_logging(cli.log_level(), &log_dir) {
                eprintln!("warning: logging disabled: {err}");
            }
        }
        Err(err) => eprintln!("warning: logging disabled: {err:#}"),
    }

    cli.execute()
}
