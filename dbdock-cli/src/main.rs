//! `dbdock` CLI - Command-line driver for the dbdock layout engine
//!
//! Replays scripted layout commands against a fresh workspace, classifies
//! drop points and generates shell completions.

mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;
use cli::Cli;
use dbdock_core::tracing::{TracingConfig, TracingLevel, init_tracing};

fn main() {
    let cli = Cli::parse();

    let level = if cli.quiet {
        TracingLevel::Error
    } else {
        TracingLevel::default().louder(cli.verbose)
    };
    if let Err(e) = init_tracing(&TracingConfig::new().with_level(level)) {
        eprintln!("Warning: logging unavailable: {e}");
    }

    let result = commands::dispatch(cli.settings.as_deref(), cli.command);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
