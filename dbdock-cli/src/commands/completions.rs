//! Shell completion generation.
//!
//! The binary name comes from the clap definition, so completions keep
//! matching `dbdock-cli` if the command is renamed there.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::Cli;
use crate::error::CliError;

/// Completions command handler
pub fn cmd_completions(shell: Shell) -> Result<(), CliError> {
    write_completions(shell, &mut io::stdout().lock())
}

fn write_completions(shell: Shell, out: &mut impl Write) -> Result<(), CliError> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_owned();
    generate(shell, &mut cmd, bin_name, out);
    out.flush()?;
    Ok(())
}
