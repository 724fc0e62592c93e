//! Command handler modules for the CLI.

mod completions;
mod replay;
mod zone;

use std::path::Path;

use crate::cli::Commands;
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(settings_path: Option<&Path>, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Replay {
            script,
            workspace,
            format,
            default_tab,
        } => replay::cmd_replay(
            settings_path,
            replay::ReplayParams {
                script: &script,
                workspace: &workspace,
                format,
                default_tab,
            },
        ),
        Commands::Zone {
            width,
            height,
            x,
            y,
            tab_strip,
        } => zone::cmd_zone(settings_path, width, height, x, y, tab_strip),
        Commands::Completions { shell } => completions::cmd_completions(shell),
    }
}
