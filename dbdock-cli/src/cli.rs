//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// `dbdock` command-line interface for the pane and tab layout engine
#[derive(Parser)]
#[command(name = "dbdock-cli")]
#[command(author, version, about = "dbdock layout engine command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a layout settings file (defaults to the user config dir)
    #[arg(short, long, global = true, env = "DBDOCK_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Replay a script of layout commands
    #[command(about = "Apply a JSON array of layout commands to a fresh workspace")]
    Replay {
        /// Script file (JSON array of commands)
        script: PathBuf,

        /// Workspace (connection) id to replay into
        #[arg(short, long, default_value = "default")]
        workspace: String,

        /// Output format for the final layout
        #[arg(short, long, default_value = "text", value_enum)]
        format: OutputFormat,

        /// Open a default tab in the root before replaying
        #[arg(long)]
        default_tab: bool,
    },

    /// Classify a pointer position into a drop zone
    #[command(about = "Print the drop zone for a point over a pane")]
    Zone {
        /// Target width in pixels
        #[arg(long)]
        width: f64,

        /// Target height in pixels
        #[arg(long)]
        height: f64,

        /// Pointer x, relative to the target's left edge
        #[arg(short, long, allow_negative_numbers = true)]
        x: f64,

        /// Pointer y, relative to the target's top edge
        #[arg(short, long, allow_negative_numbers = true)]
        y: f64,

        /// Use the tab-strip pixel band instead of the content threshold
        #[arg(long)]
        tab_strip: bool,
    },

    /// Generate shell completions
    #[command(about = "Generate shell completions for bash, zsh, fish, etc.")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Output format for the replayed layout
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Indented tree
    Text,
    /// JSON summary
    Json,
}
