//! CLI error types and exit codes.

use dbdock_core::config::ConfigError;
use dbdock_core::layout::LayoutError;

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - settings, IO or other non-layout errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Layout failure - the script is invalid or the layout could not be
    /// built
    pub const LAYOUT_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Settings error
    #[error("Settings error: {0}")]
    Config(String),

    /// Script could not be read or interpreted
    #[error("Script error: {0}")]
    Script(String),

    /// Layout operation failed outside the command dispatcher
    #[error("Layout error: {0}")]
    Layout(String),

    /// Output could not be serialized
    #[error("Output error: {0}")]
    Output(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<LayoutError> for CliError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err.to_string())
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (settings, IO, output)
    /// - 2: Layout failure (bad script, unresolved placeholder)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Script(_) | Self::Layout(_) => exit_codes::LAYOUT_FAILURE,
            Self::Config(_) | Self::Output(_) | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
