//! Shared utility functions used across command modules.

use std::path::Path;

use dbdock_core::config::{ConfigError, LayoutSettings};
use dbdock_core::tracing::span_names;

use crate::error::CliError;

/// Loads layout settings from the `--settings` file or the default
/// location. A missing file yields the defaults.
pub fn load_settings(settings_path: Option<&Path>) -> Result<LayoutSettings, CliError> {
    let _span = dbdock_core::trace_operation_debug!(span_names::CONFIG_LOAD).entered();
    let settings = match settings_path {
        Some(path) => LayoutSettings::load(path)?,
        None => match LayoutSettings::default_path() {
            Ok(path) => LayoutSettings::load(&path)?,
            Err(ConfigError::NoConfigDir) => LayoutSettings::default(),
            Err(e) => return Err(e.into()),
        },
    };
    Ok(settings)
}

/// Parses a `$name` or `$name:<n>` placeholder into its name and index.
pub fn parse_placeholder(s: &str) -> Option<(&str, Option<usize>)> {
    let body = s.strip_prefix('$')?;
    match body.split_once(':') {
        Some((name, index)) => index.parse().ok().map(|n| (name, Some(n))),
        None => Some((body, None)),
    }
}
