//! Configuration management for dbdock
//!
//! Layout tunables are loaded from and saved to TOML files.

pub mod settings;

pub use settings::{ConfigError, ConfigResult, LayoutSettings, SETTINGS_FILE_NAME};
