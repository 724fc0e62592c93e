//! Layout engine settings
//!
//! [`LayoutSettings`] is stored as TOML, by default in
//! `<config_dir>/dbdock/layout.toml`. Every field has a default, so a
//! partial file (or no file) is fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::{
    DEFAULT_SPLIT_RATIO, EdgeThreshold, MAX_SPLIT_RATIO, MIN_SPLIT_RATIO, TabKind,
};

/// File name of the settings file inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "layout.toml";

/// Errors that can occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the settings file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// File that was accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for [`LayoutSettings`].
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// Settings could not be serialized.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is outside its allowed range.
    #[error("invalid setting {field}: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The platform has no configuration directory.
    #[error("no configuration directory available")]
    NoConfigDir,
}

/// Result type for settings operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables of the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Fraction of a pane's width/height that counts as an edge when
    /// dropping onto its content area.
    pub content_edge_ratio: f64,
    /// Pixel band at either end of a tab strip that counts as an edge.
    pub tab_strip_edge_px: f64,
    /// Smallest ratio a resize may store.
    pub min_split_ratio: f64,
    /// Largest ratio a resize may store.
    pub max_split_ratio: f64,
    /// Ratio given to newly created splits.
    pub default_split_ratio: f64,
    /// Kind of tab opened by "open default tab".
    pub default_tab_kind: TabKind,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            content_edge_ratio: 0.25,
            tab_strip_edge_px: 24.0,
            min_split_ratio: MIN_SPLIT_RATIO,
            max_split_ratio: MAX_SPLIT_RATIO,
            default_split_ratio: DEFAULT_SPLIT_RATIO,
            default_tab_kind: TabKind::Data,
        }
    }
}

impl LayoutSettings {
    /// Returns the default settings file path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if the platform has no config dir.
    pub fn default_path() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("dbdock").join(SETTINGS_FILE_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Parses and validates settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not parse or a value is invalid.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from a file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No layout settings file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "Loaded layout settings");
        Ok(settings)
    }

    /// Writes settings to a file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or the file cannot be
    /// written.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;
        let text = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks every value against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        let open_unit = |field: &'static str, value: f64| {
            if value > 0.0 && value < 1.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is not between 0 and 1"),
                })
            }
        };
        open_unit("content_edge_ratio", self.content_edge_ratio)?;
        open_unit("min_split_ratio", self.min_split_ratio)?;
        open_unit("max_split_ratio", self.max_split_ratio)?;
        open_unit("default_split_ratio", self.default_split_ratio)?;

        if self.content_edge_ratio >= 0.5 {
            return Err(ConfigError::Invalid {
                field: "content_edge_ratio",
                reason: "edge bands would cover the whole pane".to_owned(),
            });
        }
        if !(self.tab_strip_edge_px.is_finite() && self.tab_strip_edge_px > 0.0) {
            return Err(ConfigError::Invalid {
                field: "tab_strip_edge_px",
                reason: format!("{} must be a positive pixel count", self.tab_strip_edge_px),
            });
        }
        if self.min_split_ratio >= self.max_split_ratio {
            return Err(ConfigError::Invalid {
                field: "min_split_ratio",
                reason: format!(
                    "{} must be below max_split_ratio {}",
                    self.min_split_ratio, self.max_split_ratio
                ),
            });
        }
        if !(self.min_split_ratio..=self.max_split_ratio).contains(&self.default_split_ratio) {
            return Err(ConfigError::Invalid {
                field: "default_split_ratio",
                reason: format!(
                    "{} is outside [{}, {}]",
                    self.default_split_ratio, self.min_split_ratio, self.max_split_ratio
                ),
            });
        }
        Ok(())
    }

    /// Threshold for drops onto a pane's content area.
    #[must_use]
    pub const fn content_threshold(&self) -> EdgeThreshold {
        EdgeThreshold::Fraction(self.content_edge_ratio)
    }

    /// Threshold for drops onto a tab strip.
    #[must_use]
    pub const fn tab_strip_threshold(&self) -> EdgeThreshold {
        EdgeThreshold::Pixels(self.tab_strip_edge_px)
    }
}
