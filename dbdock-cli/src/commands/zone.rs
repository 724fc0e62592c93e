//! Drop zone classification command.

use std::path::Path;

use dbdock_core::layout::{Point, Rect, resolve_zone};

use crate::error::CliError;
use crate::util::load_settings;

/// Zone command handler
pub fn cmd_zone(
    settings_path: Option<&Path>,
    width: f64,
    height: f64,
    x: f64,
    y: f64,
    tab_strip: bool,
) -> Result<(), CliError> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(CliError::Config(format!(
            "Target size must be positive, got {width}x{height}"
        )));
    }
    let settings = load_settings(settings_path)?;
    let threshold = if tab_strip {
        settings.tab_strip_threshold()
    } else {
        settings.content_threshold()
    };

    let zone = resolve_zone(&Rect::sized(width, height), Point::new(x, y), threshold);
    println!("{zone}");
    Ok(())
}
