//! Drop zone classification for docking drags
//!
//! A pure geometry function: given a drop target's bounds, a pointer
//! position and an edge threshold, pick one of the five docking zones.
//! Nothing here touches a layout, so hover feedback can call it on every
//! pointer move.

use serde::{Deserialize, Serialize};

use super::types::DropZone;

/// Axis-aligned rectangle in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

/// Pointer position in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Rect {
    /// Creates a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at the origin.
    #[must_use]
    pub const fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Returns true if the point lies inside the rectangle (edges included).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Returns the point relative to the rectangle's origin.
    #[must_use]
    pub fn relative(&self, point: Point) -> Point {
        Point::new(point.x - self.x, point.y - self.y)
    }
}

/// Width of the edge bands that map to docking zones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum EdgeThreshold {
    /// Fraction of the target's width (left/right) and height (top/bottom).
    Fraction(f64),
    /// Fixed band in pixels at the left and right ends only, used for thin
    /// horizontal targets such as the tab strip. Top and bottom are reached
    /// only by a pointer outside the target.
    Pixels(f64),
}

impl EdgeThreshold {
    /// Quadrant threshold used for pane content areas.
    pub const CONTENT: Self = Self::Fraction(0.25);

    /// Returns the horizontal and vertical band sizes for a target.
    #[must_use]
    pub fn bands(self, bounds: &Rect) -> (f64, f64) {
        match self {
            Self::Fraction(ratio) => (bounds.width * ratio, bounds.height * ratio),
            Self::Pixels(px) => (px, 0.0),
        }
    }
}

impl Default for EdgeThreshold {
    fn default() -> Self {
        Self::CONTENT
    }
}

/// Classifies a pointer position over a drop target.
///
/// Bands are checked in a fixed order: left, right, top, bottom, then
/// center. Corners therefore resolve horizontally. Bands are strict
/// (`x < band` is left, `x > width - band` is right), so a point exactly
/// on a band edge belongs to the inner zone.
///
/// The pointer is not required to be inside `bounds`; a point beyond an
/// edge classifies as that edge.
///
/// # Arguments
/// * `bounds` - Target rectangle
/// * `pointer` - Pointer position, same coordinate space as `bounds`
/// * `threshold` - Edge band width
///
/// # Returns
/// The docking zone under the pointer
#[must_use]
pub fn resolve_zone(bounds: &Rect, pointer: Point, threshold: EdgeThreshold) -> DropZone {
    let (band_x, band_y) = threshold.bands(bounds);
    let Point { x, y } = bounds.relative(pointer);

    if x < band_x {
        DropZone::Left
    } else if x > bounds.width - band_x {
        DropZone::Right
    } else if y < band_y {
        DropZone::Top
    } else if y > bounds.height - band_y {
        DropZone::Bottom
    } else {
        DropZone::Center
    }
}
