//! Drag and resize interaction state
//!
//! Gestures are modeled as short-lived sessions held by the UI, outside the
//! store. Hovering only recomputes a zone; nothing reaches the store until a
//! drop (which yields a [`LayoutCommand`]) or a resize pointer move (which
//! yields a ratio for [`LayoutStore::resize_pane`]).
//!
//! ```text
//! drag start ──► hover* ──► drop ──► Some(MoveTabToPane) ──► LayoutStore::apply
//!                    │          └──► None (invalid drop, nothing happens)
//!                    └──► cancel
//! ```
//!
//! [`LayoutStore::resize_pane`]: super::LayoutStore::resize_pane

use serde::{Deserialize, Serialize};

use crate::config::LayoutSettings;

use super::command::LayoutCommand;
use super::error::{LayoutError, LayoutResult};
use super::pane::{DEFAULT_SPLIT_RATIO, MAX_SPLIT_RATIO, MIN_SPLIT_RATIO};
use super::types::{DropZone, PaneId, SplitDirection, TabId};
use super::zone::{EdgeThreshold, Point, Rect, resolve_zone};

/// Data carried by a tab drag between components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    /// Dragged tab.
    pub tab_id: TabId,
    /// Leaf the tab was dragged from.
    pub from_pane_id: PaneId,
}

impl DragPayload {
    /// Creates a payload.
    #[must_use]
    pub const fn new(tab_id: TabId, from_pane_id: PaneId) -> Self {
        Self {
            tab_id,
            from_pane_id,
        }
    }

    /// Serializes the payload as the JSON transfer string.
    ///
    /// # Errors
    ///
    /// `MalformedPayload` if serialization fails.
    pub fn encode(&self) -> LayoutResult<String> {
        serde_json::to_string(self).map_err(|e| LayoutError::MalformedPayload(e.to_string()))
    }

    /// Parses a transfer string.
    ///
    /// # Errors
    ///
    /// `MalformedPayload` if the string is not a `{tabId, fromPaneId}`
    /// record with UUID values.
    pub fn parse(raw: &str) -> LayoutResult<Self> {
        serde_json::from_str(raw).map_err(|e| LayoutError::MalformedPayload(e.to_string()))
    }
}

/// Which part of a pane the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropSurface {
    /// The pane's content area.
    #[default]
    Content,
    /// The empty part of the pane's tab strip.
    TabStrip,
}

/// A pane region that can receive a drop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropTarget {
    /// Leaf under the pointer.
    pub pane_id: PaneId,
    /// Bounds of the surface.
    pub bounds: Rect,
    /// Surface kind, which selects the edge threshold.
    pub surface: DropSurface,
}

impl DropTarget {
    /// Creates a content-area target.
    #[must_use]
    pub const fn content(pane_id: PaneId, bounds: Rect) -> Self {
        Self {
            pane_id,
            bounds,
            surface: DropSurface::Content,
        }
    }

    /// Creates a tab-strip target.
    #[must_use]
    pub const fn tab_strip(pane_id: PaneId, bounds: Rect) -> Self {
        Self {
            pane_id,
            bounds,
            surface: DropSurface::TabStrip,
        }
    }

    /// Returns the edge threshold for this surface.
    #[must_use]
    pub const fn threshold(&self, settings: &LayoutSettings) -> EdgeThreshold {
        match self.surface {
            DropSurface::Content => settings.content_threshold(),
            DropSurface::TabStrip => settings.tab_strip_threshold(),
        }
    }
}

/// An in-progress tab drag.
#[derive(Debug, Clone)]
pub struct DragSession {
    payload: DragPayload,
    settings: LayoutSettings,
    hovered: Option<(PaneId, DropZone)>,
}

impl DragSession {
    /// Starts a drag from a transfer string.
    ///
    /// # Errors
    ///
    /// `MalformedPayload` if the string does not parse.
    pub fn start(raw: &str, settings: &LayoutSettings) -> LayoutResult<Self> {
        let payload = DragPayload::parse(raw)?;
        tracing::trace!(tab_id = %payload.tab_id, pane_id = %payload.from_pane_id, "Drag started");
        Ok(Self::from_payload(payload, settings))
    }

    /// Starts a drag from an already decoded payload.
    #[must_use]
    pub fn from_payload(payload: DragPayload, settings: &LayoutSettings) -> Self {
        Self {
            payload,
            settings: settings.clone(),
            hovered: None,
        }
    }

    /// Returns the dragged payload.
    #[must_use]
    pub const fn payload(&self) -> DragPayload {
        self.payload
    }

    /// Returns the target and zone of the last valid hover.
    #[must_use]
    pub const fn hovered(&self) -> Option<(PaneId, DropZone)> {
        self.hovered
    }

    /// Updates the hovered zone. Pure with respect to the layout.
    ///
    /// Returns `None` (no indicator) when the pointer is outside the target
    /// or the drop would be rejected.
    pub fn hover(&mut self, target: &DropTarget, pointer: Point) -> Option<DropZone> {
        self.hovered = self.classify(target, pointer).map(|zone| (target.pane_id, zone));
        self.hovered.map(|(_, zone)| zone)
    }

    /// Ends the drag over a target.
    ///
    /// Returns the command to apply, or `None` for an invalid drop.
    #[must_use]
    pub fn drop(self, target: &DropTarget, pointer: Point) -> Option<LayoutCommand> {
        let Some(zone) = self.classify(target, pointer) else {
            tracing::debug!(
                tab_id = %self.payload.tab_id,
                pane_id = %target.pane_id,
                "Drop ignored"
            );
            return None;
        };
        Some(LayoutCommand::MoveTabToPane {
            from_pane_id: self.payload.from_pane_id,
            tab_id: self.payload.tab_id,
            to_pane_id: target.pane_id,
            zone,
        })
    }

    /// Abandons the drag.
    pub fn cancel(self) {
        tracing::trace!(tab_id = %self.payload.tab_id, "Drag cancelled");
    }

    fn classify(&self, target: &DropTarget, pointer: Point) -> Option<DropZone> {
        if !target.bounds.contains(pointer) {
            return None;
        }
        let zone = resolve_zone(&target.bounds, pointer, target.threshold(&self.settings));
        let same_leaf = target.pane_id == self.payload.from_pane_id;
        (!(same_leaf && zone == DropZone::Center)).then_some(zone)
    }
}

/// An in-progress drag of a split divider.
#[derive(Debug, Clone)]
pub struct ResizeSession {
    split_id: PaneId,
    direction: SplitDirection,
    bounds: Rect,
    min: f64,
    max: f64,
    last_ratio: Option<f64>,
}

impl ResizeSession {
    /// Starts a resize of `split_id`, whose area is `bounds`.
    ///
    /// Settings that fail validation fall back to the built-in ratio range.
    #[must_use]
    pub fn begin(split_id: PaneId, direction: SplitDirection, bounds: Rect, settings: &LayoutSettings) -> Self {
        let (min, max) = match settings.validate() {
            Ok(()) => (settings.min_split_ratio, settings.max_split_ratio),
            Err(error) => {
                tracing::warn!(%error, "Invalid resize settings, using built-in ratio range");
                (MIN_SPLIT_RATIO, MAX_SPLIT_RATIO)
            }
        };
        Self {
            split_id,
            direction,
            bounds,
            min,
            max,
            last_ratio: None,
        }
    }

    /// Returns the split being resized.
    #[must_use]
    pub const fn split_id(&self) -> PaneId {
        self.split_id
    }

    /// Converts a pointer position into a clamped ratio.
    ///
    /// Every call fully determines the new ratio; callers write it with
    /// [`LayoutStore::resize_pane`](super::LayoutStore::resize_pane)
    /// right away.
    pub fn pointer_moved(&mut self, pointer: Point) -> f64 {
        let (offset, extent) = match self.direction {
            SplitDirection::Horizontal => (pointer.x - self.bounds.x, self.bounds.width),
            SplitDirection::Vertical => (pointer.y - self.bounds.y, self.bounds.height),
        };
        let ratio = if extent > 0.0 && offset.is_finite() {
            (offset / extent).clamp(self.min, self.max)
        } else {
            self.last_ratio.unwrap_or(DEFAULT_SPLIT_RATIO)
        };
        self.last_ratio = Some(ratio);
        ratio
    }

    /// Returns the command writing the last computed ratio.
    #[must_use]
    pub fn command(&self) -> Option<LayoutCommand> {
        self.last_ratio.map(|ratio| LayoutCommand::ResizePane {
            split_id: self.split_id,
            ratio,
        })
    }

    /// Ends the resize on pointer-up. Returns the last ratio, if the
    /// pointer moved at all.
    #[must_use]
    pub fn finish(self) -> Option<f64> {
        self.last_ratio
    }
}
