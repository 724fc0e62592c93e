//! Core type definitions for the pane layout engine
//!
//! This module contains the identifier types and small enums shared by
//! the pane tree, the drop zone resolver and the command layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a pane (leaf or split) within a workspace layout.
///
/// Ids are random and never reused, so a stale id held by a drag payload
/// can never resolve to a different pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaneId(pub Uuid);

impl PaneId {
    /// Creates a new random pane ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PaneId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pane({})", self.0)
    }
}

/// Unique identifier for a tab.
///
/// Tab ids are unique across every leaf of a workspace, so a tab keeps
/// its identity when it is dragged into another pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub Uuid);

impl TabId {
    /// Creates a new random tab ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tab({})", self.0)
    }
}

/// Identifier of a workspace, which is the id of the database connection
/// the workspace belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceId(pub String);

impl WorkspaceId {
    /// Creates a workspace ID from a connection id.
    #[must_use]
    pub fn new(connection_id: impl Into<String>) -> Self {
        Self(connection_id.into())
    }

    /// Returns the connection id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkspaceId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a terminal session owned by the terminal lifecycle service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerminalSessionId(pub Uuid);

impl TerminalSessionId {
    /// Creates a new random terminal session ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TerminalSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TerminalSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Terminal({})", self.0)
    }
}

/// Split direction for dividing a leaf into two panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitDirection {
    /// Children side by side: `first` on the left, `second` on the right.
    Horizontal,
    /// Children stacked: `first` on top, `second` at the bottom.
    Vertical,
}

impl fmt::Display for SplitDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "Horizontal"),
            Self::Vertical => write!(f, "Vertical"),
        }
    }
}

/// Docking zone of a drag-and-drop gesture over a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropZone {
    /// Dock to the left edge.
    Left,
    /// Dock to the right edge.
    Right,
    /// Dock to the top edge.
    Top,
    /// Dock to the bottom edge.
    Bottom,
    /// Join the pane's tab list.
    Center,
}

impl DropZone {
    /// All zones in classification order.
    pub const ALL: [Self; 5] = [Self::Left, Self::Right, Self::Top, Self::Bottom, Self::Center];

    /// Returns the split direction an edge zone produces, `None` for center.
    #[must_use]
    pub const fn split_direction(self) -> Option<SplitDirection> {
        match self {
            Self::Left | Self::Right => Some(SplitDirection::Horizontal),
            Self::Top | Self::Bottom => Some(SplitDirection::Vertical),
            Self::Center => None,
        }
    }

    /// Returns which side of the new split the dropped content lands on.
    ///
    /// `None` for center, which does not split.
    #[must_use]
    pub const fn placement(self) -> Option<SplitSide> {
        match self {
            Self::Left | Self::Top => Some(SplitSide::First),
            Self::Right | Self::Bottom => Some(SplitSide::Second),
            Self::Center => None,
        }
    }

    /// Returns true for the four edge zones.
    #[must_use]
    pub const fn is_edge(self) -> bool {
        !matches!(self, Self::Center)
    }
}

impl fmt::Display for DropZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Center => "center",
        };
        f.write_str(name)
    }
}

/// Child slot of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitSide {
    /// Left or top child.
    First,
    /// Right or bottom child.
    Second,
}
