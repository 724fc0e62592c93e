//! Error types for layout operations
//!
//! Every store operation validates before it mutates, so an `Err` from
//! any of them means the layout is unchanged.

use super::types::{PaneId, TabId, WorkspaceId};

/// Errors that can occur during layout operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// No layout has been initialized for the workspace.
    #[error("workspace not found: {0}")]
    WorkspaceNotFound(WorkspaceId),

    /// The specified pane was not found.
    #[error("pane not found: {0}")]
    PaneNotFound(PaneId),

    /// The pane exists but is a split, not a leaf.
    #[error("pane is not a leaf: {0}")]
    NotALeaf(PaneId),

    /// The pane exists but is a leaf, not a split.
    #[error("pane is not a split: {0}")]
    NotASplit(PaneId),

    /// The tab was not found in the given pane.
    #[error("tab {tab} not found in {pane}")]
    TabNotFound {
        /// Pane that was searched.
        pane: PaneId,
        /// Missing tab.
        tab: TabId,
    },

    /// The tab is not present anywhere in the workspace.
    #[error("tab not found in workspace: {0}")]
    UnknownTab(TabId),

    /// A tab index is outside the leaf's tab list.
    #[error("tab index {index} out of range (leaf has {len} tabs)")]
    TabIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of tabs in the leaf.
        len: usize,
    },

    /// Dropping a tab onto the center of the leaf it already belongs to.
    #[error("tab {0} dropped onto its own pane")]
    SameLeafDrop(TabId),

    /// Docking the only tab of a leaf onto an edge of that same leaf.
    #[error("cannot split {0} around its only tab")]
    SoleTabSelfSplit(PaneId),

    /// A tab title was empty after trimming.
    #[error("tab title must not be empty")]
    EmptyTitle,

    /// A split ratio that cannot be clamped (NaN or infinite).
    #[error("invalid split ratio: {0}")]
    InvalidRatio(f64),

    /// Resize bounds that do not form a range inside `(0, 1)`.
    #[error("invalid split ratio bounds: [{min}, {max}]")]
    InvalidRatioBounds {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// A drag transfer payload that does not parse.
    #[error("malformed drag payload: {0}")]
    MalformedPayload(String),
}

/// Failure classes of layout operations.
///
/// None of them is fatal: each one degrades to "operation skipped".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The operation referenced an id that is no longer present.
    InvalidTarget,
    /// The operation would produce a degenerate tree.
    DegenerateSplit,
    /// Drop data did not parse.
    MalformedPayload,
}

impl LayoutError {
    /// Returns the failure class of this error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::NotALeaf(_) | Self::NotASplit(_) | Self::SoleTabSelfSplit(_) => {
                ErrorClass::DegenerateSplit
            }
            Self::MalformedPayload(_) => ErrorClass::MalformedPayload,
            Self::WorkspaceNotFound(_)
            | Self::PaneNotFound(_)
            | Self::TabNotFound { .. }
            | Self::UnknownTab(_)
            | Self::TabIndexOutOfRange { .. }
            | Self::SameLeafDrop(_)
            | Self::EmptyTitle
            | Self::InvalidRatio(_)
            | Self::InvalidRatioBounds { .. } => ErrorClass::InvalidTarget,
        }
    }
}

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;
