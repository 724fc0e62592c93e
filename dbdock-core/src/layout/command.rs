//! Serializable layout commands
//!
//! UI gestures and replay scripts both end up as a [`LayoutCommand`].
//! [`LayoutStore::apply`] runs one and turns every failure into
//! [`CommandOutcome::Skipped`], which is how stale drags and other invalid
//! targets "fail silently" without callers handling errors.

use serde::{Deserialize, Serialize};

use super::error::{LayoutError, LayoutResult};
use super::store::LayoutStore;
use super::tab::{TabInit, TabKind, TabPatch, TabPayload};
use super::types::{DropZone, PaneId, SplitDirection, TabId, WorkspaceId};

/// One layout mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LayoutCommand {
    /// Create a tab in a leaf.
    CreateTab {
        /// Target leaf.
        pane_id: PaneId,
        /// Content kind.
        kind: TabKind,
        /// Title, defaults to the registry's title.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Payload, defaults to none.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payload: Option<TabPayload>,
    },
    /// Open a tab of the configured default kind.
    OpenDefaultTab {
        /// Target leaf.
        pane_id: PaneId,
    },
    /// Close a tab.
    CloseTab {
        /// Hosting leaf.
        pane_id: PaneId,
        /// Tab to close.
        tab_id: TabId,
    },
    /// Merge title/payload into a tab.
    UpdateTab {
        /// Hosting leaf.
        pane_id: PaneId,
        /// Tab to update.
        tab_id: TabId,
        /// New title.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// New payload.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payload: Option<TabPayload>,
    },
    /// Rename a tab.
    RenameTab {
        /// Hosting leaf.
        pane_id: PaneId,
        /// Tab to rename.
        tab_id: TabId,
        /// New title.
        title: String,
    },
    /// Duplicate a tab next to the original.
    DuplicateTab {
        /// Hosting leaf.
        pane_id: PaneId,
        /// Tab to copy.
        tab_id: TabId,
    },
    /// Move a tab within its leaf.
    ReorderTabs {
        /// Hosting leaf.
        pane_id: PaneId,
        /// Current index.
        from_index: usize,
        /// New index.
        to_index: usize,
    },
    /// Select a tab in a leaf.
    SetActiveTab {
        /// Hosting leaf.
        pane_id: PaneId,
        /// Tab to select.
        tab_id: TabId,
    },
    /// Focus a leaf.
    SetActivePane {
        /// Leaf to focus.
        pane_id: PaneId,
    },
    /// Select a tab and focus its leaf.
    FocusTab {
        /// Tab to focus.
        tab_id: TabId,
    },
    /// Split a leaf.
    SplitPane {
        /// Leaf to split.
        pane_id: PaneId,
        /// Split axis.
        direction: SplitDirection,
        /// Tab to move into the new leaf.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tab_id: Option<TabId>,
    },
    /// Move a tab into a leaf or dock it to a leaf's edge.
    MoveTabToPane {
        /// Source leaf.
        from_pane_id: PaneId,
        /// Tab being moved.
        tab_id: TabId,
        /// Target leaf.
        to_pane_id: PaneId,
        /// Docking zone.
        zone: DropZone,
    },
    /// Change a split's ratio.
    ResizePane {
        /// Split to resize.
        split_id: PaneId,
        /// Requested ratio, clamped on write.
        ratio: f64,
    },
    /// Close every tab of a leaf.
    ClosePane {
        /// Leaf to close.
        pane_id: PaneId,
    },
}

impl LayoutCommand {
    /// Returns the snake_case operation name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateTab { .. } => "create_tab",
            Self::OpenDefaultTab { .. } => "open_default_tab",
            Self::CloseTab { .. } => "close_tab",
            Self::UpdateTab { .. } => "update_tab",
            Self::RenameTab { .. } => "rename_tab",
            Self::DuplicateTab { .. } => "duplicate_tab",
            Self::ReorderTabs { .. } => "reorder_tabs",
            Self::SetActiveTab { .. } => "set_active_tab",
            Self::SetActivePane { .. } => "set_active_pane",
            Self::FocusTab { .. } => "focus_tab",
            Self::SplitPane { .. } => "split_pane",
            Self::MoveTabToPane { .. } => "move_tab_to_pane",
            Self::ResizePane { .. } => "resize_pane",
            Self::ClosePane { .. } => "close_pane",
        }
    }
}

/// Result of applying a command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// The layout changed (or, for selection commands, was re-selected).
    Applied {
        /// Tab created by the command, if it created one.
        created_tab: Option<TabId>,
    },
    /// The command was rejected and the layout is unchanged.
    Skipped {
        /// Why it was rejected.
        reason: LayoutError,
    },
}

impl CommandOutcome {
    /// Returns true if the command was applied.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    const fn applied() -> Self {
        Self::Applied { created_tab: None }
    }
}

impl LayoutStore {
    /// Runs a command against a workspace.
    ///
    /// Failures are logged at debug level and reported as
    /// [`CommandOutcome::Skipped`]; they never change the layout.
    pub fn apply(&mut self, workspace: &WorkspaceId, command: LayoutCommand) -> CommandOutcome {
        let name = command.name();
        match self.dispatch(workspace, command) {
            Ok(outcome) => {
                tracing::trace!(workspace_id = %workspace, op = name, "Applied command");
                outcome
            }
            Err(reason) => {
                tracing::debug!(
                    workspace_id = %workspace,
                    op = name,
                    class = ?reason.class(),
                    error = %reason,
                    "Skipped command"
                );
                CommandOutcome::Skipped { reason }
            }
        }
    }

    fn dispatch(&mut self, ws: &WorkspaceId, command: LayoutCommand) -> LayoutResult<CommandOutcome> {
        let created = |tab_id| CommandOutcome::Applied {
            created_tab: Some(tab_id),
        };
        match command {
            LayoutCommand::CreateTab {
                pane_id,
                kind,
                title,
                payload,
            } => self
                .create_tab(ws, pane_id, kind, TabInit { title, payload })
                .map(created),
            LayoutCommand::OpenDefaultTab { pane_id } => self.open_default_tab(ws, pane_id).map(created),
            LayoutCommand::CloseTab { pane_id, tab_id } => self
                .close_tab(ws, pane_id, tab_id)
                .map(|_| CommandOutcome::applied()),
            LayoutCommand::UpdateTab {
                pane_id,
                tab_id,
                title,
                payload,
            } => self
                .update_tab(ws, pane_id, tab_id, TabPatch { title, payload })
                .map(|()| CommandOutcome::applied()),
            LayoutCommand::RenameTab {
                pane_id,
                tab_id,
                title,
            } => self
                .rename_tab(ws, pane_id, tab_id, &title)
                .map(|()| CommandOutcome::applied()),
            LayoutCommand::DuplicateTab { pane_id, tab_id } => {
                self.duplicate_tab(ws, pane_id, tab_id).map(created)
            }
            LayoutCommand::ReorderTabs {
                pane_id,
                from_index,
                to_index,
            } => self
                .reorder_tabs(ws, pane_id, from_index, to_index)
                .map(|()| CommandOutcome::applied()),
            LayoutCommand::SetActiveTab { pane_id, tab_id } => self
                .set_active_tab(ws, pane_id, tab_id)
                .map(|()| CommandOutcome::applied()),
            LayoutCommand::SetActivePane { pane_id } => self
                .set_active_pane(ws, pane_id)
                .map(|()| CommandOutcome::applied()),
            LayoutCommand::FocusTab { tab_id } => self
                .focus_tab(ws, tab_id)
                .map(|_| CommandOutcome::applied()),
            LayoutCommand::SplitPane {
                pane_id,
                direction,
                tab_id,
            } => self
                .split_pane(ws, pane_id, direction, tab_id)
                .map(|_| CommandOutcome::applied()),
            LayoutCommand::MoveTabToPane {
                from_pane_id,
                tab_id,
                to_pane_id,
                zone,
            } => self
                .move_tab_to_pane(ws, from_pane_id, tab_id, to_pane_id, zone)
                .map(|_| CommandOutcome::applied()),
            LayoutCommand::ResizePane { split_id, ratio } => self
                .resize_pane(ws, split_id, ratio)
                .map(|_| CommandOutcome::applied()),
            LayoutCommand::ClosePane { pane_id } => self
                .close_pane(ws, pane_id)
                .map(|_| CommandOutcome::applied()),
        }
    }
}
