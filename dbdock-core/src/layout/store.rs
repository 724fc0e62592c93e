//! Per-workspace layout store
//!
//! [`LayoutStore`] owns one [`WorkspaceLayout`] per database connection and
//! is the only entry point UI code uses to change a layout. It adds the
//! concerns the bare tree does not have: registry-provided defaults for new
//! tabs, terminal session lifecycle, settings-driven ratios, and logging.
//!
//! All operations are synchronous. Terminal cleanup is requested after the
//! tree change is made and its failure never undoes that change.
//!
//! # Example
//!
//! ```
//! use dbdock_core::config::LayoutSettings;
//! use dbdock_core::layout::{DropZone, LayoutHint, LayoutStore, TabInit, TabKind, WorkspaceId};
//!
//! let mut store = LayoutStore::new(LayoutSettings::default()).unwrap();
//! let ws = WorkspaceId::from("pg-local");
//! let root = store.initialize_layout(&ws, LayoutHint::Empty);
//!
//! let users = store.create_tab(&ws, root, TabKind::Data, TabInit::titled("users")).unwrap();
//! let _query = store.create_tab(&ws, root, TabKind::Query, TabInit::default()).unwrap();
//!
//! // Dock the users tab to the right edge of its own pane.
//! store.move_tab_to_pane(&ws, root, users, root, DropZone::Right).unwrap();
//! assert_eq!(store.get_all_leaf_panes(&ws).unwrap().len(), 2);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::{ConfigResult, LayoutSettings};
use crate::registry::ContentRegistry;
use crate::terminal::{InMemoryTerminalSessions, TerminalLifecycle};
use crate::tracing::span_names;

use super::error::{LayoutError, LayoutResult};
use super::pane::LeafPane;
use super::tab::{Tab, TabInit, TabKind, TabPatch, TabPayload};
use super::types::{DropZone, PaneId, SplitDirection, TabId, TerminalSessionId, WorkspaceId};
use super::workspace::{MoveOutcome, SplitOutcome, WorkspaceLayout};

/// How a new workspace starts out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutHint {
    /// A single empty root leaf showing the welcome view.
    #[default]
    Empty,
    /// A root leaf with one tab of the configured default kind.
    DefaultTab,
}

/// Layouts of every open workspace, plus the services they depend on.
pub struct LayoutStore {
    layouts: HashMap<WorkspaceId, WorkspaceLayout>,
    settings: LayoutSettings,
    registry: ContentRegistry,
    terminals: Arc<dyn TerminalLifecycle>,
}

impl fmt::Debug for LayoutStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutStore")
            .field("layouts", &self.layouts)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::assemble(
            LayoutSettings::default(),
            ContentRegistry::with_builtin_kinds(),
            Arc::new(InMemoryTerminalSessions::new()),
        )
    }
}

impl LayoutStore {
    /// Creates a store with the built-in content kinds and an in-memory
    /// terminal service.
    ///
    /// # Errors
    ///
    /// `ConfigError::Invalid` if the settings do not pass
    /// [`LayoutSettings::validate`].
    pub fn new(settings: LayoutSettings) -> ConfigResult<Self> {
        Self::with_services(
            settings,
            ContentRegistry::with_builtin_kinds(),
            Arc::new(InMemoryTerminalSessions::new()),
        )
    }

    /// Creates a store with explicit collaborators.
    ///
    /// # Errors
    ///
    /// `ConfigError::Invalid` if the settings do not pass
    /// [`LayoutSettings::validate`].
    pub fn with_services(
        settings: LayoutSettings,
        registry: ContentRegistry,
        terminals: Arc<dyn TerminalLifecycle>,
    ) -> ConfigResult<Self> {
        settings.validate()?;
        Ok(Self::assemble(settings, registry, terminals))
    }

    fn assemble(
        settings: LayoutSettings,
        registry: ContentRegistry,
        terminals: Arc<dyn TerminalLifecycle>,
    ) -> Self {
        Self {
            layouts: HashMap::new(),
            settings,
            registry,
            terminals,
        }
    }

    /// Returns the settings in use.
    #[must_use]
    pub const fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Returns the content registry.
    #[must_use]
    pub const fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    /// Returns the layout of a workspace, if initialized.
    #[must_use]
    pub fn layout(&self, workspace: &WorkspaceId) -> Option<&WorkspaceLayout> {
        self.layouts.get(workspace)
    }

    /// Returns the ids of all initialized workspaces, sorted.
    #[must_use]
    pub fn workspace_ids(&self) -> Vec<&WorkspaceId> {
        let mut ids: Vec<_> = self.layouts.keys().collect();
        ids.sort();
        ids
    }

    // ========================================================================
    // Workspace lifecycle
    // ========================================================================

    /// Creates the layout of a workspace unless it already exists.
    ///
    /// Returns the root pane id. An existing layout is left untouched.
    pub fn initialize_layout(&mut self, workspace: &WorkspaceId, hint: LayoutHint) -> PaneId {
        if let Some(layout) = self.layouts.get(workspace) {
            return layout.root_id();
        }
        let layout = WorkspaceLayout::new();
        let root = layout.root_id();
        self.layouts.insert(workspace.clone(), layout);
        tracing::debug!(workspace_id = %workspace, pane_id = %root, "Initialized layout");

        if hint == LayoutHint::DefaultTab
            && let Err(error) = self.open_default_tab(workspace, root)
        {
            tracing::warn!(workspace_id = %workspace, %error, "Failed to open default tab");
        }
        root
    }

    /// Drops the layout of a workspace, closing the terminal sessions of
    /// all of its tabs.
    ///
    /// # Errors
    ///
    /// `WorkspaceNotFound` if the workspace has no layout.
    pub fn remove_layout(&mut self, workspace: &WorkspaceId) -> LayoutResult<()> {
        let _span =
            crate::trace_operation_debug!(span_names::LAYOUT_REMOVE, workspace_id = %workspace)
                .entered();
        let mut layout = self
            .layouts
            .remove(workspace)
            .ok_or_else(|| LayoutError::WorkspaceNotFound(workspace.clone()))?;
        for tab in layout.drain_all_tabs() {
            self.release_terminal(&tab);
        }
        tracing::debug!("Removed layout");
        Ok(())
    }

    // ========================================================================
    // Tab lifecycle
    // ========================================================================

    /// Creates a tab in a leaf and makes it active there; the leaf becomes
    /// the active pane.
    ///
    /// A missing title comes from the content registry. A terminal tab
    /// without a session gets one from the terminal service; if that fails
    /// the tab is still created, without a session.
    ///
    /// # Errors
    ///
    /// `WorkspaceNotFound`, `PaneNotFound` or `NotALeaf` for a bad target.
    pub fn create_tab(
        &mut self,
        workspace: &WorkspaceId,
        pane_id: PaneId,
        kind: TabKind,
        init: TabInit,
    ) -> LayoutResult<TabId> {
        self.layout_ref(workspace)?.leaf(pane_id)?;
        let _span = crate::trace_operation_debug!(
            span_names::TAB_CREATE,
            workspace_id = %workspace,
            pane_id = %pane_id,
            kind = %kind
        )
        .entered();

        let title = init
            .title
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| self.registry.default_title(&kind));
        let mut tab = Tab::new(kind, title).with_payload(init.payload.unwrap_or_default());
        if tab.kind.is_terminal() && tab.terminal_session().is_none() {
            tab.payload = TabPayload::Terminal {
                session: self.request_terminal(tab.id),
            };
        }

        let tab_id = self.layout_mut(workspace)?.push_tab(pane_id, tab)?;
        tracing::debug!(tab_id = %tab_id, "Created tab");
        self.debug_check(workspace);
        Ok(tab_id)
    }

    /// Creates a tab of the configured default kind.
    ///
    /// # Errors
    ///
    /// Same as [`create_tab`](Self::create_tab).
    pub fn open_default_tab(&mut self, workspace: &WorkspaceId, pane_id: PaneId) -> LayoutResult<TabId> {
        let kind = self.settings.default_tab_kind.clone();
        self.create_tab(workspace, pane_id, kind, TabInit::default())
    }

    /// Closes a tab.
    ///
    /// If the leaf becomes empty and is not the root it collapses into its
    /// sibling. A terminal tab's session is closed afterwards; a failure
    /// there is logged and the tab stays closed.
    ///
    /// # Errors
    ///
    /// `WorkspaceNotFound`, `PaneNotFound`, `NotALeaf` or `TabNotFound`.
    pub fn close_tab(&mut self, workspace: &WorkspaceId, pane_id: PaneId, tab_id: TabId) -> LayoutResult<Tab> {
        let _span = crate::trace_operation_debug!(
            span_names::TAB_CLOSE,
            workspace_id = %workspace,
            pane_id = %pane_id,
            tab_id = %tab_id
        )
        .entered();
        let tab = self.layout_mut(workspace)?.remove_tab(pane_id, tab_id)?;
        self.release_terminal(&tab);
        self.debug_check(workspace);
        Ok(tab)
    }

    /// Merges title and/or payload into a tab without touching order or
    /// selection.
    ///
    /// A payload that replaces a terminal tab's session closes the old
    /// session.
    ///
    /// # Errors
    ///
    /// Stale ids as for [`close_tab`](Self::close_tab); `EmptyTitle` if the
    /// patch sets a blank title.
    pub fn update_tab(
        &mut self,
        workspace: &WorkspaceId,
        pane_id: PaneId,
        tab_id: TabId,
        patch: TabPatch,
    ) -> LayoutResult<()> {
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(LayoutError::EmptyTitle);
        }
        let replaced_session = match patch.payload {
            Some(ref payload) => self
                .layout_ref(workspace)?
                .leaf(pane_id)?
                .tab(tab_id)
                .and_then(Tab::terminal_session)
                .filter(|session| payload.terminal_session() != Some(*session)),
            None => None,
        };
        self.layout_mut(workspace)?.update_tab(pane_id, tab_id, patch)?;
        if let Some(session) = replaced_session {
            self.close_terminal_session(tab_id, session);
        }
        Ok(())
    }

    /// Renames a tab. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// `EmptyTitle` for a blank title, otherwise as for
    /// [`update_tab`](Self::update_tab).
    pub fn rename_tab(
        &mut self,
        workspace: &WorkspaceId,
        pane_id: PaneId,
        tab_id: TabId,
        title: &str,
    ) -> LayoutResult<()> {
        self.update_tab(workspace, pane_id, tab_id, TabPatch::title(title.trim()))
    }

    /// Duplicates a tab right after the original and activates the copy.
    ///
    /// The copy gets a fresh id. A terminal copy gets its own session.
    ///
    /// # Errors
    ///
    /// Stale ids as for [`close_tab`](Self::close_tab).
    pub fn duplicate_tab(&mut self, workspace: &WorkspaceId, pane_id: PaneId, tab_id: TabId) -> LayoutResult<TabId> {
        let original = self
            .layout_ref(workspace)?
            .leaf(pane_id)?
            .tab(tab_id)
            .cloned()
            .ok_or(LayoutError::TabNotFound {
                pane: pane_id,
                tab: tab_id,
            })?;
        let _span = crate::trace_operation_debug!(
            span_names::TAB_DUPLICATE,
            workspace_id = %workspace,
            pane_id = %pane_id,
            tab_id = %tab_id
        )
        .entered();

        let mut copy = Tab::new(original.kind, original.title).with_payload(original.payload);
        if copy.kind.is_terminal() {
            copy.payload = TabPayload::Terminal {
                session: self.request_terminal(copy.id),
            };
        }
        let copy_id = self
            .layout_mut(workspace)?
            .insert_tab_after(pane_id, tab_id, copy)?;
        tracing::debug!(copy = %copy_id, "Duplicated tab");
        self.debug_check(workspace);
        Ok(copy_id)
    }

    /// Moves a tab within its leaf. The active tab follows its tab.
    ///
    /// # Errors
    ///
    /// `TabIndexOutOfRange` for a bad index, or a stale pane.
    pub fn reorder_tabs(
        &mut self,
        workspace: &WorkspaceId,
        pane_id: PaneId,
        from_index: usize,
        to_index: usize,
    ) -> LayoutResult<()> {
        self.layout_mut(workspace)?
            .reorder_tabs(pane_id, from_index, to_index)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Sets the active tab of a leaf. The active pane is not changed.
    ///
    /// # Errors
    ///
    /// Stale ids as for [`close_tab`](Self::close_tab).
    pub fn set_active_tab(&mut self, workspace: &WorkspaceId, pane_id: PaneId, tab_id: TabId) -> LayoutResult<()> {
        self.layout_mut(workspace)?.set_active_tab(pane_id, tab_id)
    }

    /// Sets the active pane.
    ///
    /// # Errors
    ///
    /// `NotALeaf` for a split, `PaneNotFound` for an unknown id.
    pub fn set_active_pane(&mut self, workspace: &WorkspaceId, pane_id: PaneId) -> LayoutResult<()> {
        self.layout_mut(workspace)?.set_active_pane(pane_id)
    }

    /// Activates a tab wherever it lives and focuses its leaf.
    ///
    /// # Errors
    ///
    /// `UnknownTab` if no leaf hosts the tab.
    pub fn focus_tab(&mut self, workspace: &WorkspaceId, tab_id: TabId) -> LayoutResult<PaneId> {
        self.layout_mut(workspace)?.focus_tab(tab_id)
    }

    // ========================================================================
    // Split / merge
    // ========================================================================

    /// Splits a leaf. See [`WorkspaceLayout::split_pane`] for how tabs
    /// are distributed.
    ///
    /// # Errors
    ///
    /// `NotALeaf` for a split, stale ids otherwise.
    pub fn split_pane(
        &mut self,
        workspace: &WorkspaceId,
        pane_id: PaneId,
        direction: SplitDirection,
        tab_id: Option<TabId>,
    ) -> LayoutResult<SplitOutcome> {
        let _span = crate::trace_operation_debug!(
            span_names::PANE_SPLIT,
            workspace_id = %workspace,
            pane_id = %pane_id,
            direction = %direction
        )
        .entered();
        let ratio = self.settings.default_split_ratio;
        let outcome = self
            .layout_mut(workspace)?
            .split_pane(pane_id, direction, tab_id, ratio)?;
        self.debug_check(workspace);
        Ok(outcome)
    }

    /// Moves a tab to a leaf's center or docks it to one of its edges.
    ///
    /// See [`WorkspaceLayout::move_tab`].
    ///
    /// # Errors
    ///
    /// `SameLeafDrop`, `SoleTabSelfSplit` or stale ids.
    pub fn move_tab_to_pane(
        &mut self,
        workspace: &WorkspaceId,
        from_pane: PaneId,
        tab_id: TabId,
        to_pane: PaneId,
        zone: DropZone,
    ) -> LayoutResult<MoveOutcome> {
        let _span = crate::trace_operation_debug!(
            span_names::TAB_MOVE,
            workspace_id = %workspace,
            tab_id = %tab_id,
            zone = %zone
        )
        .entered();
        let ratio = self.settings.default_split_ratio;
        let outcome = self
            .layout_mut(workspace)?
            .move_tab(from_pane, tab_id, to_pane, zone, ratio)?;
        self.debug_check(workspace);
        Ok(outcome)
    }

    /// Sets a split's ratio, clamped to the configured range.
    ///
    /// Returns the stored ratio.
    ///
    /// # Errors
    ///
    /// `NotASplit` for a leaf, `InvalidRatio` for NaN/infinite input.
    pub fn resize_pane(&mut self, workspace: &WorkspaceId, split_id: PaneId, ratio: f64) -> LayoutResult<f64> {
        let (min, max) = (self.settings.min_split_ratio, self.settings.max_split_ratio);
        let stored = self.layout_mut(workspace)?.resize(split_id, ratio, min, max)?;
        tracing::trace!(
            workspace_id = %workspace,
            pane_id = %split_id,
            requested = ratio,
            ratio = stored,
            "Resized split"
        );
        Ok(stored)
    }

    /// Closes every tab of a leaf and collapses it (the root is only
    /// emptied).
    ///
    /// Returns the number of tabs closed.
    ///
    /// # Errors
    ///
    /// `NotALeaf` for a split, stale ids otherwise.
    pub fn close_pane(&mut self, workspace: &WorkspaceId, pane_id: PaneId) -> LayoutResult<usize> {
        let _span = crate::trace_operation_debug!(
            span_names::PANE_CLOSE,
            workspace_id = %workspace,
            pane_id = %pane_id
        )
        .entered();
        let tabs = self.layout_mut(workspace)?.close_pane(pane_id)?;
        for tab in &tabs {
            self.release_terminal(tab);
        }
        self.debug_check(workspace);
        Ok(tabs.len())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns every leaf of the workspace in pre-order.
    ///
    /// # Errors
    ///
    /// `WorkspaceNotFound` if the workspace has no layout.
    pub fn get_all_leaf_panes(&self, workspace: &WorkspaceId) -> LayoutResult<Vec<&LeafPane>> {
        Ok(self.layout_ref(workspace)?.leaves())
    }

    /// Returns the active leaf.
    ///
    /// # Errors
    ///
    /// `WorkspaceNotFound` if the workspace has no layout.
    pub fn get_active_pane(&self, workspace: &WorkspaceId) -> LayoutResult<&LeafPane> {
        self.layout_ref(workspace)?.active_leaf()
    }

    /// Finds the leaf hosting a tab.
    ///
    /// # Errors
    ///
    /// `UnknownTab` if no leaf hosts it.
    pub fn find_tab(&self, workspace: &WorkspaceId, tab_id: TabId) -> LayoutResult<(PaneId, &Tab)> {
        self.layout_ref(workspace)?
            .find_tab(tab_id)
            .ok_or(LayoutError::UnknownTab(tab_id))
    }

    /// Returns the leaves (pre-order) hosting at least one tab of `kind`.
    ///
    /// # Errors
    ///
    /// `WorkspaceNotFound` if the workspace has no layout.
    pub fn find_leaves_with_kind(&self, workspace: &WorkspaceId, kind: &TabKind) -> LayoutResult<Vec<&LeafPane>> {
        Ok(self.layout_ref(workspace)?.leaves_with_kind(kind))
    }

    // ========================================================================
    // Private Helper Methods
    // ========================================================================

    fn layout_ref(&self, workspace: &WorkspaceId) -> LayoutResult<&WorkspaceLayout> {
        self.layouts
            .get(workspace)
            .ok_or_else(|| LayoutError::WorkspaceNotFound(workspace.clone()))
    }

    fn layout_mut(&mut self, workspace: &WorkspaceId) -> LayoutResult<&mut WorkspaceLayout> {
        self.layouts
            .get_mut(workspace)
            .ok_or_else(|| LayoutError::WorkspaceNotFound(workspace.clone()))
    }

    fn request_terminal(&self, tab_id: TabId) -> Option<TerminalSessionId> {
        match self.terminals.create_session(tab_id) {
            Ok(session) => Some(session),
            Err(error) => {
                tracing::warn!(tab_id = %tab_id, %error, "Terminal session unavailable");
                None
            }
        }
    }

    fn release_terminal(&self, tab: &Tab) {
        if let Some(session) = tab.terminal_session() {
            self.close_terminal_session(tab.id, session);
        }
    }

    fn close_terminal_session(&self, tab_id: TabId, session: TerminalSessionId) {
        if let Err(error) = self.terminals.close_session(session) {
            tracing::warn!(
                tab_id = %tab_id,
                session = %session,
                %error,
                "Failed to close terminal session"
            );
        }
    }

    fn debug_check(&self, workspace: &WorkspaceId) {
        if cfg!(debug_assertions)
            && let Some(layout) = self.layouts.get(workspace)
        {
            let violations = layout.check_invariants();
            debug_assert!(
                violations.is_empty(),
                "layout invariants violated in {workspace}: {violations:?}"
            );
        }
    }
}
