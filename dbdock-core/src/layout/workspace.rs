//! Pane tree of a single workspace
//!
//! [`WorkspaceLayout`] is an arena: a flat map from pane id to [`Pane`],
//! a root pointer and the active leaf. Tree edges exist only as ids stored
//! in [`SplitPane`]s; there are no parent back-pointers, parents are found
//! by scanning the map.
//!
//! Every mutation validates its inputs before touching the map, so an
//! `Err` always means the layout is unchanged.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use super::error::{LayoutError, LayoutResult};
use super::pane::{LeafPane, Pane, SplitPane};
use super::tab::{Tab, TabKind, TabPatch};
use super::types::{DropZone, PaneId, SplitDirection, SplitSide, TabId};

/// Result of replacing a leaf by a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOutcome {
    /// The new split node.
    pub split: PaneId,
    /// Leaf in the split's first slot.
    pub first: PaneId,
    /// Leaf in the split's second slot.
    pub second: PaneId,
}

/// Where a moved tab ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Leaf now hosting the tab.
    pub leaf: PaneId,
    /// Split created for an edge drop.
    pub split: Option<PaneId>,
    /// True if the source leaf was emptied and collapsed away.
    pub source_collapsed: bool,
}

/// A violated structural invariant, reported by
/// [`WorkspaceLayout::check_invariants`].
#[derive(Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    /// An id referenced by the root pointer or a split is not in the map.
    MissingPane {
        /// Referencing split, `None` for the root pointer.
        parent: Option<PaneId>,
        /// Missing id.
        child: PaneId,
    },
    /// A pane is reachable through more than one edge (sharing or cycle).
    SharedPane(PaneId),
    /// A pane in the map is not reachable from the root.
    Unreachable(PaneId),
    /// A pane is stored under a key different from its own id.
    KeyMismatch {
        /// Map key.
        key: PaneId,
        /// Id of the stored pane.
        id: PaneId,
    },
    /// A split ratio is outside (0, 1).
    RatioOutOfRange {
        /// Offending split.
        split: PaneId,
        /// Stored ratio.
        ratio: f64,
    },
    /// A leaf's active tab is missing, dangling or set on an empty leaf.
    ActiveTabMismatch(PaneId),
    /// A tab id appears more than once in the workspace.
    DuplicateTab(TabId),
    /// The active pane is missing or is a split.
    ActivePaneNotLeaf(PaneId),
}

/// The pane tree of one workspace.
#[derive(Debug, Clone)]
pub struct WorkspaceLayout {
    root: PaneId,
    panes: HashMap<PaneId, Pane>,
    active_pane: PaneId,
}

impl WorkspaceLayout {
    /// Creates a layout with a single empty root leaf.
    #[must_use]
    pub fn new() -> Self {
        let root = PaneId::new();
        let mut panes = HashMap::new();
        panes.insert(root, Pane::Leaf(LeafPane::new(root)));
        Self {
            root,
            panes,
            active_pane: root,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns the root pane id.
    #[must_use]
    pub const fn root_id(&self) -> PaneId {
        self.root
    }

    /// Returns the active leaf id.
    #[must_use]
    pub const fn active_pane_id(&self) -> PaneId {
        self.active_pane
    }

    /// Returns true if `pane_id` is the root of the tree.
    #[must_use]
    pub fn is_root(&self, pane_id: PaneId) -> bool {
        self.root == pane_id
    }

    /// Returns the number of panes (leaves and splits).
    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    /// Returns a pane by id.
    #[must_use]
    pub fn pane(&self, pane_id: PaneId) -> Option<&Pane> {
        self.panes.get(&pane_id)
    }

    /// Returns a leaf by id.
    ///
    /// # Errors
    ///
    /// `PaneNotFound` if the id is unknown, `NotALeaf` if it names a split.
    pub fn leaf(&self, pane_id: PaneId) -> LayoutResult<&LeafPane> {
        self.panes
            .get(&pane_id)
            .ok_or(LayoutError::PaneNotFound(pane_id))?
            .as_leaf()
            .ok_or(LayoutError::NotALeaf(pane_id))
    }

    /// Returns a split by id.
    ///
    /// # Errors
    ///
    /// `PaneNotFound` if the id is unknown, `NotASplit` if it names a leaf.
    pub fn split(&self, pane_id: PaneId) -> LayoutResult<&SplitPane> {
        self.panes
            .get(&pane_id)
            .ok_or(LayoutError::PaneNotFound(pane_id))?
            .as_split()
            .ok_or(LayoutError::NotASplit(pane_id))
    }

    /// Returns the active leaf.
    ///
    /// # Errors
    ///
    /// Only if the active pointer is corrupt, which the store never allows.
    pub fn active_leaf(&self) -> LayoutResult<&LeafPane> {
        self.leaf(self.active_pane)
    }

    /// Returns pane ids in pre-order (node, first subtree, second subtree).
    ///
    /// Each id is visited at most once, so a corrupt map cannot loop.
    #[must_use]
    pub fn pre_order(&self) -> Vec<PaneId> {
        let mut order = Vec::with_capacity(self.panes.len());
        let mut seen = HashSet::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let Some(pane) = self.panes.get(&id) else {
                continue;
            };
            order.push(id);
            if let Pane::Split(split) = pane {
                stack.push(split.second);
                stack.push(split.first);
            }
        }
        order
    }

    /// Returns every leaf in pre-order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&LeafPane> {
        self.pre_order()
            .into_iter()
            .filter_map(|id| self.panes.get(&id).and_then(Pane::as_leaf))
            .collect()
    }

    /// Returns every split in pre-order.
    #[must_use]
    pub fn splits(&self) -> Vec<&SplitPane> {
        self.pre_order()
            .into_iter()
            .filter_map(|id| self.panes.get(&id).and_then(Pane::as_split))
            .collect()
    }

    /// Returns the leaves hosting at least one tab of `kind`, in pre-order.
    #[must_use]
    pub fn leaves_with_kind(&self, kind: &TabKind) -> Vec<&LeafPane> {
        self.leaves()
            .into_iter()
            .filter(|leaf| leaf.tabs().iter().any(|t| &t.kind == kind))
            .collect()
    }

    /// Returns the total number of tabs.
    #[must_use]
    pub fn tab_count(&self) -> usize {
        self.leaves().iter().map(|leaf| leaf.len()).sum()
    }

    /// Finds the leaf hosting a tab.
    #[must_use]
    pub fn find_tab(&self, tab_id: TabId) -> Option<(PaneId, &Tab)> {
        self.panes.values().find_map(|pane| {
            let leaf = pane.as_leaf()?;
            leaf.tab(tab_id).map(|tab| (leaf.id(), tab))
        })
    }

    /// Returns the split whose child is `pane_id`.
    #[must_use]
    pub fn parent_of(&self, pane_id: PaneId) -> Option<PaneId> {
        self.panes.values().find_map(|pane| {
            let split = pane.as_split()?;
            split.side_of(pane_id).map(|_| split.id)
        })
    }

    /// Returns the first leaf reached by pre-order descent from `pane_id`.
    #[must_use]
    pub fn first_leaf_in(&self, pane_id: PaneId) -> Option<PaneId> {
        let mut current = pane_id;
        for _ in 0..=self.panes.len() {
            match self.panes.get(&current)? {
                Pane::Leaf(leaf) => return Some(leaf.id()),
                Pane::Split(split) => current = split.first,
            }
        }
        None
    }

    // ========================================================================
    // Tab lifecycle
    // ========================================================================

    /// Appends a tab to a leaf, makes it the leaf's active tab and makes
    /// the leaf the active pane.
    ///
    /// # Errors
    ///
    /// `PaneNotFound` or `NotALeaf` if `pane_id` is not a leaf.
    pub fn push_tab(&mut self, pane_id: PaneId, tab: Tab) -> LayoutResult<TabId> {
        let tab_id = tab.id;
        self.leaf_mut(pane_id)?.push_active(tab);
        self.active_pane = pane_id;
        Ok(tab_id)
    }

    /// Inserts `tab` right after `after` in the leaf and makes it active.
    ///
    /// # Errors
    ///
    /// `PaneNotFound`/`NotALeaf` for a bad pane, `TabNotFound` if `after`
    /// is not in the leaf.
    pub fn insert_tab_after(&mut self, pane_id: PaneId, after: TabId, tab: Tab) -> LayoutResult<TabId> {
        let index = self
            .leaf(pane_id)?
            .position(after)
            .ok_or(LayoutError::TabNotFound {
                pane: pane_id,
                tab: after,
            })?;
        let tab_id = tab.id;
        self.leaf_mut(pane_id)?.insert_active(index + 1, tab);
        self.active_pane = pane_id;
        Ok(tab_id)
    }

    /// Removes a tab from a leaf.
    ///
    /// An emptied non-root leaf is collapsed away; an emptied root leaf
    /// stays as the welcome view.
    ///
    /// # Errors
    ///
    /// `PaneNotFound`/`NotALeaf` for a bad pane, `TabNotFound` if the tab
    /// is not in the leaf.
    pub fn remove_tab(&mut self, pane_id: PaneId, tab_id: TabId) -> LayoutResult<Tab> {
        self.require_tab(pane_id, tab_id)?;
        let leaf = self.leaf_mut(pane_id)?;
        let tab = leaf.remove_tab(tab_id).ok_or(LayoutError::TabNotFound {
            pane: pane_id,
            tab: tab_id,
        })?;
        let emptied = leaf.is_empty();
        if emptied && !self.is_root(pane_id) {
            self.collapse(pane_id);
        }
        Ok(tab)
    }

    /// Merges a patch into a tab.
    ///
    /// # Errors
    ///
    /// `PaneNotFound`/`NotALeaf`/`TabNotFound` for stale ids.
    pub fn update_tab(&mut self, pane_id: PaneId, tab_id: TabId, patch: TabPatch) -> LayoutResult<()> {
        let tab = self
            .leaf_mut(pane_id)?
            .tab_mut(tab_id)
            .ok_or(LayoutError::TabNotFound {
                pane: pane_id,
                tab: tab_id,
            })?;
        tab.apply_patch(patch);
        Ok(())
    }

    /// Moves a tab within a leaf from `from_index` to `to_index`.
    ///
    /// # Errors
    ///
    /// `TabIndexOutOfRange` if either index is outside the tab list.
    pub fn reorder_tabs(&mut self, pane_id: PaneId, from_index: usize, to_index: usize) -> LayoutResult<()> {
        let len = self.leaf(pane_id)?.len();
        for index in [from_index, to_index] {
            if index >= len {
                return Err(LayoutError::TabIndexOutOfRange { index, len });
            }
        }
        if from_index != to_index {
            self.leaf_mut(pane_id)?.reorder(from_index, to_index);
        }
        Ok(())
    }

    /// Removes every tab of a leaf and collapses it unless it is the root.
    ///
    /// # Errors
    ///
    /// `PaneNotFound`/`NotALeaf` for a bad pane.
    pub fn close_pane(&mut self, pane_id: PaneId) -> LayoutResult<Vec<Tab>> {
        let tabs = self.leaf_mut(pane_id)?.drain_tabs();
        if !self.is_root(pane_id) {
            self.collapse(pane_id);
        }
        Ok(tabs)
    }

    /// Removes and returns every tab of the workspace.
    pub(crate) fn drain_all_tabs(&mut self) -> Vec<Tab> {
        self.panes
            .values_mut()
            .filter_map(Pane::as_leaf_mut)
            .flat_map(LeafPane::drain_tabs)
            .collect()
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Sets the active tab of a leaf.
    ///
    /// # Errors
    ///
    /// `PaneNotFound`/`NotALeaf`/`TabNotFound` for stale ids.
    pub fn set_active_tab(&mut self, pane_id: PaneId, tab_id: TabId) -> LayoutResult<()> {
        if self.leaf_mut(pane_id)?.set_active(tab_id) {
            Ok(())
        } else {
            Err(LayoutError::TabNotFound {
                pane: pane_id,
                tab: tab_id,
            })
        }
    }

    /// Sets the active pane.
    ///
    /// # Errors
    ///
    /// `PaneNotFound` if unknown, `NotALeaf` if `pane_id` names a split.
    pub fn set_active_pane(&mut self, pane_id: PaneId) -> LayoutResult<()> {
        self.leaf(pane_id)?;
        self.active_pane = pane_id;
        Ok(())
    }

    /// Activates a tab wherever it lives and focuses its leaf.
    ///
    /// # Errors
    ///
    /// `UnknownTab` if the tab is not in the workspace.
    pub fn focus_tab(&mut self, tab_id: TabId) -> LayoutResult<PaneId> {
        let (pane_id, _) = self.find_tab(tab_id).ok_or(LayoutError::UnknownTab(tab_id))?;
        self.set_active_tab(pane_id, tab_id)?;
        self.active_pane = pane_id;
        Ok(pane_id)
    }

    // ========================================================================
    // Split / merge
    // ========================================================================

    /// Splits a leaf into two leaves.
    ///
    /// With `tab_id`, that tab moves alone into the new second leaf and the
    /// remaining tabs stay in the original leaf (which keeps its id) in the
    /// first slot. Without it, the tab list is split in half, the extra tab
    /// of an odd count staying first; a leaf with at most one tab keeps its
    /// tabs and gets an empty sibling.
    ///
    /// The active pane becomes the leaf now holding the leaf's previously
    /// active tab, or the first leaf if it had none.
    ///
    /// # Errors
    ///
    /// `PaneNotFound` for an unknown pane, `NotALeaf` for a split,
    /// `TabNotFound` if `tab_id` is given but not in the leaf.
    pub fn split_pane(
        &mut self,
        pane_id: PaneId,
        direction: SplitDirection,
        tab_id: Option<TabId>,
        ratio: f64,
    ) -> LayoutResult<SplitOutcome> {
        let leaf = self.leaf(pane_id)?;
        if let Some(tab_id) = tab_id {
            self.require_tab(pane_id, tab_id)?;
        }
        let previously_active = leaf.active_tab_id();

        let leaf = self.leaf_mut(pane_id)?;
        let moved: Vec<Tab> = match tab_id {
            Some(tab_id) => leaf.remove_tab(tab_id).into_iter().collect(),
            None if leaf.len() > 1 => {
                let keep = leaf.len().div_ceil(2);
                let mut tabs = leaf.drain_tabs();
                let moved = tabs.split_off(keep);
                *leaf = LeafPane::with_tabs(pane_id, tabs, previously_active);
                moved
            }
            None => Vec::new(),
        };

        let new_leaf = LeafPane::with_tabs(PaneId::new(), moved, previously_active);
        let new_id = new_leaf.id();
        let hosts_active = previously_active.is_some_and(|t| new_leaf.contains_tab(t));
        let outcome = self.replace_leaf_with_split(pane_id, direction, new_leaf, SplitSide::Second, ratio);

        self.active_pane = if hosts_active { new_id } else { pane_id };
        tracing::debug!(
            split = %outcome.split,
            first = %outcome.first,
            second = %outcome.second,
            %direction,
            "Split pane"
        );
        Ok(outcome)
    }

    /// Moves a tab to another leaf.
    ///
    /// A center drop appends the tab to `to_pane`. An edge drop splits
    /// `to_pane` and puts the tab alone in the new leaf, first for
    /// left/top and second for right/bottom. Either way the tab becomes
    /// active in its new leaf and that leaf becomes the active pane. A
    /// source leaf emptied by the move collapses unless it is the root.
    ///
    /// # Errors
    ///
    /// - `PaneNotFound`/`NotALeaf`/`TabNotFound` for stale ids
    /// - `SameLeafDrop` for a center drop onto the tab's own leaf
    /// - `SoleTabSelfSplit` for an edge drop of a leaf's only tab onto itself
    pub fn move_tab(
        &mut self,
        from_pane: PaneId,
        tab_id: TabId,
        to_pane: PaneId,
        zone: DropZone,
        ratio: f64,
    ) -> LayoutResult<MoveOutcome> {
        self.require_tab(from_pane, tab_id)?;
        self.leaf(to_pane)?;
        if from_pane == to_pane {
            if zone == DropZone::Center {
                return Err(LayoutError::SameLeafDrop(tab_id));
            }
            if self.leaf(from_pane)?.len() == 1 {
                return Err(LayoutError::SoleTabSelfSplit(from_pane));
            }
        }

        let source = self.leaf_mut(from_pane)?;
        let tab = source.remove_tab(tab_id).ok_or(LayoutError::TabNotFound {
            pane: from_pane,
            tab: tab_id,
        })?;
        let source_collapsed = source.is_empty() && !self.is_root(from_pane);
        if source_collapsed {
            self.collapse(from_pane);
        }

        let outcome = match (zone.split_direction(), zone.placement()) {
            (Some(direction), Some(side)) => {
                let mut new_leaf = LeafPane::new(PaneId::new());
                new_leaf.push_active(tab);
                let leaf_id = new_leaf.id();
                let split = self.replace_leaf_with_split(to_pane, direction, new_leaf, side, ratio);
                self.active_pane = leaf_id;
                MoveOutcome {
                    leaf: leaf_id,
                    split: Some(split.split),
                    source_collapsed,
                }
            }
            _ => {
                self.push_tab(to_pane, tab)?;
                MoveOutcome {
                    leaf: to_pane,
                    split: None,
                    source_collapsed,
                }
            }
        };
        tracing::debug!(
            tab = %tab_id,
            from = %from_pane,
            to = %outcome.leaf,
            %zone,
            source_collapsed,
            "Moved tab"
        );
        Ok(outcome)
    }

    /// Writes a split ratio, clamped to `[min, max]`.
    ///
    /// Returns the stored ratio.
    ///
    /// # Errors
    ///
    /// `PaneNotFound`/`NotASplit` for a bad id, `InvalidRatio` for NaN or
    /// infinite ratios, `InvalidRatioBounds` unless `0 < min <= max < 1`.
    pub fn resize(&mut self, split_id: PaneId, ratio: f64, min: f64, max: f64) -> LayoutResult<f64> {
        self.split(split_id)?;
        if !ratio.is_finite() {
            return Err(LayoutError::InvalidRatio(ratio));
        }
        if !(min > 0.0 && min <= max && max < 1.0) {
            return Err(LayoutError::InvalidRatioBounds { min, max });
        }
        let clamped = ratio.clamp(min, max);
        if let Some(split) = self.panes.get_mut(&split_id).and_then(Pane::as_split_mut) {
            split.ratio = clamped;
        }
        Ok(clamped)
    }

    // ========================================================================
    // Invariants and diagnostics
    // ========================================================================

    /// Checks the structural invariants and returns every violation found.
    ///
    /// An empty vector means the layout is a valid full binary tree with
    /// consistent tab selection.
    #[must_use]
    pub fn check_invariants(&self) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();

        for (key, pane) in &self.panes {
            if *key != pane.id() {
                violations.push(InvariantViolation::KeyMismatch {
                    key: *key,
                    id: pane.id(),
                });
            }
        }

        if !self.panes.contains_key(&self.root) {
            violations.push(InvariantViolation::MissingPane {
                parent: None,
                child: self.root,
            });
        }

        let mut reached = HashSet::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !reached.insert(id) {
                violations.push(InvariantViolation::SharedPane(id));
                continue;
            }
            let Some(Pane::Split(split)) = self.panes.get(&id) else {
                continue;
            };
            if !(split.ratio > 0.0 && split.ratio < 1.0) {
                violations.push(InvariantViolation::RatioOutOfRange {
                    split: id,
                    ratio: split.ratio,
                });
            }
            for child in [split.first, split.second] {
                if self.panes.contains_key(&child) {
                    stack.push(child);
                } else {
                    violations.push(InvariantViolation::MissingPane {
                        parent: Some(id),
                        child,
                    });
                }
            }
        }

        let mut tab_ids = HashSet::new();
        for (id, pane) in &self.panes {
            if !reached.contains(id) {
                violations.push(InvariantViolation::Unreachable(*id));
            }
            let Pane::Leaf(leaf) = pane else {
                continue;
            };
            let active_ok = match leaf.active_tab_id() {
                None => leaf.is_empty(),
                Some(active) => leaf.contains_tab(active),
            };
            if !active_ok {
                violations.push(InvariantViolation::ActiveTabMismatch(*id));
            }
            for tab in leaf.tabs() {
                if !tab_ids.insert(tab.id) {
                    violations.push(InvariantViolation::DuplicateTab(tab.id));
                }
            }
        }

        if !self.panes.get(&self.active_pane).is_some_and(Pane::is_leaf) {
            violations.push(InvariantViolation::ActivePaneNotLeaf(self.active_pane));
        }

        violations
    }

    /// Renders the tree as indented text, one pane per line.
    ///
    /// The active leaf is marked with `*`, active tabs with `>`.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = String::new();
        self.describe_node(self.root, 0, &mut out);
        out
    }

    fn describe_node(&self, pane_id: PaneId, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        match self.panes.get(&pane_id) {
            None => {
                let _ = writeln!(out, "{indent}<missing {}>", short_id(pane_id));
            }
            Some(Pane::Split(split)) => {
                let _ = writeln!(
                    out,
                    "{indent}split {} {} {:.2}",
                    short_id(pane_id),
                    split.direction.to_string().to_lowercase(),
                    split.ratio
                );
                if depth <= self.panes.len() {
                    self.describe_node(split.first, depth + 1, out);
                    self.describe_node(split.second, depth + 1, out);
                }
            }
            Some(Pane::Leaf(leaf)) => {
                let marker = if pane_id == self.active_pane { " *" } else { "" };
                let _ = writeln!(out, "{indent}leaf {}{marker}", short_id(pane_id));
                if leaf.is_empty() {
                    let _ = writeln!(out, "{indent}  (welcome)");
                }
                for tab in leaf.tabs() {
                    let active = if leaf.active_tab_id() == Some(tab.id) { ">" } else { " " };
                    let _ = writeln!(out, "{indent}  {active} [{}] {}", tab.kind, tab.title);
                }
            }
        }
    }

    // ========================================================================
    // Private Helper Methods
    // ========================================================================

    fn leaf_mut(&mut self, pane_id: PaneId) -> LayoutResult<&mut LeafPane> {
        self.panes
            .get_mut(&pane_id)
            .ok_or(LayoutError::PaneNotFound(pane_id))?
            .as_leaf_mut()
            .ok_or(LayoutError::NotALeaf(pane_id))
    }

    fn require_tab(&self, pane_id: PaneId, tab_id: TabId) -> LayoutResult<()> {
        if self.leaf(pane_id)?.contains_tab(tab_id) {
            Ok(())
        } else {
            Err(LayoutError::TabNotFound {
                pane: pane_id,
                tab: tab_id,
            })
        }
    }

    /// Substitutes a new split for `leaf_id` in the tree.
    ///
    /// The existing leaf keeps its id and moves under the split; `new_leaf`
    /// goes into `new_side`. Callers have validated that `leaf_id` is a leaf.
    fn replace_leaf_with_split(
        &mut self,
        leaf_id: PaneId,
        direction: SplitDirection,
        new_leaf: LeafPane,
        new_side: SplitSide,
        ratio: f64,
    ) -> SplitOutcome {
        let split_id = PaneId::new();
        let new_id = new_leaf.id();
        let (first, second) = match new_side {
            SplitSide::First => (new_id, leaf_id),
            SplitSide::Second => (leaf_id, new_id),
        };

        match self.parent_of(leaf_id) {
            Some(parent) => {
                if let Some(split) = self.panes.get_mut(&parent).and_then(Pane::as_split_mut) {
                    split.replace_child(leaf_id, split_id);
                }
            }
            None => self.root = split_id,
        }

        let mut split = SplitPane::new(split_id, direction, first, second);
        split.ratio = ratio;
        self.panes.insert(split_id, Pane::Split(split));
        self.panes.insert(new_id, Pane::Leaf(new_leaf));

        SplitOutcome {
            split: split_id,
            first,
            second,
        }
    }

    /// Removes an emptied non-root leaf and its parent split, splicing the
    /// sibling into the parent's former slot.
    ///
    /// The sibling keeps its id and subtree. If the removed leaf was the
    /// active pane, the first leaf of the sibling becomes active.
    fn collapse(&mut self, leaf_id: PaneId) {
        let Some(parent) = self.parent_of(leaf_id) else {
            return;
        };
        let Some(sibling) = self
            .panes
            .get(&parent)
            .and_then(Pane::as_split)
            .and_then(|split| split.sibling_of(leaf_id))
        else {
            return;
        };

        match self.parent_of(parent) {
            Some(grandparent) => {
                if let Some(split) = self.panes.get_mut(&grandparent).and_then(Pane::as_split_mut) {
                    split.replace_child(parent, sibling);
                }
            }
            None => self.root = sibling,
        }
        self.panes.remove(&leaf_id);
        self.panes.remove(&parent);

        if self.active_pane == leaf_id {
            self.active_pane = self.first_leaf_in(sibling).unwrap_or(self.root);
        }
        tracing::debug!(
            removed = %leaf_id,
            split = %parent,
            promoted = %sibling,
            "Collapsed empty pane"
        );
    }
}

impl Default for WorkspaceLayout {
    fn default() -> Self {
        Self::new()
    }
}

fn short_id(pane_id: PaneId) -> String {
    let mut id = pane_id.0.simple().to_string();
    id.truncate(8);
    id
}
