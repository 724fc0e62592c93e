//! Pane nodes stored in a workspace's pane map
//!
//! A pane is either a leaf hosting an ordered list of tabs or a split
//! dividing its area between two children. Children are referenced by id,
//! never embedded, so the pane map is the only owner of every node.
//!
//! ```text
//! Split(Horizontal, 0.5)
//! ├── Leaf(A, [users, Query 1])
//! └── Split(Vertical, 0.7)
//!     ├── Leaf(B, [Terminal])
//!     └── Leaf(C, [])
//! ```

use serde::Serialize;

use super::tab::Tab;
use super::types::{PaneId, SplitDirection, SplitSide, TabId};

/// Default split ratio (50% of available space to the first child).
pub const DEFAULT_SPLIT_RATIO: f64 = 0.5;

/// Smallest ratio a resize may store.
pub const MIN_SPLIT_RATIO: f64 = 0.1;

/// Largest ratio a resize may store.
pub const MAX_SPLIT_RATIO: f64 = 0.9;

/// A node in the pane map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pane {
    /// A leaf hosting tabs.
    Leaf(LeafPane),
    /// A split containing two child panes.
    Split(SplitPane),
}

/// A leaf pane: an ordered tab list and the tab it currently shows.
///
/// `active_tab` is `None` exactly when `tabs` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafPane {
    id: PaneId,
    tabs: Vec<Tab>,
    active_tab: Option<TabId>,
}

/// A split dividing space between two child panes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitPane {
    /// Unique identifier for this split.
    pub id: PaneId,
    /// Split direction.
    pub direction: SplitDirection,
    /// First child (left for horizontal, top for vertical).
    pub first: PaneId,
    /// Second child (right for horizontal, bottom for vertical).
    pub second: PaneId,
    /// Proportion of space allocated to the first child, inside (0, 1).
    pub ratio: f64,
}

impl LeafPane {
    /// Creates an empty leaf with the given id.
    #[must_use]
    pub const fn new(id: PaneId) -> Self {
        Self {
            id,
            tabs: Vec::new(),
            active_tab: None,
        }
    }

    /// Creates a leaf holding the given tabs.
    ///
    /// `active` is used if it names one of the tabs, otherwise the first
    /// tab becomes active.
    #[must_use]
    pub fn with_tabs(id: PaneId, tabs: Vec<Tab>, active: Option<TabId>) -> Self {
        let active_tab = active
            .filter(|active| tabs.iter().any(|t| t.id == *active))
            .or_else(|| tabs.first().map(|t| t.id));
        Self {
            id,
            tabs,
            active_tab,
        }
    }

    /// Returns the leaf id.
    #[must_use]
    pub const fn id(&self) -> PaneId {
        self.id
    }

    /// Returns the tabs in strip order.
    #[must_use]
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Returns the active tab id.
    #[must_use]
    pub const fn active_tab_id(&self) -> Option<TabId> {
        self.active_tab
    }

    /// Returns the active tab.
    #[must_use]
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_tab.and_then(|id| self.tab(id))
    }

    /// Returns true if the leaf hosts no tabs (welcome view).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Returns the number of tabs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Returns a tab by id.
    #[must_use]
    pub fn tab(&self, tab_id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    /// Returns the index of a tab in the strip.
    #[must_use]
    pub fn position(&self, tab_id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    /// Returns true if the leaf hosts the tab.
    #[must_use]
    pub fn contains_tab(&self, tab_id: TabId) -> bool {
        self.position(tab_id).is_some()
    }

    pub(crate) fn tab_mut(&mut self, tab_id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == tab_id)
    }

    /// Appends a tab and makes it active.
    pub(crate) fn push_active(&mut self, tab: Tab) {
        self.active_tab = Some(tab.id);
        self.tabs.push(tab);
    }

    /// Inserts a tab at `index` (clamped to the end) and makes it active.
    pub(crate) fn insert_active(&mut self, index: usize, tab: Tab) {
        let index = index.min(self.tabs.len());
        self.active_tab = Some(tab.id);
        self.tabs.insert(index, tab);
    }

    /// Removes a tab.
    ///
    /// If it was active, the tab now at the same index becomes active, or
    /// the last tab if the removed one was last.
    pub(crate) fn remove_tab(&mut self, tab_id: TabId) -> Option<Tab> {
        let index = self.position(tab_id)?;
        let tab = self.tabs.remove(index);
        if self.active_tab == Some(tab_id) {
            self.active_tab = self
                .tabs
                .get(index)
                .or_else(|| self.tabs.last())
                .map(|t| t.id);
        }
        Some(tab)
    }

    /// Removes every tab, leaving the leaf empty.
    pub(crate) fn drain_tabs(&mut self) -> Vec<Tab> {
        self.active_tab = None;
        std::mem::take(&mut self.tabs)
    }

    /// Moves the tab at `from` to `to`. The active id follows its tab.
    pub(crate) fn reorder(&mut self, from: usize, to: usize) {
        let tab = self.tabs.remove(from);
        self.tabs.insert(to, tab);
    }

    /// Sets the active tab. Returns false if the tab is not in this leaf.
    pub(crate) fn set_active(&mut self, tab_id: TabId) -> bool {
        if self.contains_tab(tab_id) {
            self.active_tab = Some(tab_id);
            true
        } else {
            false
        }
    }
}

impl SplitPane {
    /// Creates a split with the default ratio.
    #[must_use]
    pub const fn new(id: PaneId, direction: SplitDirection, first: PaneId, second: PaneId) -> Self {
        Self {
            id,
            direction,
            first,
            second,
            ratio: DEFAULT_SPLIT_RATIO,
        }
    }

    /// Returns the child in the given slot.
    #[must_use]
    pub const fn child(&self, side: SplitSide) -> PaneId {
        match side {
            SplitSide::First => self.first,
            SplitSide::Second => self.second,
        }
    }

    /// Returns which slot holds `child`, if any.
    #[must_use]
    pub fn side_of(&self, child: PaneId) -> Option<SplitSide> {
        if self.first == child {
            Some(SplitSide::First)
        } else if self.second == child {
            Some(SplitSide::Second)
        } else {
            None
        }
    }

    /// Returns the child that is not `child`.
    #[must_use]
    pub fn sibling_of(&self, child: PaneId) -> Option<PaneId> {
        match self.side_of(child)? {
            SplitSide::First => Some(self.second),
            SplitSide::Second => Some(self.first),
        }
    }

    /// Replaces the child `old` with `new`. Returns false if `old` is not a child.
    pub(crate) fn replace_child(&mut self, old: PaneId, new: PaneId) -> bool {
        match self.side_of(old) {
            Some(SplitSide::First) => {
                self.first = new;
                true
            }
            Some(SplitSide::Second) => {
                self.second = new;
                true
            }
            None => false,
        }
    }
}

impl Pane {
    /// Returns the pane id.
    #[must_use]
    pub const fn id(&self) -> PaneId {
        match self {
            Self::Leaf(leaf) => leaf.id,
            Self::Split(split) => split.id,
        }
    }

    /// Returns true if this is a leaf.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Returns true if this is a split.
    #[must_use]
    pub const fn is_split(&self) -> bool {
        matches!(self, Self::Split(_))
    }

    /// Returns the leaf if this is a leaf.
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&LeafPane> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Split(_) => None,
        }
    }

    /// Returns a mutable reference to the leaf if this is a leaf.
    pub(crate) fn as_leaf_mut(&mut self) -> Option<&mut LeafPane> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Split(_) => None,
        }
    }

    /// Returns the split if this is a split.
    #[must_use]
    pub const fn as_split(&self) -> Option<&SplitPane> {
        match self {
            Self::Leaf(_) => None,
            Self::Split(split) => Some(split),
        }
    }

    /// Returns a mutable reference to the split if this is a split.
    pub(crate) fn as_split_mut(&mut self) -> Option<&mut SplitPane> {
        match self {
            Self::Leaf(_) => None,
            Self::Split(split) => Some(split),
        }
    }
}
