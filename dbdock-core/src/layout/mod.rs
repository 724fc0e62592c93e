//! Pane and tab layout engine
//!
//! Every database connection gets a workspace whose area is tiled by a
//! binary tree of panes. Leaves host ordered tab lists; splits divide their
//! area between two children at a ratio. The tree stays a valid full binary
//! tree under every edit: split, close, resize, reorder and drag-move
//! across panes.
//!
//! # Architecture
//!
//! - **Arena tree**: panes live in a flat map keyed by id; edges are ids
//! - **Validate, then mutate**: an `Err` never leaves a half-applied change
//! - **Root is permanent**: emptied non-root leaves collapse, the root stays
//! - **Gestures are pure**: drag hover and zone classification never touch
//!   the store; only a drop or resize produces a command
//!
//! # Module Structure
//!
//! - `types` - Identifiers and small enums (`PaneId`, `TabId`, `DropZone`, ...)
//! - `tab` - Tabs and their per-kind payloads
//! - `pane` - Tree nodes (`Pane`, `LeafPane`, `SplitPane`)
//! - `workspace` - One workspace's tree and its split/merge rules
//! - `store` - All workspaces plus registry, terminal service and settings
//! - `zone` - Drop zone classifier
//! - `interaction` - Drag and resize sessions
//! - `command` - Serializable commands and the "skip on failure" dispatcher
//! - `error` - Error types
//!
//! # Example
//!
//! ```
//! use dbdock_core::layout::{
//!     CommandOutcome, DropZone, EdgeThreshold, LayoutCommand, LayoutHint, LayoutStore, Point,
//!     Rect, TabInit, TabKind, WorkspaceId, resolve_zone,
//! };
//!
//! let mut store = LayoutStore::default();
//! let ws = WorkspaceId::from("mysql-prod");
//! let root = store.initialize_layout(&ws, LayoutHint::Empty);
//! let query = store.create_tab(&ws, root, TabKind::Query, TabInit::default()).unwrap();
//! store.create_tab(&ws, root, TabKind::Ai, TabInit::default()).unwrap();
//!
//! // The pointer is near the bottom edge of a 400x300 pane.
//! let zone = resolve_zone(&Rect::sized(400.0, 300.0), Point::new(200.0, 280.0), EdgeThreshold::CONTENT);
//! assert_eq!(zone, DropZone::Bottom);
//!
//! let outcome = store.apply(
//!     &ws,
//!     LayoutCommand::MoveTabToPane { from_pane_id: root, tab_id: query, to_pane_id: root, zone },
//! );
//! assert!(outcome.is_applied());
//! assert_eq!(store.get_all_leaf_panes(&ws).unwrap().len(), 2);
//!
//! // The root is now a split, and only leaves can be focused.
//! let split = store.layout(&ws).unwrap().root_id();
//! let outcome = store.apply(&ws, LayoutCommand::SetActivePane { pane_id: split });
//! assert!(matches!(outcome, CommandOutcome::Skipped { .. }));
//! ```

mod command;
mod error;
mod interaction;
mod pane;
mod store;
mod tab;
mod types;
mod workspace;
mod zone;

pub use command::{CommandOutcome, LayoutCommand};
pub use error::{ErrorClass, LayoutError, LayoutResult};
pub use interaction::{DragPayload, DragSession, DropSurface, DropTarget, ResizeSession};
pub use pane::{DEFAULT_SPLIT_RATIO, LeafPane, MAX_SPLIT_RATIO, MIN_SPLIT_RATIO, Pane, SplitPane};
pub use store::{LayoutHint, LayoutStore};
pub use tab::{Tab, TabInit, TabKind, TabPatch, TabPayload};
pub use types::{
    DropZone, PaneId, SplitDirection, SplitSide, TabId, TerminalSessionId, WorkspaceId,
};
pub use workspace::{InvariantViolation, MoveOutcome, SplitOutcome, WorkspaceLayout};
pub use zone::{EdgeThreshold, Point, Rect, resolve_zone};
