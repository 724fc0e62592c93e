//! `dbdock` Core Library
//!
//! This crate provides the workspace layout engine of the dbdock database
//! client: the pane/tab tree of each connection, its mutation operations,
//! the drag-and-drop docking classifier and active selection tracking.
//!
//! # Crate Structure
//!
//! - [`layout`] - Pane tree, tab lifecycle, split/merge, drop zones, commands
//! - [`registry`] - Tab kind to renderer lookup
//! - [`terminal`] - Terminal session lifecycle contract
//! - [`config`] - Layout settings and persistence
//! - [`tracing`] - Logging setup and standard span/field names

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod config;
pub mod layout;
pub mod registry;
pub mod terminal;
pub mod tracing;

// =============================================================================
// Convenience re-exports
// =============================================================================

pub use config::{ConfigError, ConfigResult, LayoutSettings};
pub use layout::{
    CommandOutcome, DragPayload, DragSession, DropTarget, DropZone, EdgeThreshold, LayoutCommand,
    LayoutError, LayoutHint, LayoutResult, LayoutStore, PaneId, Point, Rect, ResizeSession,
    SplitDirection, Tab, TabId, TabKind, WorkspaceId, WorkspaceLayout, resolve_zone,
};
pub use registry::{ContentDescriptor, ContentRegistry};
pub use terminal::{InMemoryTerminalSessions, TerminalError, TerminalLifecycle};
pub use tracing::{
    TracingConfig, TracingError, TracingLevel, TracingOutput, TracingResult, init_tracing,
    is_tracing_initialized, span_names,
};
