//! Integration tests for the layout store
//!
//! These tests walk through complete editing sessions (open tabs, split,
//! dock, close) and check the resulting tree shape and selection.

use std::sync::Arc;

use dbdock_core::config::LayoutSettings;
use dbdock_core::layout::{
    CommandOutcome, DropZone, ErrorClass, LayoutCommand, LayoutError, LayoutHint, LayoutStore,
    Pane, PaneId, SplitDirection, TabId, TabInit, TabKind, TabPayload, WorkspaceId,
};
use dbdock_core::registry::{ContentRegistry, FALLBACK_RENDERER};
use dbdock_core::terminal::InMemoryTerminalSessions;

// ============================================================================
// Helpers
// ============================================================================

fn store_with_workspace() -> (LayoutStore, WorkspaceId, PaneId) {
    let mut store = LayoutStore::default();
    let ws = WorkspaceId::new("conn-1");
    let root = store.initialize_layout(&ws, LayoutHint::Empty);
    (store, ws, root)
}

fn open(store: &mut LayoutStore, ws: &WorkspaceId, pane: PaneId, title: &str) -> TabId {
    store
        .create_tab(ws, pane, TabKind::Query, TabInit::titled(title))
        .expect(&format!("create {title}"))
}

fn titles(store: &LayoutStore, ws: &WorkspaceId, pane: PaneId) -> Vec<String> {
    store
        .layout(ws)
        .unwrap()
        .leaf(pane)
        .unwrap()
        .tabs()
        .iter()
        .map(|t| t.title.clone())
        .collect()
}

fn assert_valid(store: &LayoutStore, ws: &WorkspaceId) {
    let violations = store.layout(ws).unwrap().check_invariants();
    assert!(violations.is_empty(), "invariants violated: {violations:?}");
}

// ============================================================================
// Workspace lifecycle
// ============================================================================

#[test]
fn test_initialize_is_idempotent() {
    let (mut store, ws, root) = store_with_workspace();
    open(&mut store, &ws, root, "kept");

    let again = store.initialize_layout(&ws, LayoutHint::DefaultTab);

    assert_eq!(again, root);
    assert_eq!(titles(&store, &ws, root), vec!["kept"]);
}

#[test]
fn test_default_tab_hint_opens_configured_kind() {
    let settings = LayoutSettings {
        default_tab_kind: TabKind::Query,
        ..LayoutSettings::default()
    };
    let mut store = LayoutStore::new(settings).unwrap();
    let ws = WorkspaceId::new("conn-2");
    let root = store.initialize_layout(&ws, LayoutHint::DefaultTab);

    let leaf = store.get_active_pane(&ws).unwrap();
    assert_eq!(leaf.id(), root);
    assert_eq!(leaf.len(), 1);
    assert_eq!(leaf.active_tab().unwrap().kind, TabKind::Query);
    assert_eq!(leaf.active_tab().unwrap().title, "Query");
}

#[test]
fn test_workspaces_are_independent() {
    let (mut store, ws, root) = store_with_workspace();
    let other = WorkspaceId::new("conn-9");
    let other_root = store.initialize_layout(&other, LayoutHint::Empty);
    open(&mut store, &ws, root, "a");

    store
        .split_pane(&ws, root, SplitDirection::Horizontal, None)
        .unwrap();

    assert_eq!(store.layout(&other).unwrap().pane_count(), 1);
    assert_eq!(store.layout(&other).unwrap().root_id(), other_root);
    assert_eq!(store.workspace_ids(), vec![&ws, &other]);
}

#[test]
fn test_unknown_workspace_is_skipped() {
    let mut store = LayoutStore::default();
    let outcome = store.apply(
        &WorkspaceId::new("missing"),
        LayoutCommand::OpenDefaultTab {
            pane_id: PaneId::new(),
        },
    );
    assert!(matches!(
        outcome,
        CommandOutcome::Skipped {
            reason: LayoutError::WorkspaceNotFound(_)
        }
    ));
}

// ============================================================================
// Close / collapse
// ============================================================================

#[test]
fn test_close_last_tab_in_root_keeps_empty_root() {
    let (mut store, ws, root) = store_with_workspace();
    let only = open(&mut store, &ws, root, "only");

    store.close_tab(&ws, root, only).unwrap();

    let layout = store.layout(&ws).unwrap();
    assert_eq!(layout.root_id(), root);
    assert_eq!(layout.pane_count(), 1);
    let leaf = layout.leaf(root).unwrap();
    assert!(leaf.is_empty());
    assert_eq!(leaf.active_tab_id(), None);
    assert_valid(&store, &ws);
}

#[test]
fn test_close_active_tab_selects_same_index_then_last() {
    let (mut store, ws, root) = store_with_workspace();
    let a = open(&mut store, &ws, root, "a");
    let b = open(&mut store, &ws, root, "b");
    let c = open(&mut store, &ws, root, "c");

    store.set_active_tab(&ws, root, b).unwrap();
    store.close_tab(&ws, root, b).unwrap();
    assert_eq!(store.get_active_pane(&ws).unwrap().active_tab_id(), Some(c));

    store.close_tab(&ws, root, c).unwrap();
    assert_eq!(store.get_active_pane(&ws).unwrap().active_tab_id(), Some(a));
}

#[test]
fn test_split_then_close_new_leaf_round_trips() {
    let (mut store, ws, root) = store_with_workspace();
    open(&mut store, &ws, root, "a");
    open(&mut store, &ws, root, "b");
    let c = open(&mut store, &ws, root, "c");

    let outcome = store
        .split_pane(&ws, root, SplitDirection::Vertical, Some(c))
        .unwrap();
    assert_eq!(outcome.first, root);
    assert_eq!(titles(&store, &ws, outcome.second), vec!["c"]);

    store.close_tab(&ws, outcome.second, c).unwrap();

    let layout = store.layout(&ws).unwrap();
    assert_eq!(layout.root_id(), root);
    assert_eq!(layout.pane_count(), 1);
    assert_eq!(titles(&store, &ws, root), vec!["a", "b"]);
    assert_eq!(store.get_active_pane(&ws).unwrap().id(), root);
}

#[test]
fn test_split_halves_tabs_and_follows_active() {
    let (mut store, ws, root) = store_with_workspace();
    for title in ["a", "b", "c", "d", "e"] {
        open(&mut store, &ws, root, title);
    }

    let outcome = store
        .split_pane(&ws, root, SplitDirection::Horizontal, None)
        .unwrap();

    assert_eq!(titles(&store, &ws, outcome.first), vec!["a", "b", "c"]);
    assert_eq!(titles(&store, &ws, outcome.second), vec!["d", "e"]);
    // "e" was active, so focus follows it.
    assert_eq!(store.get_active_pane(&ws).unwrap().id(), outcome.second);
    assert_valid(&store, &ws);
}

#[test]
fn test_collapse_into_split_sibling_focuses_its_first_leaf() {
    let (mut store, ws, root) = store_with_workspace();
    open(&mut store, &ws, root, "left");
    let right_tab = open(&mut store, &ws, root, "right");
    let top = store
        .split_pane(&ws, root, SplitDirection::Horizontal, Some(right_tab))
        .unwrap();

    // Split the left leaf again so the right leaf's sibling is a split.
    let inner_tab = open(&mut store, &ws, root, "inner");
    let inner = store
        .split_pane(&ws, root, SplitDirection::Vertical, Some(inner_tab))
        .unwrap();

    store.set_active_pane(&ws, top.second).unwrap();
    store.close_tab(&ws, top.second, right_tab).unwrap();

    let layout = store.layout(&ws).unwrap();
    assert_eq!(layout.root_id(), inner.split);
    assert_eq!(layout.active_pane_id(), inner.first);
    assert_eq!(layout.leaves().len(), 2);
    assert_valid(&store, &ws);
}

#[test]
fn test_close_pane_collapses_and_counts() {
    let (mut store, ws, root) = store_with_workspace();
    for title in ["a", "b", "c", "d"] {
        open(&mut store, &ws, root, title);
    }
    let outcome = store
        .split_pane(&ws, root, SplitDirection::Horizontal, None)
        .unwrap();

    assert_eq!(store.close_pane(&ws, outcome.second).unwrap(), 2);
    assert_eq!(store.layout(&ws).unwrap().pane_count(), 1);
    assert_eq!(titles(&store, &ws, root), vec!["a", "b"]);
}

// ============================================================================
// Tab editing
// ============================================================================

#[test]
fn test_reorder_keeps_active_tab() {
    let (mut store, ws, root) = store_with_workspace();
    let a = open(&mut store, &ws, root, "a");
    open(&mut store, &ws, root, "b");
    open(&mut store, &ws, root, "c");
    store.set_active_tab(&ws, root, a).unwrap();

    store.reorder_tabs(&ws, root, 0, 2).unwrap();

    assert_eq!(titles(&store, &ws, root), vec!["b", "c", "a"]);
    assert_eq!(store.get_active_pane(&ws).unwrap().active_tab_id(), Some(a));
}

#[test]
fn test_update_keeps_order_and_selection() {
    let (mut store, ws, root) = store_with_workspace();
    let a = open(&mut store, &ws, root, "a");
    let b = open(&mut store, &ws, root, "b");

    let outcome = store.apply(
        &ws,
        LayoutCommand::UpdateTab {
            pane_id: root,
            tab_id: a,
            title: Some("orders".to_owned()),
            payload: Some(TabPayload::Query {
                text: "select * from orders".to_owned(),
            }),
        },
    );

    assert!(outcome.is_applied());
    assert_eq!(titles(&store, &ws, root), vec!["orders", "b"]);
    assert_eq!(store.get_active_pane(&ws).unwrap().active_tab_id(), Some(b));
    let (_, tab) = store.find_tab(&ws, a).unwrap();
    assert_eq!(
        tab.payload,
        TabPayload::Query {
            text: "select * from orders".to_owned()
        }
    );
}

#[test]
fn test_rename_rejects_blank_title() {
    let (mut store, ws, root) = store_with_workspace();
    let a = open(&mut store, &ws, root, "a");

    let outcome = store.apply(
        &ws,
        LayoutCommand::RenameTab {
            pane_id: root,
            tab_id: a,
            title: "   ".to_owned(),
        },
    );

    assert_eq!(
        outcome,
        CommandOutcome::Skipped {
            reason: LayoutError::EmptyTitle
        }
    );
    assert_eq!(titles(&store, &ws, root), vec!["a"]);
}

#[test]
fn test_duplicate_inserts_copy_after_original() {
    let (mut store, ws, root) = store_with_workspace();
    let a = open(&mut store, &ws, root, "a");
    open(&mut store, &ws, root, "b");

    let outcome = store.apply(&ws, LayoutCommand::DuplicateTab { pane_id: root, tab_id: a });
    let CommandOutcome::Applied {
        created_tab: Some(copy),
    } = outcome
    else {
        panic!("duplicate was skipped: {outcome:?}");
    };

    assert_ne!(copy, a);
    assert_eq!(titles(&store, &ws, root), vec!["a", "a", "b"]);
    assert_eq!(store.get_active_pane(&ws).unwrap().active_tab_id(), Some(copy));
}

// ============================================================================
// Moves
// ============================================================================

#[test]
fn test_move_to_center_appends_and_collapses_source() {
    let (mut store, ws, root) = store_with_workspace();
    open(&mut store, &ws, root, "a");
    let b = open(&mut store, &ws, root, "b");
    let split = store
        .split_pane(&ws, root, SplitDirection::Horizontal, Some(b))
        .unwrap();

    let outcome = store
        .move_tab_to_pane(&ws, split.second, b, root, DropZone::Center)
        .unwrap();

    assert!(outcome.source_collapsed);
    assert_eq!(outcome.leaf, root);
    assert_eq!(store.layout(&ws).unwrap().pane_count(), 1);
    assert_eq!(titles(&store, &ws, root), vec!["a", "b"]);
    assert_eq!(store.get_active_pane(&ws).unwrap().active_tab_id(), Some(b));
}

#[test]
fn test_edge_moves_place_new_leaf_by_zone() {
    for (zone, direction, new_first) in [
        (DropZone::Left, SplitDirection::Horizontal, true),
        (DropZone::Right, SplitDirection::Horizontal, false),
        (DropZone::Top, SplitDirection::Vertical, true),
        (DropZone::Bottom, SplitDirection::Vertical, false),
    ] {
        let (mut store, ws, root) = store_with_workspace();
        open(&mut store, &ws, root, "stay");
        let moved = open(&mut store, &ws, root, "moved");

        let outcome = store
            .move_tab_to_pane(&ws, root, moved, root, zone)
            .unwrap();

        let layout = store.layout(&ws).unwrap();
        let split = layout.split(outcome.split.unwrap()).unwrap();
        assert_eq!(split.direction, direction, "{zone}");
        let (expected_new, expected_old) = if new_first {
            (split.first, split.second)
        } else {
            (split.second, split.first)
        };
        assert_eq!(expected_new, outcome.leaf, "{zone}");
        assert_eq!(expected_old, root, "{zone}");
        assert_eq!(titles(&store, &ws, outcome.leaf), vec!["moved"]);
        assert_eq!(titles(&store, &ws, root), vec!["stay"]);
        assert_eq!(layout.active_pane_id(), outcome.leaf);
        assert_valid(&store, &ws);
    }
}

#[test]
fn test_move_rejections_leave_layout_untouched() {
    let (mut store, ws, root) = store_with_workspace();
    let only = open(&mut store, &ws, root, "only");
    let before = store.layout(&ws).unwrap().describe();

    let same_leaf = store.move_tab_to_pane(&ws, root, only, root, DropZone::Center);
    let self_split = store.move_tab_to_pane(&ws, root, only, root, DropZone::Left);

    assert_eq!(same_leaf.unwrap_err(), LayoutError::SameLeafDrop(only));
    assert_eq!(self_split.unwrap_err(), LayoutError::SoleTabSelfSplit(root));
    assert_eq!(store.layout(&ws).unwrap().describe(), before);
}

#[test]
fn test_stale_drag_after_source_closed_is_invalid_target() {
    let (mut store, ws, root) = store_with_workspace();
    open(&mut store, &ws, root, "a");
    let b = open(&mut store, &ws, root, "b");
    let split = store
        .split_pane(&ws, root, SplitDirection::Horizontal, Some(b))
        .unwrap();
    let stale = LayoutCommand::MoveTabToPane {
        from_pane_id: split.second,
        tab_id: b,
        to_pane_id: root,
        zone: DropZone::Right,
    };
    store.close_tab(&ws, split.second, b).unwrap();
    let before = store.layout(&ws).unwrap().describe();

    let CommandOutcome::Skipped { reason } = store.apply(&ws, stale) else {
        panic!("stale move was applied");
    };

    assert_eq!(reason.class(), ErrorClass::InvalidTarget);
    assert_eq!(store.layout(&ws).unwrap().describe(), before);
}

#[test]
fn test_split_of_split_is_degenerate() {
    let (mut store, ws, root) = store_with_workspace();
    let split = store
        .split_pane(&ws, root, SplitDirection::Horizontal, None)
        .unwrap()
        .split;

    let err = store
        .split_pane(&ws, split, SplitDirection::Vertical, None)
        .unwrap_err();

    assert_eq!(err, LayoutError::NotALeaf(split));
    assert_eq!(err.class(), ErrorClass::DegenerateSplit);
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn test_resize_clamps_out_of_range_ratios() {
    let (mut store, ws, root) = store_with_workspace();
    let split = store
        .split_pane(&ws, root, SplitDirection::Horizontal, None)
        .unwrap()
        .split;

    assert!((store.resize_pane(&ws, split, 1.4).unwrap() - 0.9).abs() < f64::EPSILON);
    assert!((store.resize_pane(&ws, split, -0.2).unwrap() - 0.1).abs() < f64::EPSILON);
    assert!((store.resize_pane(&ws, split, 0.3).unwrap() - 0.3).abs() < f64::EPSILON);

    let Some(Pane::Split(stored)) = store.layout(&ws).unwrap().pane(split) else {
        panic!("split disappeared");
    };
    assert!((stored.ratio - 0.3).abs() < f64::EPSILON);
}

// ============================================================================
// Collaborators
// ============================================================================

#[test]
fn test_terminal_sessions_follow_tab_lifetime() {
    let terminals = Arc::new(InMemoryTerminalSessions::new());
    let mut store = LayoutStore::with_services(
        LayoutSettings::default(),
        ContentRegistry::with_builtin_kinds(),
        terminals.clone(),
    )
    .unwrap();
    let ws = WorkspaceId::new("conn-3");
    let root = store.initialize_layout(&ws, LayoutHint::Empty);

    let shell = store
        .create_tab(&ws, root, TabKind::Terminal, TabInit::default())
        .unwrap();
    let copy = store.duplicate_tab(&ws, root, shell).unwrap();
    assert_eq!(terminals.live_count(), 2);

    let closed = store.close_tab(&ws, root, shell).unwrap();
    let session = closed.terminal_session().unwrap();
    assert!(!terminals.is_live(session));
    assert_eq!(terminals.live_count(), 1);

    store.remove_layout(&ws).unwrap();
    assert_eq!(terminals.live_count(), 0);
    assert!(store.find_tab(&ws, copy).is_err());
}

#[test]
fn test_leaves_with_kind_finds_any_terminal() {
    let (mut store, ws, root) = store_with_workspace();
    open(&mut store, &ws, root, "q");
    let shell = store
        .create_tab(&ws, root, TabKind::Terminal, TabInit::default())
        .unwrap();
    let split = store
        .split_pane(&ws, root, SplitDirection::Vertical, Some(shell))
        .unwrap();

    let hosts: Vec<PaneId> = store
        .find_leaves_with_kind(&ws, &TabKind::Terminal)
        .unwrap()
        .iter()
        .map(|leaf| leaf.id())
        .collect();

    assert_eq!(hosts, vec![split.second]);
    assert_eq!(store.get_all_leaf_panes(&ws).unwrap().len(), 2);
}

#[test]
fn test_unknown_kind_gets_fallback_renderer() {
    let (mut store, ws, root) = store_with_workspace();
    let kind = TabKind::from("graph".to_owned());
    let id = store
        .create_tab(&ws, root, kind.clone(), TabInit::default())
        .unwrap();

    let (_, tab) = store.find_tab(&ws, id).unwrap();
    assert_eq!(tab.title, "graph");
    assert_eq!(store.registry().resolve_renderer(&kind), None);
    assert_eq!(
        store.registry().resolve_or_fallback(&kind).renderer,
        FALLBACK_RENDERER
    );
}
