//! Integration tests for drag and resize gestures
//!
//! A gesture only reaches the store when it ends; these tests drive the
//! sessions with pointer positions and apply whatever command comes out.

use dbdock_core::config::LayoutSettings;
use dbdock_core::layout::{
    CommandOutcome, DragPayload, DragSession, DropTarget, DropZone, ErrorClass, LayoutCommand,
    LayoutHint, LayoutStore, PaneId, Point, Rect, ResizeSession, SplitDirection, TabId, TabInit, TabKind,
    WorkspaceId,
};

fn two_tab_workspace() -> (LayoutStore, WorkspaceId, PaneId, TabId, TabId) {
    let mut store = LayoutStore::default();
    let ws = WorkspaceId::new("conn-1");
    let root = store.initialize_layout(&ws, LayoutHint::Empty);
    let a = store
        .create_tab(&ws, root, TabKind::Data, TabInit::titled("users"))
        .unwrap();
    let b = store
        .create_tab(&ws, root, TabKind::Query, TabInit::titled("Query 1"))
        .unwrap();
    (store, ws, root, a, b)
}

#[test]
fn test_drag_to_bottom_edge_docks_tab() {
    let (mut store, ws, root, _, b) = two_tab_workspace();
    let settings = store.settings().clone();
    let raw = DragPayload::new(b, root).encode().unwrap();
    let target = DropTarget::content(root, Rect::new(0.0, 40.0, 400.0, 300.0));

    let mut drag = DragSession::start(&raw, &settings).unwrap();
    assert_eq!(drag.hover(&target, Point::new(200.0, 190.0)), None);
    assert_eq!(
        drag.hover(&target, Point::new(200.0, 320.0)),
        Some(DropZone::Bottom)
    );
    assert_eq!(drag.hovered(), Some((root, DropZone::Bottom)));

    let command = drag.drop(&target, Point::new(200.0, 320.0)).unwrap();
    assert!(store.apply(&ws, command).is_applied());

    let leaves = store.get_all_leaf_panes(&ws).unwrap();
    assert_eq!(leaves.len(), 2);
    assert_eq!(leaves[0].id(), root);
    assert_eq!(leaves[1].active_tab_id(), Some(b));
    assert_eq!(store.get_active_pane(&ws).unwrap().id(), leaves[1].id());
}

#[test]
fn test_drag_to_other_leaf_center_appends() {
    let (mut store, ws, root, a, b) = two_tab_workspace();
    let second = store
        .split_pane(&ws, root, SplitDirection::Horizontal, Some(b))
        .unwrap()
        .second;
    let settings = store.settings().clone();

    let drag = DragSession::from_payload(DragPayload::new(a, root), &settings);
    let target = DropTarget::content(second, Rect::new(200.0, 0.0, 200.0, 300.0));
    let command = drag.drop(&target, Point::new(300.0, 150.0)).unwrap();
    store.apply(&ws, command);

    // The emptied source leaf is no longer the root, so it collapses.
    let layout = store.layout(&ws).unwrap();
    assert!(layout.pane(root).is_none());
    assert_eq!(layout.root_id(), second);
    let host = layout.leaf(second).unwrap();
    assert_eq!(host.len(), 2);
    assert_eq!(host.active_tab_id(), Some(a));
}

#[test]
fn test_tab_strip_end_docks_beside() {
    let (mut store, ws, root, a, _) = two_tab_workspace();
    let settings = store.settings().clone();
    let strip = DropTarget::tab_strip(root, Rect::new(0.0, 0.0, 600.0, 32.0));

    let drag = DragSession::from_payload(DragPayload::new(a, root), &settings);
    let command = drag.drop(&strip, Point::new(590.0, 16.0)).unwrap();
    let outcome = store.apply(&ws, command);

    assert!(outcome.is_applied());
    let layout = store.layout(&ws).unwrap();
    let split = layout.split(layout.root_id()).unwrap();
    assert_eq!(split.direction, SplitDirection::Horizontal);
    assert_eq!(split.first, root);
}

#[test]
fn test_tab_strip_middle_appends_to_other_pane() {
    let (mut store, ws, root, a, b) = two_tab_workspace();
    let second = store
        .split_pane(&ws, root, SplitDirection::Horizontal, Some(b))
        .unwrap()
        .second;
    let strip = DropTarget::tab_strip(second, Rect::new(300.0, 0.0, 300.0, 32.0));
    let mut drag = DragSession::from_payload(DragPayload::new(a, root), store.settings());

    for y in [2.0, 16.0, 30.0] {
        assert_eq!(drag.hover(&strip, Point::new(450.0, y)), Some(DropZone::Center));
    }
    let command = drag.drop(&strip, Point::new(450.0, 16.0)).unwrap();
    assert!(matches!(
        command,
        LayoutCommand::MoveTabToPane {
            zone: DropZone::Center,
            ..
        }
    ));
    assert!(store.apply(&ws, command).is_applied());

    // Appending never splits; the emptied source collapses instead.
    let layout = store.layout(&ws).unwrap();
    assert_eq!(layout.root_id(), second);
    let host = layout.leaf(second).unwrap();
    let order: Vec<_> = host.tabs().iter().map(|t| t.id).collect();
    assert_eq!(order, vec![b, a]);
    assert_eq!(host.active_tab_id(), Some(a));
}

#[test]
fn test_same_leaf_center_drop_yields_nothing() {
    let (store, _, root, a, _) = two_tab_workspace();
    let mut drag = DragSession::from_payload(DragPayload::new(a, root), store.settings());
    let target = DropTarget::content(root, Rect::sized(400.0, 300.0));

    assert_eq!(drag.hover(&target, Point::new(200.0, 150.0)), None);
    assert!(drag.drop(&target, Point::new(200.0, 150.0)).is_none());
}

#[test]
fn test_drop_outside_target_yields_nothing() {
    let (store, _, root, a, _) = two_tab_workspace();
    let drag = DragSession::from_payload(DragPayload::new(a, root), store.settings());
    let target = DropTarget::content(PaneId::new(), Rect::sized(400.0, 300.0));

    assert!(drag.drop(&target, Point::new(500.0, 150.0)).is_none());
}

#[test]
fn test_malformed_payload_cancels_drag() {
    let settings = LayoutSettings::default();
    for raw in ["", "not json", r#"{"tabId":"x"}"#, r#"{"tabId":1,"fromPaneId":2}"#] {
        let err = DragSession::start(raw, &settings).unwrap_err();
        assert_eq!(err.class(), ErrorClass::MalformedPayload, "{raw:?}");
    }
}

#[test]
fn test_stale_payload_is_skipped_on_drop() {
    let (mut store, ws, root, a, _) = two_tab_workspace();
    let drag = DragSession::from_payload(DragPayload::new(a, root), store.settings());
    store.close_tab(&ws, root, a).unwrap();
    let before = store.layout(&ws).unwrap().describe();

    let target = DropTarget::content(root, Rect::sized(400.0, 300.0));
    let command = drag.drop(&target, Point::new(10.0, 150.0)).unwrap();
    let outcome = store.apply(&ws, command);

    let CommandOutcome::Skipped { reason } = outcome else {
        panic!("stale drop applied");
    };
    assert_eq!(reason.class(), ErrorClass::InvalidTarget);
    assert_eq!(store.layout(&ws).unwrap().describe(), before);
}

#[test]
fn test_resize_gesture_writes_clamped_ratios() {
    let (mut store, ws, root, _, _) = two_tab_workspace();
    let outcome = store
        .split_pane(&ws, root, SplitDirection::Vertical, None)
        .unwrap();
    let bounds = Rect::new(0.0, 100.0, 400.0, 200.0);
    let mut resize = ResizeSession::begin(
        outcome.split,
        SplitDirection::Vertical,
        bounds,
        store.settings(),
    );

    for y in [150.0, 290.0, 105.0] {
        let ratio = resize.pointer_moved(Point::new(10.0, y));
        store.resize_pane(&ws, resize.split_id(), ratio).unwrap();
    }
    let last = resize.command().unwrap();
    assert!(store.apply(&ws, last).is_applied());

    let ratio = resize.finish().unwrap();
    assert!((ratio - 0.1).abs() < f64::EPSILON);
    let stored = store.layout(&ws).unwrap().split(outcome.split).unwrap().ratio;
    assert!((stored - 0.1).abs() < f64::EPSILON);
}
