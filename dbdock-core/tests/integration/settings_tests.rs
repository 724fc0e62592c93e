//! Integration tests for layout settings files

use std::fs;

use dbdock_core::config::{ConfigError, LayoutSettings, SETTINGS_FILE_NAME};
use dbdock_core::layout::{LayoutHint, LayoutStore, SplitDirection, TabKind, WorkspaceId};
use tempfile::TempDir;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_FILE_NAME);

    let settings = LayoutSettings::load(&path).unwrap();

    assert_eq!(settings, LayoutSettings::default());
    assert!(!path.exists());
}

#[test]
fn test_save_then_load_preserves_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("dbdock").join(SETTINGS_FILE_NAME);
    let settings = LayoutSettings {
        content_edge_ratio: 0.2,
        tab_strip_edge_px: 32.0,
        min_split_ratio: 0.15,
        max_split_ratio: 0.85,
        default_split_ratio: 0.6,
        default_tab_kind: TabKind::Console,
    };

    settings.save(&path).unwrap();
    let loaded = LayoutSettings::load(&path).unwrap();

    assert_eq!(loaded, settings);
}

#[test]
fn test_saved_file_is_readable_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_FILE_NAME);

    LayoutSettings::default().save(&path).unwrap();
    let text = fs::read_to_string(&path).unwrap();

    assert!(text.contains("content_edge_ratio = 0.25"));
    assert!(text.contains("default_tab_kind = \"data\""));
}

#[test]
fn test_invalid_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_FILE_NAME);
    fs::write(&path, "max_split_ratio = 1.5\n").unwrap();

    let err = LayoutSettings::load(&path).unwrap_err();

    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "max_split_ratio",
            ..
        }
    ));
}

#[test]
fn test_unparsable_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_FILE_NAME);
    fs::write(&path, "this is not toml = = =").unwrap();

    assert!(matches!(
        LayoutSettings::load(&path),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_invalid_settings_are_not_saved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_FILE_NAME);
    let settings = LayoutSettings {
        content_edge_ratio: 0.6,
        ..LayoutSettings::default()
    };

    assert!(settings.save(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_loaded_settings_drive_the_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_FILE_NAME);
    fs::write(
        &path,
        "min_split_ratio = 0.3\nmax_split_ratio = 0.7\ndefault_split_ratio = 0.4\ndefault_tab_kind = \"ai\"\n",
    )
    .unwrap();

    let mut store = LayoutStore::new(LayoutSettings::load(&path).unwrap()).unwrap();
    let ws = WorkspaceId::new("conn-1");
    let root = store.initialize_layout(&ws, LayoutHint::DefaultTab);
    assert_eq!(
        store.get_active_pane(&ws).unwrap().active_tab().unwrap().kind,
        TabKind::Ai
    );

    let split = store
        .split_pane(&ws, root, SplitDirection::Horizontal, None)
        .unwrap()
        .split;
    let layout = store.layout(&ws).unwrap();
    assert!((layout.split(split).unwrap().ratio - 0.4).abs() < f64::EPSILON);

    let stored = store.resize_pane(&ws, split, 0.95).unwrap();
    assert!((stored - 0.7).abs() < f64::EPSILON);
}
