//! Integration tests for Settings config loading with layered merge semantics.
//!
//! The global layer is pointed at temp files through `Settings::load_layers`,
//! so a developer's own `~/.config/adareas/adareas.toml` is never read.
//! `ADAREAS_*` overrides live in `config_env_test.rs`, a separate binary.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use adareas::application::ApplicationError;
use adareas::config::Settings;
use adareas::infrastructure::di::ServiceContainer;

// ============================================================
// Settings::load_layers() file layer tests
// ============================================================

#[test]
fn given_local_config_with_root_label_when_load_then_overrides_default() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("adareas.toml");
    fs::write(&config_path, "root_label = \"global\"\n").unwrap();

    // Act
    let settings = Settings::load_layers(None, Some(&config_path)).expect("load settings");

    // Assert
    assert_eq!(settings.root_label, "global");
    assert!(settings.snapshot_path.is_none());
}

#[test]
fn given_local_config_with_snapshot_path_when_load_then_keeps_default_label() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("adareas.toml");
    let snapshot = dir.path().join("out").join("tree.toml");
    fs::write(
        &config_path,
        format!("snapshot_path = {:?}\n", snapshot.to_string_lossy()),
    )
    .unwrap();

    // Act
    let settings = Settings::load_layers(None, Some(&config_path)).expect("load settings");

    // Assert
    assert_eq!(settings.root_label, "world");
    assert_eq!(settings.snapshot_path, Some(snapshot));
}

#[test]
fn given_missing_local_config_when_load_then_config_error() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("absent.toml");

    // Act
    let result = Settings::load_layers(None, Some(&config_path));

    // Assert
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_invalid_toml_when_load_then_config_error_names_file() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("broken.toml");
    fs::write(&config_path, "root_label = [unclosed").unwrap();

    // Act
    let err = Settings::load_layers(None, Some(&config_path)).unwrap_err();

    // Assert
    assert!(err.to_string().contains("broken.toml"), "{err}");
}

#[test]
fn given_blank_root_label_in_config_when_load_then_rejected() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("adareas.toml");
    fs::write(&config_path, "root_label = \"\"\n").unwrap();

    // Act
    let result = Settings::load_layers(None, Some(&config_path));

    // Assert
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_global_and_local_config_when_load_then_local_wins_per_field() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let global_path = dir.path().join("global.toml");
    let local_path = dir.path().join("local.toml");
    fs::write(
        &global_path,
        "root_label = \"global\"\nsnapshot_path = \"/var/tmp/global.toml\"\n",
    )
    .unwrap();
    fs::write(&local_path, "root_label = \"local\"\n").unwrap();

    // Act
    let settings =
        Settings::load_layers(Some(&global_path), Some(&local_path)).expect("load settings");

    // Assert
    assert_eq!(settings.root_label, "local");
    assert_eq!(
        settings.snapshot_path,
        Some(PathBuf::from("/var/tmp/global.toml"))
    );
}

#[test]
fn given_absent_global_config_when_load_then_skipped() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let global_path = dir.path().join("missing.toml");

    // Act
    let settings = Settings::load_layers(Some(&global_path), None).expect("load settings");

    // Assert
    assert_eq!(settings, Settings::default());
}

// ============================================================
// Serialization
// ============================================================

#[test]
fn given_settings_when_to_toml_then_round_trips_through_load() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let settings = Settings {
        root_label: "planet".to_string(),
        snapshot_path: Some(PathBuf::from("/var/tmp/adareas.toml")),
    };
    let config_path = dir.path().join("adareas.toml");
    fs::write(&config_path, settings.to_toml().unwrap()).unwrap();

    // Act
    let loaded = Settings::load_layers(None, Some(&config_path)).expect("load settings");

    // Assert
    assert_eq!(loaded, settings);
}

// ============================================================
// ServiceContainer wiring
// ============================================================

#[test]
fn given_configured_root_label_when_new_tree_then_root_uses_label() {
    // Arrange
    let container = ServiceContainer::new(Settings {
        root_label: "Мир".to_string(),
        snapshot_path: None,
    });

    // Act
    let mut tree = container.new_tree();
    let root = tree.ensure_root();

    // Assert
    assert_eq!(tree.get_node(root).unwrap().region, "Мир");
    assert!(container.snapshot_path().is_none());
}
