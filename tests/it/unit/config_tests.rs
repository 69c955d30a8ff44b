//! Unit tests for config persistence and validation.

use stageview::config::{ViewerConfig, default_config_path};
use stageview::config_watcher::ConfigWatcher;
use stageview::error::ConfigError;

#[test]
fn test_save_then_load_preserves_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = ViewerConfig::default();
    config.view.max_scale = 3.5;
    config.gestures.flick_distance = 80.0;
    config.orientation.shake_threshold = 2.0;
    config.save(&path).unwrap();

    let loaded = ViewerConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ViewerConfig::load_or_default(&dir.path().join("absent.json")).unwrap();
    assert_eq!(config, ViewerConfig::default());
}

#[test]
fn test_missing_file_is_an_error_for_load() {
    let dir = tempfile::tempdir().unwrap();
    let result = ViewerConfig::load(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_malformed_json_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ \"view\": ").unwrap();

    let result = ViewerConfig::load_or_default(&path);
    assert!(matches!(result, Err(ConfigError::Json(_))));
}

#[test]
fn test_invalid_value_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "drag": { "ease": 1.5 } }"#).unwrap();

    match ViewerConfig::load(&path) {
        Err(ConfigError::Invalid(message)) => assert!(message.contains("drag.ease")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_invalid_config_not_saved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut config = ViewerConfig::default();
    config.view.min_scale = 0.0;
    assert!(config.save(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_watcher_starts_on_existing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let mut watcher = ConfigWatcher::new(path.clone()).unwrap();
    assert_eq!(watcher.path(), path.as_path());
    // Nothing has touched the file yet
    while let Some(event) = watcher.poll() {
        assert!(!matches!(event, stageview::config_watcher::ConfigEvent::Error(_)));
    }
}

#[test]
fn test_default_path_ends_in_app_dir() {
    if let Some(path) = default_config_path() {
        assert!(path.ends_with("stageview/config.json"));
    }
}
