use std::fs;

use super::config_loader::{LoadError, load_config};

#[test]
fn no_path_is_builtin() {
    let config = load_config(None).unwrap();
    assert_eq!(config, mdmeta_lib::EditorConfig::default());
}

#[test]
fn loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("editor.json");
    fs::write(&path, r#"{"sort_alphabetically": false, "keys": []}"#).unwrap();

    let config = load_config(Some(path.as_path())).unwrap();
    assert!(!config.sort_alphabetically);
    assert!(config.keys.is_empty());
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let err = load_config(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
    assert!(err.to_string().starts_with("failed to read "));
}

#[test]
fn malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("editor.json");
    fs::write(&path, "{ not json").unwrap();

    let err = load_config(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
    assert!(err.to_string().contains("invalid config:"));
}
