//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use parley_common::{BackendKind, ConfigError};
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_parley_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[session]
context_window = 4

[models]
active = "gemini-flash"
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.session.context_window, 4);
    assert_eq!(config.models.active, BackendKind::GeminiFlash);
    // Defaults preserved
    assert_eq!(config.session.max_tool_rounds, 5);
    assert_eq!(config.timeouts.tool_secs, 15);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn out_of_range_values_still_parse() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[session]\ncontext_window = 0\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.session.context_window, 0);
    assert!(crate::validation::validate(&config).is_err());
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parley").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.models.active, BackendKind::Gpt4o);
    assert_eq!(config.session.context_window, 10);
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::ParleyConfig;

    let config: ParleyConfig = toml::from_str(&default_config_toml()).unwrap();
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("parley"));
        assert!(path_str.ends_with("config.toml"));
    }
}

#[test]
fn app_dirs_end_in_parley() {
    for dir in [AppDir::Config, AppDir::Data] {
        if let Ok(path) = dir.resolve() {
            assert!(path.ends_with("parley"), "{dir:?}: {}", path.display());
        }
    }
}

#[test]
fn uncreatable_config_dir_is_path_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let err = create_default_config(&blocker.join("parley").join("config.toml")).unwrap_err();
    match err {
        ConfigError::PathError(msg) => assert!(msg.starts_with("failed to create"), "got {msg}"),
        other => panic!("expected PathError, got {other:?}"),
    }
}

#[test]
fn unreadable_config_is_path_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_from_path(dir.path());
    assert!(matches!(result, Err(ConfigError::PathError(_))));
}
