//! Tests for configuration loading from files and command-line arguments
use std::fs;

use mhtml_language_server::config::{Config, ConfigArgs};

#[test]
fn test_config_file_values_are_used() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "max_nesting_depth = 32\nlog_level = \"debug\"\n").expect("write config");

    let config = Config::from_args(ConfigArgs {
        config: Some(path.clone()),
        ..Default::default()
    })
    .expect("load config");

    assert_eq!(config.max_nesting_depth, 32);
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.config_file.as_deref(), Some(path.as_path()));
}

#[test]
fn test_cli_overrides_config_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "max_nesting_depth = 32\n").expect("write config");

    let config = Config::from_args(ConfigArgs {
        config: Some(path),
        max_nesting_depth: Some(8),
        log_level: Some("trace".to_string()),
    })
    .expect("load config");

    assert_eq!(config.max_nesting_depth, 8);
    assert_eq!(config.log_level, "trace");
    assert_eq!(config.validation_options().max_nesting_depth, 8);
}

#[test]
fn test_missing_explicit_config_file_is_an_error() {
    let dir = tempfile::tempdir().expect("create temp dir");

    let result = Config::from_args(ConfigArgs {
        config: Some(dir.path().join("absent.toml")),
        ..Default::default()
    });

    assert!(result.is_err());
}

#[test]
fn test_invalid_config_file_is_an_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "max_nesting_depth = \"deep\"\n").expect("write config");

    let result = Config::from_args(ConfigArgs {
        config: Some(path),
        ..Default::default()
    });

    assert!(result.is_err());
}

#[test]
fn test_zero_depth_is_rejected() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "").expect("write config");

    let result = Config::from_args(ConfigArgs {
        config: Some(path),
        max_nesting_depth: Some(0),
        ..Default::default()
    });

    assert!(result.is_err());
}
