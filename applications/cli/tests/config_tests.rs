//! Configuration loading from files and environment.

use std::io::Write;
use userdir_cli::{CliConfig, CliError};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_config(
        r#"
[server]
base_url = "http://directory.internal:9000"
timeout_secs = 5

[filters]
min_age = 18
max_age = 65
"#,
    );

    let config = CliConfig::load(Some(file.path())).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.server.base_url, "http://directory.internal:9000");
    assert_eq!(config.server.timeout_secs, 5);
    assert_eq!(config.server.connect_timeout_secs, 10);

    let criteria = config.default_criteria();
    assert_eq!(criteria.min_age, 18);
    assert_eq!(criteria.max_age, 65);
    assert!(criteria.search_term.is_empty());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config("[filters]\nmax_age = 40\n");

    let config = CliConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.server.base_url, "http://localhost:8080");
    assert_eq!(config.filters.min_age, 0);
    assert_eq!(config.filters.max_age, 40);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    match CliConfig::load(Some(&missing)) {
        Err(CliError::Config(msg)) => assert!(msg.contains("not found")),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn test_inverted_age_range_fails_validation() {
    let file = write_config("[filters]\nmin_age = 70\nmax_age = 20\n");

    let config = CliConfig::load(Some(file.path())).unwrap();
    assert!(matches!(config.validate(), Err(CliError::Config(_))));
}

#[test]
fn test_environment_overrides_file() {
    let file = write_config("[server]\nconnect_timeout_secs = 3\n");

    std::env::set_var("USERDIR_SERVER__CONNECT_TIMEOUT_SECS", "7");
    let config = CliConfig::load(Some(file.path()));
    std::env::remove_var("USERDIR_SERVER__CONNECT_TIMEOUT_SECS");

    assert_eq!(config.unwrap().server.connect_timeout_secs, 7);
}
