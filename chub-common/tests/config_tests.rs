//! Tests for config file handling and server resolution
//!
//! Tests that touch CHUB_SERVER are marked #[serial] so they never race on
//! the process environment.

use chub_common::config::{
    load_toml_config, resolve_server, write_toml_config, LoggingConfig, TomlConfig,
    DEFAULT_SERVER, SERVER_ENV_VAR,
};
use serial_test::serial;
use tempfile::TempDir;

fn sample_config() -> TomlConfig {
    TomlConfig {
        server: Some("https://catalog.example/api".to_string()),
        username: "alice".to_string(),
        password: "s3cret".to_string(),
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
    }
}

#[test]
fn test_write_then_load_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");

    write_toml_config(&sample_config(), &path).unwrap();
    let loaded = load_toml_config(&path).unwrap();

    assert_eq!(loaded, sample_config());
}

#[test]
fn test_write_creates_parent_and_cleans_temp() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.toml");

    write_toml_config(&sample_config(), &path).unwrap();

    assert!(path.exists());
    assert!(!temp_dir.path().join("nested").join("config.toml.tmp").exists());
}

#[cfg(unix)]
#[test]
fn test_written_config_is_private() {
    use chub_common::config::check_toml_permissions_loose;

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    write_toml_config(&sample_config(), &path).unwrap();

    assert!(!check_toml_permissions_loose(&path).unwrap());
}

#[test]
fn test_load_missing_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = load_toml_config(&temp_dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, chub_common::Error::Config(_)));
}

#[test]
fn test_load_invalid_toml_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "username = [").unwrap();

    assert!(matches!(
        load_toml_config(&path),
        Err(chub_common::Error::Config(_))
    ));
}

#[test]
#[serial]
fn test_cli_overrides_env_and_toml() {
    std::env::set_var(SERVER_ENV_VAR, "https://env.example/api");
    let server = resolve_server(Some("https://cli.example/api/"), &sample_config());
    std::env::remove_var(SERVER_ENV_VAR);

    assert_eq!(server, "https://cli.example/api");
}

#[test]
#[serial]
fn test_env_overrides_toml() {
    std::env::set_var(SERVER_ENV_VAR, "https://env.example/api");
    let server = resolve_server(None, &sample_config());
    std::env::remove_var(SERVER_ENV_VAR);

    assert_eq!(server, "https://env.example/api");
}

#[test]
#[serial]
fn test_toml_then_default() {
    std::env::remove_var(SERVER_ENV_VAR);

    assert_eq!(
        resolve_server(None, &sample_config()),
        "https://catalog.example/api"
    );
    assert_eq!(resolve_server(None, &TomlConfig::default()), DEFAULT_SERVER);
}

#[test]
#[serial]
fn test_blank_env_falls_through_to_toml() {
    std::env::set_var(SERVER_ENV_VAR, "");
    let server = resolve_server(None, &sample_config());
    std::env::remove_var(SERVER_ENV_VAR);

    assert_eq!(server, "https://catalog.example/api");
}

#[test]
#[serial]
fn test_blank_cli_falls_through_to_env() {
    std::env::set_var(SERVER_ENV_VAR, "https://env.example/api");
    let server = resolve_server(Some("  "), &sample_config());
    std::env::remove_var(SERVER_ENV_VAR);

    assert_eq!(server, "https://env.example/api");
}
