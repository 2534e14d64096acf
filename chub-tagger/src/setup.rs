//! Startup: log filter and first-run config creation

use crate::error::TaggerResult;
use chub_common::config::{read_toml_config, write_toml_config, TomlConfig};
use chub_common::prompt::prompt_line;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Log level used when neither RUST_LOG nor a readable config sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Filter directives for this workspace's crates at `level`
pub fn log_filter(level: &str) -> String {
    format!("chub_tagger={level},chub_common={level}")
}

/// Configured log level, read without emitting any events.
///
/// Runs before the subscriber is installed; a missing or broken config
/// falls back to [`DEFAULT_LOG_LEVEL`] and is reported once logging is up.
pub fn configured_log_level(path: &Path) -> String {
    read_toml_config(path)
        .map(|config| config.logging.level)
        .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
}

/// Ask for credentials and write a fresh config file.
///
/// The username is read from `input`; the password comes from
/// `read_password` so the binary can read it without echo.
pub fn create_config<R, W, P>(
    path: &Path,
    server: Option<&str>,
    input: &mut R,
    output: &mut W,
    read_password: P,
) -> TaggerResult<TomlConfig>
where
    R: BufRead,
    W: Write,
    P: FnOnce() -> io::Result<String>,
{
    writeln!(output, "Enter your login details for CameraHub.")?;

    let username = prompt_line("Enter CameraHub username", input, output)?;
    let password = read_password()?;

    let config = TomlConfig {
        server: server.map(str::to_string),
        username,
        password,
        ..Default::default()
    };
    write_toml_config(&config, path)?;

    writeln!(output, "Saved config to {}", path.display())?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chub_common::config::load_toml_config;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_log_filter_covers_both_crates() {
        assert_eq!(log_filter("debug"), "chub_tagger=debug,chub_common=debug");
    }

    #[test]
    fn test_configured_level_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        assert_eq!(configured_log_level(&path), DEFAULT_LOG_LEVEL);

        std::fs::write(&path, "username = \"a\"\n[logging]\nlevel = \"warn\"\n").unwrap();
        assert_eq!(configured_log_level(&path), "warn");
    }

    #[test]
    fn test_create_config_keeps_password_off_the_console() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chub").join("config.toml");

        let mut input = Cursor::new("alice\n");
        let mut output = Vec::new();
        let config = create_config(&path, None, &mut input, &mut output, || {
            Ok("s3cret".to_string())
        })
        .unwrap();

        assert_eq!(config.username, "alice");
        assert_eq!(load_toml_config(&path).unwrap(), config);

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("Enter CameraHub username: "));
        assert!(!printed.contains("s3cret"));
        assert!(!printed.contains("password"));
    }

    #[test]
    fn test_create_config_password_error_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut input = Cursor::new("alice\n");
        let result = create_config(
            &path,
            Some("https://mine.example/api"),
            &mut input,
            &mut Vec::new(),
            || Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no tty")),
        );

        assert!(result.is_err());
        assert!(!path.exists());
    }
}
