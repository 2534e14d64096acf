//! Configuration loading and server resolution
//!
//! The tagger keeps its catalog server and credentials in a small TOML file,
//! by default `~/.config/chub-tagger/config.toml`:
//!
//! ```toml
//! server = "https://camerahub.info/api"
//! username = "alice"
//! password = "secret"
//!
//! [logging]
//! level = "info"
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Compiled-in catalog server
pub const DEFAULT_SERVER: &str = "https://camerahub.info/api";

/// Environment variable overriding the configured server
pub const SERVER_ENV_VAR: &str = "CHUB_SERVER";

/// Settings persisted in the TOML config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Catalog API base URL (optional, see [`resolve_server`])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// True when both username and password are set
    pub fn has_credentials(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

/// Default config file location for the platform
pub fn default_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("chub-tagger").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
}

/// Parse a config file without logging or permission checks.
///
/// Usable before a tracing subscriber exists, e.g. to pick the log level.
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Read and parse a config file, warning if other users can read it
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let config = read_toml_config(path)?;

    #[cfg(unix)]
    {
        if check_toml_permissions_loose(path)? {
            warn!(
                "Config file {} is readable by other users; it holds credentials",
                path.display()
            );
        }
    }

    debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Write a config file atomically (temp file + rename).
///
/// On Unix the file is created with mode 0600 since it stores a password.
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize config failed: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e.into());
    }

    debug!(path = %path.display(), "Wrote config");
    Ok(())
}

/// True if group or other users have any access to the file
#[cfg(unix)]
pub fn check_toml_permissions_loose(path: &Path) -> Result<bool> {
    use std::os::unix::fs::PermissionsExt;
    let mode = std::fs::metadata(path)?.permissions().mode();
    Ok(mode & 0o077 != 0)
}

/// Resolve the catalog server URL.
///
/// **Priority:**
/// 1. Command-line argument
/// 2. `CHUB_SERVER` environment variable
/// 3. TOML config file
/// 4. Compiled default
///
/// Blank values at any level fall through to the next one. Trailing slashes
/// are removed so endpoint paths can be appended directly.
pub fn resolve_server(cli_arg: Option<&str>, config: &TomlConfig) -> String {
    let server = non_blank(cli_arg.map(str::to_string))
        .or_else(|| non_blank(std::env::var(SERVER_ENV_VAR).ok()))
        .or_else(|| non_blank(config.server.clone()))
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());

    server.trim().trim_end_matches('/').to_string()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
