//! Configuration file handling
//!
//! Settings live in `config.toml` under the platform config directory:
//! - Linux: ~/.config/playbill/config.toml
//! - macOS: ~/Library/Application Support/com.playbill.playbill/config.toml
//! - Windows: %APPDATA%\playbill\playbill\config\config.toml
//!
//! A missing file is not an error; every section falls back to its defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::ConfigError;

/// Events endpoint of a locally running backend
pub const DEFAULT_EVENTS_URL: &str = "http://localhost:3004/events";

/// Port the development backend listens on
pub const DEFAULT_SERVER_PORT: u16 = 3004;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub server: ServerConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Full URL of the events collection
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_EVENTS_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_SERVER_PORT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log file for the TUI; defaults to `playbill.log` in the temp dir
    pub file: Option<PathBuf>,
}

impl LogConfig {
    pub fn file_or_default(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("playbill.log"))
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dirs = directories::ProjectDirs::from("com", "playbill", "playbill")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Loads the config from the default location.
    ///
    /// Without a resolvable config directory (no home dir) the defaults are used.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_or_default(Self::default_path())
    }

    fn load_or_default(path: Result<PathBuf, ConfigError>) -> Result<Self, ConfigError> {
        match path {
            Ok(path) => Self::load_from(&path),
            Err(ConfigError::NoConfigDir) => {
                warn!("No config directory available, using default settings");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Loads the config from `path`, returning defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api.base_url, DEFAULT_EVENTS_URL);
        assert_eq!(config.server.port, 3004);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://events.internal:8000/events\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, "http://events.internal:8000/events");
        assert_eq!(config.server, ServerConfig::default());
        assert!(config.log.file.is_none());
    }

    #[test]
    fn test_unresolvable_config_dir_gives_defaults() {
        let config = Config::load_or_default(Err(ConfigError::NoConfigDir)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_resolved_path_is_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 8080\n").unwrap();

        let config = Config::load_or_default(Ok(path)).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = \"not a number\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
