use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating, reading or parsing the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory for this platform")]
    NoConfigDir,

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
