//! Errors raised while reading, writing or resolving profiles

use thiserror::Error;

/// Config failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    LoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write config file {path}: {source}")]
    SaveError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Cannot encode config as TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("No profile named '{name}'")]
    ProfileNotFound { name: String },

    #[error("No profiles configured. Add a [profiles.<name>] table to {path}")]
    NoProfiles { path: String },

    #[error("Profile '{name}' has an invalid {field}: {reason}")]
    InvalidProfile {
        name: String,
        field: &'static str,
        reason: String,
    },

    #[error("No config directory available on this platform")]
    ConfigDirError,

    #[error("Config I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result alias for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;
