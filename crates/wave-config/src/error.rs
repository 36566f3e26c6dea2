//! Error types for configuration loading and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a [`crate::WaveConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A required name is empty.
    #[error("config field '{field}' must not be empty")]
    EmptyField { field: &'static str },

    /// A list that must carry at least one entry is empty.
    #[error("config list '{field}' must contain at least one entry")]
    EmptyList { field: &'static str },

    /// The same vocabulary text is listed twice.
    #[error("vocabulary text '{text}' is listed more than once")]
    DuplicateVocabulary { text: String },

    /// A vocabulary code is outside the ordinal range.
    #[error("vocabulary code {code} for '{text}' must be a positive integer")]
    InvalidCode { text: String, code: i64 },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
