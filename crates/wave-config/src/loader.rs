//! TOML configuration loading.

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::types::WaveConfig;

/// Loads and validates a configuration file.
///
/// Sections missing from the file keep their built-in defaults.
pub fn load_config(path: &Path) -> Result<WaveConfig> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config = parse_config(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    config.validate()?;
    tracing::debug!(
        path = %path.display(),
        vocabulary = config.normalization.vocabulary.len(),
        pruned = config.prune.columns.len(),
        "loaded config"
    );
    Ok(config)
}

/// Parses configuration TOML without validating it.
pub fn parse_config(content: &str) -> std::result::Result<WaveConfig, toml::de::Error> {
    toml::from_str(content)
}
