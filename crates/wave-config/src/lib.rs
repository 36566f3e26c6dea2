//! Configuration for the survey wave merger.
//!
//! Every table-shaping constant of the pipeline lives here as a named field:
//! the canonical column layout, the text-to-code vocabulary, the columns
//! excluded from normalization, the completion filter and the prune list.
//! [`WaveConfig::default`] carries the built-in values; [`load_config`] reads
//! overrides from a TOML file and validates them before any file is touched.
//!
//! # Example
//!
//! ```ignore
//! use wave_config::{WaveConfig, load_config};
//!
//! let config = match path {
//!     Some(path) => load_config(path)?,
//!     None => WaveConfig::default(),
//! };
//! config.validate()?;
//! ```

mod error;
mod loader;
mod types;

// === Error Types ===
pub use error::{ConfigError, Result};

// === Configuration Types ===
pub use types::{
    ColumnLayout, CompletionFilter, NormalizationConfig, PruneConfig, VocabularyEntry, WaveConfig,
};

// === Loading ===
pub use loader::{load_config, parse_config};
