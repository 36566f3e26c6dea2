use polars::prelude::PolarsError;
use thiserror::Error;
use wave_config::ConfigError;

#[derive(Debug, Error)]
pub enum NormalizationError {
    #[error("invalid normalization settings: {0}")]
    Config(#[from] ConfigError),

    #[error("polars error: {0}")]
    PolarsError(#[from] PolarsError),
}
