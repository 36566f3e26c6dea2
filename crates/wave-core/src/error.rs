//! Error types for the merge pipeline.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;
use wave_ingest::IngestError;
use wave_normalization::NormalizationError;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    // === Schema Errors ===
    /// A required column is absent from an export.
    #[error("{path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: String },

    /// An export's columns differ from the first export's.
    #[error("columns of {path} differ from the first file (missing: {missing:?}, unexpected: {unexpected:?})")]
    SchemaMismatch {
        path: PathBuf,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("dataframe error: {0}")]
    DataFrame(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_errors_display() {
        let err = MergeError::MissingColumn {
            path: PathBuf::from("3_wave.csv"),
            column: "Finished".to_string(),
        };
        assert_eq!(err.to_string(), "3_wave.csv has no 'Finished' column");

        let err = MergeError::SchemaMismatch {
            path: PathBuf::from("2_wave.csv"),
            missing: vec!["Q2".to_string()],
            unexpected: vec![],
        };
        assert_eq!(
            err.to_string(),
            "columns of 2_wave.csv differ from the first file (missing: [\"Q2\"], unexpected: [])"
        );
    }
}
