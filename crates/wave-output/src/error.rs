//! Error types for output generation.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use rust_xlsxwriter::XlsxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// The output's parent directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a cell or saving the workbook failed.
    #[error("failed to write workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    /// The table has more rows or columns than a worksheet holds.
    #[error("table does not fit in a worksheet ({rows} rows, {columns} columns)")]
    TooLarge { rows: usize, columns: usize },

    #[error("dataframe error: {0}")]
    DataFrame(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, OutputError>;
