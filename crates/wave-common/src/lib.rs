//! Shared utilities for survey wave merger crates.

mod polars_utils;

pub use polars_utils::{CellValue, column_cells, is_mixed, mixed_column, text_column, to_mixed_column};
