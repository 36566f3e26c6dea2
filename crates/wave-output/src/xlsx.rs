//! XLSX export.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::{debug, info};
use wave_common::{CellValue, column_cells};
use wave_core::MergedTable;

use crate::error::{OutputError, Result};

/// Where the workbook goes when no path is given.
pub const DEFAULT_OUTPUT_PATH: &str = "output/output.xlsx";

/// Excel worksheet limits.
const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;

/// Dimensions of a written worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    /// Response rows, not counting the header and metadata rows.
    pub rows: usize,
    pub columns: usize,
}

/// Writes the table to a single-sheet workbook.
///
/// Row one holds the column names, row two the metadata row (when present),
/// then one row per response. Integer cells are written as numbers, text as
/// strings, and missing cells are left empty. The parent directory is created
/// when missing.
pub fn write_xlsx(table: &MergedTable, path: &Path) -> Result<WriteSummary> {
    let metadata = table.metadata_cells();
    let first_data_row = 1 + usize::from(metadata.is_some());
    if table.height() + first_data_row > MAX_ROWS || table.width() > MAX_COLUMNS {
        return Err(OutputError::TooLarge {
            rows: table.height(),
            columns: table.width(),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| OutputError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let xlsx_error = |source: XlsxError| OutputError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    // Bounds were checked above, so the narrowing casts cannot truncate.
    for (col, name) in table.column_names().iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, name, &header_format)
            .map_err(xlsx_error)?;
    }

    if let Some(metadata) = &metadata {
        for (col, text) in metadata.iter().enumerate() {
            if let Some(text) = text {
                worksheet
                    .write_string(1, col as u16, text)
                    .map_err(xlsx_error)?;
            }
        }
    }

    for (col, column) in table.data.get_columns().iter().enumerate() {
        for (idx, cell) in column_cells(column)?.iter().enumerate() {
            let row = (idx + first_data_row) as u32;
            match cell {
                CellValue::Missing => {}
                CellValue::Integer(value) => {
                    worksheet
                        .write_number(row, col as u16, *value as f64)
                        .map_err(xlsx_error)?;
                }
                CellValue::Text(text) => {
                    worksheet
                        .write_string(row, col as u16, text)
                        .map_err(xlsx_error)?;
                }
            }
        }
        debug!(column = %column.name(), "Wrote column");
    }

    workbook.save(path).map_err(xlsx_error)?;

    let summary = WriteSummary {
        rows: table.height(),
        columns: table.width(),
    };
    info!(
        path = %path.display(),
        rows = summary.rows,
        columns = summary.columns,
        "Wrote workbook"
    );
    Ok(summary)
}
