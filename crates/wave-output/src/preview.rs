//! Console preview of the merged table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use wave_common::{CellValue, column_cells};
use wave_core::MergedTable;

use crate::error::Result;

const ELLIPSIS: &str = "…";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Rows shown, split between the head and the tail.
    pub max_rows: usize,
    /// Columns shown, split between the left and the right edge.
    pub max_columns: usize,
    pub width: u16,
    /// Emit colours; off for plain terminals and tests.
    pub styled: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            max_rows: 10,
            max_columns: 12,
            width: 120,
            styled: true,
        }
    }
}

/// Renders the table: column names, the metadata row, then the first and
/// last responses, followed by a `[rows x columns]` line.
pub fn render_preview(table: &MergedTable, options: &PreviewOptions) -> Result<String> {
    if table.is_empty() {
        return Ok("Empty table\n[0 rows x 0 columns]".to_string());
    }

    let names = table.column_names();
    let columns = visible(names.len(), options.max_columns);
    let rows = visible(table.height(), options.max_rows);

    let mut cells: Vec<Option<Vec<CellValue>>> = Vec::with_capacity(columns.len());
    for idx in &columns {
        cells.push(match idx {
            Some(idx) => Some(column_cells(&table.data.get_columns()[*idx])?),
            None => None,
        });
    }

    let mut preview = Table::new();
    preview
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(options.width);
    if !options.styled {
        preview.force_no_tty();
    }

    preview.set_header(columns.iter().map(|idx| match idx {
        Some(idx) => header_cell(&names[*idx]),
        None => dim_cell(ELLIPSIS),
    }));

    if let Some(metadata) = table.metadata_cells() {
        preview.add_row(columns.iter().map(|idx| match idx {
            Some(idx) => dim_cell(metadata[*idx].as_deref().unwrap_or_default()),
            None => dim_cell(ELLIPSIS),
        }));
    }

    for row in rows {
        preview.add_row(cells.iter().map(|column| match (column, row) {
            (Some(column), Some(row)) => value_cell(&column[row]),
            _ => dim_cell(ELLIPSIS),
        }));
    }

    Ok(format!(
        "{preview}\n[{} rows x {} columns]",
        table.height(),
        table.width()
    ))
}

/// Indices to show out of `total`; `None` marks the elided middle.
fn visible(total: usize, max: usize) -> Vec<Option<usize>> {
    let max = max.max(2);
    if total <= max {
        return (0..total).map(Some).collect();
    }
    let head = max.div_ceil(2);
    let tail = max - head;
    (0..head)
        .map(Some)
        .chain(std::iter::once(None))
        .chain((total - tail..total).map(Some))
        .collect()
}

fn value_cell(value: &CellValue) -> Cell {
    match value {
        CellValue::Missing => Cell::new(""),
        CellValue::Integer(v) => Cell::new(v),
        CellValue::Text(s) => Cell::new(s),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
    use wave_core::MetadataRow;

    fn plain(max_rows: usize, max_columns: usize) -> PreviewOptions {
        PreviewOptions {
            max_rows,
            max_columns,
            styled: false,
            ..PreviewOptions::default()
        }
    }

    fn table(rows: usize) -> MergedTable {
        let labels: Vec<String> = (0..rows).map(|i| format!("row-{i}")).collect();
        let codes: Vec<i64> = (0..rows as i64).collect();
        let data = DataFrame::new(vec![
            Series::new("ID".into(), labels).into_column(),
            Series::new("Q1".into(), codes).into_column(),
        ])
        .expect("frame");
        let metadata = MetadataRow::from([("Q1".to_string(), Some("How often?".to_string()))]);
        MergedTable::new(Some(metadata), data)
    }

    #[test]
    fn test_visible_indices() {
        assert_eq!(visible(3, 10), vec![Some(0), Some(1), Some(2)]);
        assert_eq!(
            visible(10, 4),
            vec![Some(0), Some(1), None, Some(8), Some(9)]
        );
        assert_eq!(visible(5, 3), vec![Some(0), Some(1), None, Some(4)]);
        assert!(visible(0, 4).is_empty());
    }

    #[test]
    fn test_preview_shows_head_and_tail() {
        let output = render_preview(&table(12), &plain(4, 12)).expect("preview");
        assert!(output.contains("Q1"));
        assert!(output.contains("How often?"));
        assert!(output.contains("row-0"));
        assert!(output.contains("row-11"));
        assert!(!output.contains("row-5"));
        assert!(output.contains(ELLIPSIS));
        assert!(output.ends_with("[12 rows x 2 columns]"));
    }

    #[test]
    fn test_short_table_is_shown_whole() {
        let output = render_preview(&table(2), &plain(10, 12)).expect("preview");
        assert!(output.contains("row-0"));
        assert!(output.contains("row-1"));
        assert!(!output.contains(ELLIPSIS));
    }

    #[test]
    fn test_plain_preview_has_no_escape_codes() {
        let output = render_preview(&table(1), &plain(10, 12)).expect("preview");
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_empty_table() {
        let output = render_preview(&MergedTable::empty(), &plain(10, 12)).expect("preview");
        assert_eq!(output, "Empty table\n[0 rows x 0 columns]");
    }
}
