//! Polars cell conversions.
//!
//! The merged table keeps integer codes in `Int64` columns and untouched text
//! in `String` columns. A column holding both codes and text is a struct
//! column with one `code` and one `text` field, exactly one of them set per
//! present cell. These helpers turn cells back into plain values for the
//! normalizer, the spreadsheet writer and the console preview.

use polars::prelude::{
    AnyValue, Column, DataType, IntoColumn, IntoSeries, NamedFrom, PolarsResult, Series,
    StructChunked,
};

const CODE_FIELD: &str = "code";
const TEXT_FIELD: &str = "text";

/// A single cell of the merged table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Missing,
    Integer(i64),
    Text(String),
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(CellValue::Missing, CellValue::Text)
    }
}

/// Converts a Polars `AnyValue` to a [`CellValue`].
///
/// Integer types collapse to `Integer`; floats with no fractional part do too,
/// other floats become text.
fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Missing,
        AnyValue::Int8(v) => CellValue::Integer(i64::from(v)),
        AnyValue::Int16(v) => CellValue::Integer(i64::from(v)),
        AnyValue::Int32(v) => CellValue::Integer(i64::from(v)),
        AnyValue::Int64(v) => CellValue::Integer(v),
        AnyValue::UInt8(v) => CellValue::Integer(i64::from(v)),
        AnyValue::UInt16(v) => CellValue::Integer(i64::from(v)),
        AnyValue::UInt32(v) => CellValue::Integer(i64::from(v)),
        AnyValue::UInt64(v) => match i64::try_from(v) {
            Ok(v) => CellValue::Integer(v),
            Err(_) => CellValue::Text(v.to_string()),
        },
        AnyValue::Float64(v) if v.fract() == 0.0 && v.abs() < 9.0e15 => {
            CellValue::Integer(v as i64)
        }
        AnyValue::String(s) => CellValue::Text(s.to_string()),
        AnyValue::StringOwned(s) => CellValue::Text(s.to_string()),
        other => CellValue::Text(any_to_string(other)),
    }
}

/// Converts a Polars `AnyValue` to a `String`; empty for `Null`.
fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => if b { "True" } else { "False" }.to_string(),
        other => {
            let s = other.to_string();
            // Display wraps strings of nested types in quotes
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    }
}

/// Reads every cell of a column.
pub fn column_cells(column: &Column) -> PolarsResult<Vec<CellValue>> {
    if is_mixed(column) {
        return mixed_cells(column);
    }
    let mut cells = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        cells.push(any_to_cell(column.get(idx)?));
    }
    Ok(cells)
}

/// Builds a `String` column from optional values.
pub fn text_column(name: &str, values: &[Option<String>]) -> Column {
    Series::new(name.into(), values).into_column()
}

/// Builds a column that keeps integer cells as integers next to text cells.
pub fn mixed_column(name: &str, cells: &[CellValue]) -> PolarsResult<Column> {
    let codes: Vec<Option<i64>> = cells
        .iter()
        .map(|cell| match cell {
            CellValue::Integer(code) => Some(*code),
            _ => None,
        })
        .collect();
    let texts: Vec<Option<&str>> = cells
        .iter()
        .map(|cell| match cell {
            CellValue::Text(text) => Some(text.as_str()),
            _ => None,
        })
        .collect();
    let fields = [
        Series::new(CODE_FIELD.into(), codes),
        Series::new(TEXT_FIELD.into(), texts),
    ];
    let chunked = StructChunked::from_series(name.into(), cells.len(), fields.iter())?;
    Ok(chunked.into_series().into_column())
}

/// Rebuilds any column as a mixed column with the same cells.
pub fn to_mixed_column(column: &Column) -> PolarsResult<Column> {
    if is_mixed(column) {
        return Ok(column.clone());
    }
    mixed_column(column.name().as_str(), &column_cells(column)?)
}

/// True for columns built by [`mixed_column`].
pub fn is_mixed(column: &Column) -> bool {
    matches!(column.dtype(), DataType::Struct(_))
}

fn mixed_cells(column: &Column) -> PolarsResult<Vec<CellValue>> {
    let fields = column.as_materialized_series().struct_()?;
    let codes = fields.field_by_name(CODE_FIELD)?;
    let texts = fields.field_by_name(TEXT_FIELD)?;
    Ok(codes
        .i64()?
        .into_iter()
        .zip(texts.str()?)
        .map(|cell| match cell {
            (Some(code), _) => CellValue::Integer(code),
            (None, Some(text)) => CellValue::Text(text.to_string()),
            (None, None) => CellValue::Missing,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_cell_integers() {
        assert_eq!(any_to_cell(AnyValue::Int64(4)), CellValue::Integer(4));
        assert_eq!(any_to_cell(AnyValue::UInt32(7)), CellValue::Integer(7));
        assert_eq!(any_to_cell(AnyValue::Float64(3.0)), CellValue::Integer(3));
    }

    #[test]
    fn test_any_to_cell_text_and_null() {
        assert_eq!(any_to_cell(AnyValue::Null), CellValue::Missing);
        assert_eq!(
            any_to_cell(AnyValue::String("A lot")),
            CellValue::Text("A lot".to_string())
        );
    }

    #[test]
    fn test_any_to_string() {
        assert_eq!(any_to_string(AnyValue::Null), "");
        assert_eq!(any_to_string(AnyValue::Int64(-2)), "-2");
        assert_eq!(any_to_string(AnyValue::Boolean(false)), "False");
    }

    #[test]
    fn test_column_round_trip() {
        let values = vec![Some("1".to_string()), None, Some("x".to_string())];
        let column = text_column("Q1", &values);
        assert_eq!(column.name().as_str(), "Q1");
        assert_eq!(
            column_cells(&column).unwrap(),
            vec![
                CellValue::Text("1".to_string()),
                CellValue::Missing,
                CellValue::Text("x".to_string())
            ]
        );
    }

    #[test]
    fn test_mixed_column_keeps_cell_types() {
        let cells = vec![
            CellValue::Integer(4),
            CellValue::Text("Sometimes".to_string()),
            CellValue::Missing,
        ];
        let column = mixed_column("Q3", &cells).unwrap();
        assert!(is_mixed(&column));
        assert_eq!(column.name().as_str(), "Q3");
        assert_eq!(column.len(), 3);
        assert_eq!(column_cells(&column).unwrap(), cells);
    }

    #[test]
    fn test_to_mixed_column_from_integers() {
        let column = Series::new("Q2".into(), &[Some(3i64), None]).into_column();
        assert!(!is_mixed(&column));
        let mixed = to_mixed_column(&column).unwrap();
        assert!(is_mixed(&mixed));
        assert_eq!(
            column_cells(&mixed).unwrap(),
            vec![CellValue::Integer(3), CellValue::Missing]
        );
    }

    #[test]
    fn test_column_cells_of_integers() {
        let column = Series::new("Q2".into(), &[Some(3i64), None]).into_column();
        assert_eq!(
            column_cells(&column).unwrap(),
            vec![CellValue::Integer(3), CellValue::Missing]
        );
    }
}
