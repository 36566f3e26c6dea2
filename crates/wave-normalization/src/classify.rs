//! Two-stage column classification.

use std::collections::BTreeSet;

use polars::prelude::{Column, IntoColumn, NamedFrom, PolarsResult, Series};
use wave_common::{CellValue, mixed_column};

use crate::extract::extract_numeric;
use crate::vocabulary::Vocabulary;

/// How a column came out of normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnClass {
    /// Every row carried a digit run.
    Numeric(Vec<i64>),
    /// Every present value resolved to a code; missing cells stay missing.
    Coded(Vec<Option<i64>>),
    /// At least one value kept its text. Resolved values stay integers.
    Mixed {
        values: Vec<CellValue>,
        unmapped: BTreeSet<String>,
    },
}

impl ColumnClass {
    /// Builds a Polars column: `Int64` for numeric and coded, a mixed
    /// code/text column otherwise.
    pub fn into_column(self, name: &str) -> PolarsResult<Column> {
        match self {
            ColumnClass::Numeric(values) => Ok(Series::new(name.into(), values).into_column()),
            ColumnClass::Coded(values) => Ok(Series::new(name.into(), values).into_column()),
            ColumnClass::Mixed { values, .. } => mixed_column(name, &values),
        }
    }
}

/// Classifies one column of cells.
///
/// Stage one extracts a digit code from every row. If any row lacks one, stage
/// two looks each text value up in the vocabulary; text outside it is kept
/// unchanged and the column becomes [`ColumnClass::Mixed`].
///
/// A column that already holds both codes and text has been through stage
/// two and goes straight back to it.
pub fn classify_column(cells: &[CellValue], vocabulary: &Vocabulary) -> ColumnClass {
    let has_codes = cells.iter().any(|cell| matches!(cell, CellValue::Integer(_)));
    let has_text = cells.iter().any(|cell| matches!(cell, CellValue::Text(_)));
    if has_codes && has_text {
        return lookup_column(cells, vocabulary);
    }
    match extract_numeric(cells) {
        Ok(codes) => ColumnClass::Numeric(codes),
        Err(_) => lookup_column(cells, vocabulary),
    }
}

fn lookup_column(cells: &[CellValue], vocabulary: &Vocabulary) -> ColumnClass {
    let resolved: Vec<CellValue> = cells
        .iter()
        .map(|cell| match cell {
            CellValue::Text(text) => vocabulary
                .lookup(text)
                .map_or_else(|| cell.clone(), CellValue::Integer),
            other => other.clone(),
        })
        .collect();

    let unmapped: BTreeSet<String> = resolved
        .iter()
        .filter_map(|cell| match cell {
            CellValue::Text(text) => Some(text.clone()),
            _ => None,
        })
        .collect();

    if !unmapped.is_empty() {
        return ColumnClass::Mixed {
            values: resolved,
            unmapped,
        };
    }

    let codes = resolved
        .into_iter()
        .map(|cell| match cell {
            CellValue::Integer(code) => Some(code),
            _ => None,
        })
        .collect();
    ColumnClass::Coded(codes)
}
