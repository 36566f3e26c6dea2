//! Per-table normalization driver.

use std::collections::BTreeSet;
use std::ops::AddAssign;

use polars::prelude::Column;
use tracing::{debug, warn};
use wave_common::{CellValue, column_cells, text_column};
use wave_config::NormalizationConfig;

use crate::classify::{ColumnClass, classify_column};
use crate::error::NormalizationError;
use crate::vocabulary::Vocabulary;

/// Counts of how columns were treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationSummary {
    pub numeric: usize,
    pub coded: usize,
    pub mixed: usize,
    /// Excluded or skipped columns, passed through as text.
    pub untouched: usize,
    /// Distinct unmapped values across all mixed columns.
    pub unmapped_values: usize,
}

impl NormalizationSummary {
    fn record(&mut self, class: &ColumnClass) {
        match class {
            ColumnClass::Numeric(_) => self.numeric += 1,
            ColumnClass::Coded(_) => self.coded += 1,
            ColumnClass::Mixed { unmapped, .. } => {
                self.mixed += 1;
                self.unmapped_values += unmapped.len();
            }
        }
    }
}

impl AddAssign for NormalizationSummary {
    fn add_assign(&mut self, other: Self) {
        self.numeric += other.numeric;
        self.coded += other.coded;
        self.mixed += other.mixed;
        self.untouched += other.untouched;
        self.unmapped_values += other.unmapped_values;
    }
}

/// Converts free-text response columns into ordinal codes.
///
/// Columns whose name starts with an excluded prefix, or that were registered
/// through [`FieldNormalizer::with_skipped_columns`], are passed through as
/// text.
#[derive(Debug, Clone)]
pub struct FieldNormalizer {
    vocabulary: Vocabulary,
    config: NormalizationConfig,
    skipped: BTreeSet<String>,
}

impl FieldNormalizer {
    pub fn new(config: &NormalizationConfig) -> Result<Self, NormalizationError> {
        Ok(Self {
            vocabulary: Vocabulary::from_config(config)?,
            config: config.clone(),
            skipped: BTreeSet::new(),
        })
    }

    /// Leaves these columns untouched in addition to the excluded prefixes.
    #[must_use]
    pub fn with_skipped_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skipped.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn is_eligible(&self, column: &str) -> bool {
        !self.skipped.contains(column) && !self.config.is_excluded(column)
    }

    /// Classifies one column; `None` when the column is not eligible.
    pub fn normalize_column(&self, name: &str, cells: &[CellValue]) -> Option<ColumnClass> {
        if !self.is_eligible(name) {
            return None;
        }
        let class = classify_column(cells, &self.vocabulary);
        if let ColumnClass::Mixed { unmapped, .. } = &class {
            warn!(
                column = %name,
                unmapped = unmapped.len(),
                "Values outside the vocabulary were kept as text"
            );
            debug!(column = %name, values = ?unmapped, "Unmapped values");
        }
        Some(class)
    }

    /// Normalizes a table given as `(name, values)` pairs, preserving order.
    pub fn normalize_columns(
        &self,
        columns: Vec<(String, Vec<Option<String>>)>,
    ) -> Result<(Vec<Column>, NormalizationSummary), NormalizationError> {
        let mut summary = NormalizationSummary::default();
        let mut normalized = Vec::with_capacity(columns.len());
        for (name, values) in columns {
            if !self.is_eligible(&name) {
                summary.untouched += 1;
                normalized.push(text_column(&name, &values));
                continue;
            }
            let cells: Vec<CellValue> = values.into_iter().map(CellValue::from).collect();
            if let Some(class) = self.normalize_column(&name, &cells) {
                summary.record(&class);
                normalized.push(class.into_column(&name)?);
            }
        }
        Ok((normalized, summary))
    }

    /// Normalizes an existing Polars column.
    ///
    /// Integer cells are kept as codes, so an already normalized column comes
    /// out unchanged.
    pub fn normalize_existing(&self, column: &Column) -> Result<Column, NormalizationError> {
        let name = column.name().to_string();
        let cells = column_cells(column)?;
        match self.normalize_column(&name, &cells) {
            Some(class) => Ok(class.into_column(&name)?),
            None => Ok(column.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;
    use proptest::prelude::*;
    use wave_common::is_mixed;

    fn normalizer() -> FieldNormalizer {
        FieldNormalizer::new(&NormalizationConfig::default()).expect("default config")
    }

    fn col(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(ToString::to_string)).collect()
    }

    fn cells(values: &[Option<&str>]) -> Vec<CellValue> {
        col(values).into_iter().map(CellValue::from).collect()
    }

    #[test]
    fn test_excluded_prefixes() {
        let normalizer = normalizer();
        assert!(!normalizer.is_eligible("RecordedDate"));
        assert!(!normalizer.is_eligible("Duration (in seconds)"));
        assert!(!normalizer.is_eligible("ID"));
        assert!(normalizer.is_eligible("Q1"));
        assert!(normalizer.is_eligible("Attention1"));
    }

    #[test]
    fn test_skipped_columns() {
        let normalizer = normalizer().with_skipped_columns(["Finished"]);
        assert!(!normalizer.is_eligible("Finished"));
        assert!(normalizer.normalize_column("Finished", &cells(&[Some("True")])).is_none());
    }

    #[test]
    fn test_normalize_columns_keeps_order_and_types() {
        let normalizer = normalizer();
        let (columns, summary) = normalizer.normalize_columns(vec![
            ("RecordedDate".to_string(), col(&[Some("2024-01-01 10:00:00")])),
            ("Q1".to_string(), col(&[Some("A lot")])),
            ("Q2".to_string(), col(&[Some("5")])),
            ("Q3".to_string(), col(&[Some("Sometimes")])),
        ])
        .expect("normalize");

        let names: Vec<&str> = columns.iter().map(|c| c.name().as_str()).collect();
        assert_eq!(names, vec!["RecordedDate", "Q1", "Q2", "Q3"]);
        assert_eq!(columns[0].dtype(), &DataType::String);
        assert_eq!(columns[1].dtype(), &DataType::Int64);
        assert_eq!(columns[2].dtype(), &DataType::Int64);
        assert!(is_mixed(&columns[3]));
        assert_eq!(
            summary,
            NormalizationSummary {
                numeric: 1,
                coded: 1,
                mixed: 1,
                untouched: 1,
                unmapped_values: 1,
            }
        );
    }

    #[test]
    fn test_date_column_is_not_numeric() {
        let normalizer = normalizer();
        let (columns, _) = normalizer
            .normalize_columns(vec![("RecordedDate".to_string(), col(&[Some("2024-05-01")]))])
            .expect("normalize");
        let cells = column_cells(&columns[0]).expect("cells");
        assert_eq!(cells, vec![CellValue::Text("2024-05-01".to_string())]);
    }

    #[test]
    fn test_normalize_existing_is_stable() {
        let normalizer = normalizer();
        let (columns, _) = normalizer
            .normalize_columns(vec![(
                "Q1".to_string(),
                col(&[Some("A lot"), None, Some("Often")]),
            )])
            .expect("normalize");
        let again = normalizer.normalize_existing(&columns[0]).expect("renormalize");
        assert_eq!(again.dtype(), &DataType::Int64);
        assert_eq!(
            column_cells(&again).expect("cells"),
            column_cells(&columns[0]).expect("cells")
        );
    }

    fn response() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some("A great deal".to_string())),
            Just(Some("Not at all".to_string())),
            Just(Some("Sometimes".to_string())),
            "[a-z ]{0,6}[0-9]{1,3}[a-z ]{0,6}".prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(values in prop::collection::vec(response(), 0..20)) {
            let normalizer = normalizer();
            let (columns, _) = normalizer
                .normalize_columns(vec![("Q7".to_string(), values)])
                .expect("normalize");
            let once = &columns[0];
            let twice = normalizer.normalize_existing(once).expect("renormalize");
            prop_assert_eq!(once.dtype(), twice.dtype());
            prop_assert_eq!(
                column_cells(once).expect("cells"),
                column_cells(&twice).expect("cells")
            );
        }

        #[test]
        fn vocabulary_values_always_resolve(
            picks in prop::collection::vec(0usize..9, 1..20)
        ) {
            let config = NormalizationConfig::default();
            let values: Vec<Option<String>> = picks
                .iter()
                .map(|&i| Some(config.vocabulary[i].text.clone()))
                .collect();
            let expected: Vec<Option<i64>> =
                picks.iter().map(|&i| Some(config.vocabulary[i].code)).collect();
            let cells: Vec<CellValue> = values.into_iter().map(CellValue::from).collect();
            let class = normalizer().normalize_column("Q1", &cells);
            prop_assert_eq!(class, Some(ColumnClass::Coded(expected)));
        }
    }
}
