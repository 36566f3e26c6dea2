//! In-memory form of one survey export.

use std::path::PathBuf;

/// One parsed export file.
///
/// `metadata` is the question-text row that follows the column names; `rows`
/// are the responses. Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTable {
    pub path: PathBuf,
    pub columns: Vec<String>,
    pub metadata: Vec<Option<String>>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl SourceTable {
    /// Number of response rows (the metadata row is not counted).
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Metadata text for a column, if the column exists and the cell is set.
    pub fn metadata_value(&self, name: &str) -> Option<&str> {
        let idx = self.column_index(name)?;
        self.metadata.get(idx)?.as_deref()
    }

    /// Keeps only rows matching `keep`; returns how many were dropped.
    pub fn retain_rows<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&[Option<String>]) -> bool,
    {
        let before = self.rows.len();
        self.rows.retain(|row| keep(row));
        before - self.rows.len()
    }

    /// Splits the table into `(name, values)` pairs in column order.
    pub fn into_columns(self) -> Vec<(String, Vec<Option<String>>)> {
        let mut values: Vec<Vec<Option<String>>> = self
            .columns
            .iter()
            .map(|_| Vec::with_capacity(self.rows.len()))
            .collect();
        for row in self.rows {
            for (idx, cell) in row.into_iter().enumerate() {
                if let Some(column) = values.get_mut(idx) {
                    column.push(cell);
                }
            }
        }
        self.columns.into_iter().zip(values).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn sample() -> SourceTable {
        SourceTable {
            path: PathBuf::from("1_wave.csv"),
            columns: vec!["Q1".to_string(), "Finished".to_string()],
            metadata: vec![cell("How often?"), None],
            rows: vec![
                vec![cell("A lot"), cell("True")],
                vec![None, cell("False")],
                vec![cell("None"), cell("True")],
            ],
        }
    }

    #[test]
    fn test_lookup() {
        let table = sample();
        assert_eq!(table.height(), 3);
        assert_eq!(table.column_index("Finished"), Some(1));
        assert_eq!(table.column_index("Q2"), None);
        assert_eq!(table.metadata_value("Q1"), Some("How often?"));
        assert_eq!(table.metadata_value("Finished"), None);
    }

    #[test]
    fn test_retain_rows_counts_dropped() {
        let mut table = sample();
        let dropped = table.retain_rows(|row| row[1].as_deref() != Some("False"));
        assert_eq!(dropped, 1);
        assert_eq!(table.height(), 2);
        assert_eq!(table.rows[1][0], cell("None"));
    }

    #[test]
    fn test_into_columns() {
        let columns = sample().into_columns();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].0, "Q1");
        assert_eq!(columns[0].1, vec![cell("A lot"), None, cell("None")]);
        assert_eq!(columns[1].1.len(), 3);
    }
}
