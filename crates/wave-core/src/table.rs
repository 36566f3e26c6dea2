//! The merged survey table.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;

use crate::error::Result;

/// Question text keyed by column name.
pub type MetadataRow = BTreeMap<String, Option<String>>;

/// Merged responses plus the single retained metadata row.
///
/// The metadata row lives beside the typed data so that integer columns stay
/// integers. It is `None` only when no export was merged.
#[derive(Debug, Clone)]
pub struct MergedTable {
    pub metadata: Option<MetadataRow>,
    pub data: DataFrame,
}

impl Default for MergedTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl MergedTable {
    pub fn new(metadata: Option<MetadataRow>, data: DataFrame) -> Self {
        Self { metadata, data }
    }

    pub fn empty() -> Self {
        Self {
            metadata: None,
            data: DataFrame::empty(),
        }
    }

    /// Number of response rows.
    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn width(&self) -> usize {
        self.data.width()
    }

    pub fn is_empty(&self) -> bool {
        self.data.width() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn metadata_value(&self, column: &str) -> Option<&str> {
        self.metadata.as_ref()?.get(column)?.as_deref()
    }

    /// The metadata row in data column order; `None` without a metadata row.
    pub fn metadata_cells(&self) -> Option<Vec<Option<String>>> {
        let metadata = self.metadata.as_ref()?;
        Some(
            self.data
                .get_column_names()
                .into_iter()
                .map(|name| metadata.get(name.as_str()).cloned().flatten())
                .collect(),
        )
    }

    /// Keeps exactly `columns`, in that order, in both the data and the
    /// metadata row.
    pub fn select_columns(self, columns: &[String]) -> Result<Self> {
        let data = self.data.select(columns.iter().map(String::as_str))?;
        let metadata = self.metadata.map(|mut metadata| {
            metadata.retain(|name, _| columns.contains(name));
            metadata
        });
        Ok(Self { metadata, data })
    }
}
