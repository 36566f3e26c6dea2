//! Column pruning.

use tracing::debug;
use wave_config::PruneConfig;

use crate::error::Result;
use crate::table::MergedTable;

/// The columns that survive pruning, in their current order.
pub fn retained_columns(columns: &[String], config: &PruneConfig) -> Vec<String> {
    columns
        .iter()
        .filter(|column| !config.contains(column))
        .cloned()
        .collect()
}

/// Removes the configured columns; absent ones are ignored.
pub fn prune(table: MergedTable, config: &PruneConfig) -> Result<MergedTable> {
    let columns = table.column_names();
    let keep = retained_columns(&columns, config);
    debug!(removed = columns.len() - keep.len(), "Pruned columns");
    table.select_columns(&keep)
}
