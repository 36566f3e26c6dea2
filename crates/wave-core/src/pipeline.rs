//! End-to-end merge pipeline.
//!
//! # Stages
//!
//! 1. **discover** - list the exports in the folder
//! 2. **merge** - read, filter, stamp, normalize and append each export
//! 3. **reorganize** - canonical column order
//! 4. **prune** - drop bookkeeping and identifying columns
//!
//! Writing the result is left to the caller.

use std::path::Path;

use tracing::{info, info_span};
use wave_config::WaveConfig;
use wave_ingest::discover_sources;

use crate::error::Result;
use crate::merge::{MergeReport, merge_sources};
use crate::prune::prune;
use crate::reorganize::reorganize;
use crate::table::MergedTable;

/// The final table and what went into it.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub table: MergedTable,
    pub report: MergeReport,
}

pub fn run_pipeline(folder: &Path, config: &WaveConfig) -> Result<PipelineOutcome> {
    let sources = {
        let _span = info_span!("discover", folder = %folder.display()).entered();
        let sources = discover_sources(folder)?;
        info!(files = sources.len(), "Discovered exports");
        sources
    };

    let (table, report) = {
        let _span = info_span!("merge", files = sources.len()).entered();
        let (table, report) = merge_sources(&sources, config)?;
        info!(
            rows = report.rows_kept(),
            dropped = report.rows_dropped(),
            columns = table.width(),
            mixed_columns = report.normalization.mixed,
            "Merged exports"
        );
        (table, report)
    };

    let table = {
        let _span = info_span!("reorganize").entered();
        reorganize(table, &config.layout)?
    };

    let table = {
        let _span = info_span!("prune").entered();
        let table = prune(table, &config.prune)?;
        info!(columns = table.width(), "Pruned columns");
        table
    };

    Ok(PipelineOutcome { table, report })
}
