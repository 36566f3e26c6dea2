//! Row merging across exports.
//!
//! Each export contributes its filtered, ID-stamped and normalized rows. The
//! first export also contributes the metadata row and fixes the expected set
//! of columns; [`MergeState`] records which of the two phases the merge is in.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use polars::prelude::{Column, DataFrame};
use tracing::debug;
use wave_common::{is_mixed, to_mixed_column};
use wave_config::{CompletionFilter, WaveConfig};
use wave_ingest::{BatchId, SourceFile, SourceTable, read_source_table};
use wave_normalization::{FieldNormalizer, NormalizationSummary};

use crate::error::{MergeError, Result};
use crate::table::{MergedTable, MetadataRow};

/// One export's rows, ready to append.
#[derive(Debug, Clone)]
pub struct Contribution {
    /// Column names as they appear in the export, before ID stamping.
    pub source_columns: Vec<String>,
    pub metadata: MetadataRow,
    pub data: DataFrame,
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub normalization: NormalizationSummary,
}

/// Builds one export's contribution.
///
/// Rows whose completion column holds the unfinished marker are dropped, the
/// ID column is stamped with `batch_id` (null when there is none), and the
/// remaining columns are normalized.
pub fn contribute(
    mut table: SourceTable,
    batch_id: Option<&BatchId>,
    id_column: &str,
    filter: &CompletionFilter,
    normalizer: &FieldNormalizer,
) -> Result<Contribution> {
    let Some(finished) = table.column_index(&filter.column) else {
        return Err(MergeError::MissingColumn {
            path: table.path.clone(),
            column: filter.column.clone(),
        });
    };

    let rows_read = table.height();
    let rows_dropped = table.retain_rows(|row| {
        !filter.is_unfinished(row.get(finished).and_then(Option::as_deref))
    });

    let source_columns = table.columns.clone();
    let mut metadata: MetadataRow = table
        .columns
        .iter()
        .cloned()
        .zip(table.metadata.iter().cloned())
        .collect();
    metadata.entry(id_column.to_string()).or_insert(None);

    let height = table.height();
    let mut columns = table.into_columns();
    stamp_batch_id(&mut columns, batch_id, id_column, height);

    let (columns, normalization) = normalizer.normalize_columns(columns)?;
    let data = DataFrame::new(columns)?;

    Ok(Contribution {
        source_columns,
        metadata,
        data,
        rows_read,
        rows_dropped,
        normalization,
    })
}

/// Sets every row's ID to the batch ID.
///
/// An existing ID column is only overwritten when there is a batch ID.
fn stamp_batch_id(
    columns: &mut Vec<(String, Vec<Option<String>>)>,
    batch_id: Option<&BatchId>,
    id_column: &str,
    height: usize,
) {
    let values = vec![batch_id.map(|id| id.as_str().to_string()); height];
    match columns.iter_mut().find(|(name, _)| name == id_column) {
        Some((_, existing)) if batch_id.is_some() => *existing = values,
        Some(_) => {}
        None => columns.push((id_column.to_string(), values)),
    }
}

/// Per-export row counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub batch_id: Option<String>,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

impl FileReport {
    pub fn rows_kept(&self) -> usize {
        self.rows_read - self.rows_dropped
    }
}

/// What the merge did, for logging and the run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub files: Vec<FileReport>,
    pub normalization: NormalizationSummary,
}

impl MergeReport {
    pub fn rows_read(&self) -> usize {
        self.files.iter().map(|file| file.rows_read).sum()
    }

    pub fn rows_dropped(&self) -> usize {
        self.files.iter().map(|file| file.rows_dropped).sum()
    }

    pub fn rows_kept(&self) -> usize {
        self.rows_read() - self.rows_dropped()
    }
}

/// Progress of a merge.
#[derive(Debug, Clone, Default)]
pub enum MergeState {
    /// No export merged yet; the next one supplies the metadata row.
    #[default]
    AwaitingFirst,
    /// At least one export merged.
    Appending {
        metadata: MetadataRow,
        /// Columns of the first export; later exports must match them.
        columns: Vec<String>,
        data: DataFrame,
    },
}

impl MergeState {
    pub fn is_first(&self) -> bool {
        matches!(self, MergeState::AwaitingFirst)
    }
}

/// Appends exports one at a time.
#[derive(Debug, Clone)]
pub struct RowMerger {
    normalizer: FieldNormalizer,
    filter: CompletionFilter,
    id_column: String,
    state: MergeState,
    report: MergeReport,
}

impl RowMerger {
    /// Columns on the prune list are not normalized; they never reach the
    /// output.
    pub fn new(config: &WaveConfig) -> Result<Self> {
        let normalizer = FieldNormalizer::new(&config.normalization)?
            .with_skipped_columns(config.prune.columns.iter().cloned());
        Ok(Self {
            normalizer,
            filter: config.filter.clone(),
            id_column: config.layout.id.clone(),
            state: MergeState::AwaitingFirst,
            report: MergeReport::default(),
        })
    }

    pub fn state(&self) -> &MergeState {
        &self.state
    }

    pub fn push_source(&mut self, source: &SourceFile) -> Result<()> {
        let table = read_source_table(&source.path)?;
        self.push_table(table, source.batch_id.as_ref())
    }

    pub fn push_table(&mut self, table: SourceTable, batch_id: Option<&BatchId>) -> Result<()> {
        let path = table.path.clone();
        if let MergeState::Appending { columns, .. } = &self.state {
            check_schema(&path, columns, &table.columns)?;
        }

        let contribution = contribute(
            table,
            batch_id,
            &self.id_column,
            &self.filter,
            &self.normalizer,
        )?;
        debug!(
            path = %path.display(),
            batch_id = batch_id.map(BatchId::as_str),
            rows = contribution.rows_read,
            dropped = contribution.rows_dropped,
            first = self.state.is_first(),
            "Merging export"
        );

        self.report.normalization += contribution.normalization;
        self.report.files.push(FileReport {
            path,
            batch_id: batch_id.map(ToString::to_string),
            rows_read: contribution.rows_read,
            rows_dropped: contribution.rows_dropped,
        });

        if let MergeState::Appending { data, .. } = &mut self.state {
            append(data, &contribution.data)?;
        } else {
            self.state = MergeState::Appending {
                metadata: contribution.metadata,
                columns: contribution.source_columns,
                data: contribution.data,
            };
        }
        Ok(())
    }

    pub fn finish(self) -> (MergedTable, MergeReport) {
        let table = match self.state {
            MergeState::AwaitingFirst => MergedTable::empty(),
            MergeState::Appending { metadata, data, .. } => MergedTable::new(Some(metadata), data),
        };
        (table, self.report)
    }
}

/// Merges exports in the given order.
pub fn merge_sources(
    sources: &[SourceFile],
    config: &WaveConfig,
) -> Result<(MergedTable, MergeReport)> {
    let mut merger = RowMerger::new(config)?;
    for source in sources {
        merger.push_source(source)?;
    }
    Ok(merger.finish())
}

fn check_schema(path: &Path, expected: &[String], found: &[String]) -> Result<()> {
    let expected: BTreeSet<&String> = expected.iter().collect();
    let found: BTreeSet<&String> = found.iter().collect();
    if expected == found {
        return Ok(());
    }
    Err(MergeError::SchemaMismatch {
        path: path.to_path_buf(),
        missing: expected.difference(&found).map(ToString::to_string).collect(),
        unexpected: found.difference(&expected).map(ToString::to_string).collect(),
    })
}

/// Appends `other` below `data`, aligning column order and types.
fn append(data: &mut DataFrame, other: &DataFrame) -> Result<()> {
    let names = data.get_column_names_owned();
    let mut other = other.select(names.iter().cloned())?;

    for name in &names {
        let left = data.column(name.as_str())?;
        let right = other.column(name.as_str())?;
        if left.dtype() == right.dtype() {
            continue;
        }
        debug!(
            column = %name,
            left = %left.dtype(),
            right = %right.dtype(),
            "Aligning column types across exports"
        );
        let (left, right) = align_types(left, right)?;
        data.with_column(left)?;
        other.with_column(right)?;
    }

    data.vstack_mut(&other)?;
    Ok(())
}

/// An all-null side adopts the other side's type; otherwise both become
/// mixed columns, which keep integer cells as integers.
fn align_types(left: &Column, right: &Column) -> Result<(Column, Column)> {
    if right.null_count() == right.len() {
        Ok((left.clone(), conform(right, left)?))
    } else if left.null_count() == left.len() {
        Ok((conform(left, right)?, right.clone()))
    } else {
        Ok((to_mixed_column(left)?, to_mixed_column(right)?))
    }
}

fn conform(column: &Column, like: &Column) -> Result<Column> {
    if is_mixed(like) {
        Ok(to_mixed_column(column)?)
    } else {
        Ok(column.cast(like.dtype())?)
    }
}
