//! Survey wave merging.
//!
//! Turns a folder of per-wave exports into one [`MergedTable`]:
//!
//! 1. **Merge** - read each export, keep the first file's metadata row, stamp
//!    the batch ID, drop unfinished responses, normalize and append
//! 2. **Reorganize** - ID, RecordedDate, Duration, then `Q` columns by number,
//!    then the rest, then `Attention` columns
//! 3. **Prune** - remove bookkeeping and identifying columns
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use wave_config::WaveConfig;
//! use wave_core::run_pipeline;
//!
//! let outcome = run_pipeline(Path::new("exports"), &WaveConfig::default())?;
//! println!("{} rows", outcome.table.height());
//! ```

mod error;
mod merge;
mod pipeline;
mod prune;
mod reorganize;
mod table;

pub use error::{MergeError, Result};
pub use merge::{
    Contribution, FileReport, MergeReport, MergeState, RowMerger, contribute, merge_sources,
};
pub use pipeline::{PipelineOutcome, run_pipeline};
pub use prune::{prune, retained_columns};
pub use reorganize::{canonical_order, question_number, reorganize};
pub use table::{MergedTable, MetadataRow};
