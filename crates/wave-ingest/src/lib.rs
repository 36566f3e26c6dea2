//! Survey export ingestion.
//!
//! This crate finds the per-wave export files in a folder and parses each one
//! into a [`SourceTable`]: the column-name row, the question-text metadata row
//! and the response rows, all kept as raw optional text.
//!
//! # Features
//!
//! - **File Discovery**: list `.csv` files in a stable, lexicographic order
//! - **Batch Identifiers**: derive the wave number from a `12_wave.csv` style name
//! - **CSV Loading**: read the three structural rows of a survey export
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use wave_ingest::{discover_sources, read_source_table};
//!
//! for source in discover_sources(Path::new("exports"))? {
//!     let table = read_source_table(&source.path)?;
//!     println!("{:?}: {} rows", source.batch_id, table.height());
//! }
//! ```

mod batch;
mod discovery;
mod error;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === Batch Identifiers ===
pub use batch::{BatchId, extract_batch_id};

// === CSV Reading ===
pub use source::{SourceTable, normalize_header, read_source_table};

// === File Discovery ===
pub use discovery::{SourceFile, discover_sources, list_csv_files};
