//! Survey response normalization.
//!
//! Converts free-text survey answers into ordinal integer codes, one column at
//! a time.
//!
//! # Overview
//!
//! Each eligible column goes through a two-stage classifier:
//!
//! 1. **Numeric extraction**: when every value carries a run of digits
//!    (`"3 - neutral"`, `"12"`), the column becomes those integers.
//! 2. **Vocabulary lookup**: otherwise each value is looked up in the
//!    Likert vocabulary (`"A lot"` → 4). Values outside the vocabulary keep
//!    their original text.
//!
//! The outcome is an explicit [`ColumnClass`]: `Numeric`, `Coded` (every value
//! resolved) or `Mixed` (some text survived; resolved values stay integers).
//!
//! # Example
//!
//! ```ignore
//! use wave_config::NormalizationConfig;
//! use wave_normalization::FieldNormalizer;
//!
//! let normalizer = FieldNormalizer::new(&NormalizationConfig::default())?;
//! let (columns, summary) = normalizer.normalize_columns(table.into_columns())?;
//! ```

mod classify;
mod error;
mod extract;
mod normalizer;
mod vocabulary;

// Error type
pub use error::NormalizationError;

// Classification
pub use classify::{ColumnClass, classify_column};
pub use extract::{ExtractionFailure, extract_numeric, first_digit_run};

// Execution
pub use normalizer::{FieldNormalizer, NormalizationSummary};
pub use vocabulary::Vocabulary;
