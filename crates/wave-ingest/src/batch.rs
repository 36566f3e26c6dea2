//! Batch identifiers derived from export file names.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Leading digits terminated by an underscore or whitespace, e.g. `12_wave.csv`.
static BATCH_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)[_\s]").expect("Invalid batch id regex"));

/// The wave number of one export file, kept as the digit string found in its name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BatchId(String);

impl BatchId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the batch identifier from a file name (not a full path).
///
/// Returns `None` when the name does not start with digits followed by `_`
/// or whitespace.
pub fn extract_batch_id(file_name: &str) -> Option<BatchId> {
    BATCH_ID_REGEX
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| BatchId(m.as_str().to_string()))
}
