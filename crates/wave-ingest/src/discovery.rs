//! Export file discovery.

use std::path::{Path, PathBuf};

use crate::batch::{BatchId, extract_batch_id};
use crate::error::{IngestError, Result};

/// One export file found in the input folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Wave number from the file name; `None` leaves the ID column null.
    pub batch_id: Option<BatchId>,
}

impl SourceFile {
    pub fn new(path: PathBuf) -> Self {
        let batch_id = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(extract_batch_id);
        Self { path, batch_id }
    }

    /// File name for log fields and error messages.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("unknown")
    }
}

/// Lists the `.csv` files (case-insensitive extension) directly inside `dir`.
///
/// Files are sorted by name so the first file, whose metadata row is kept,
/// is the same on every run.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let read_error = |e: std::io::Error| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Lists the export files in `dir` and derives their batch identifiers.
pub fn discover_sources(dir: &Path) -> Result<Vec<SourceFile>> {
    let sources: Vec<SourceFile> = list_csv_files(dir)?
        .into_iter()
        .map(SourceFile::new)
        .collect();

    for source in &sources {
        match &source.batch_id {
            Some(batch_id) => tracing::debug!(
                file = source.file_name(),
                batch_id = %batch_id,
                "discovered export file"
            ),
            None => tracing::debug!(
                file = source.file_name(),
                "discovered export file without batch id"
            ),
        }
    }
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir(names: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in names {
            std::fs::write(dir.path().join(name), "A\nLabel A\n1\n").unwrap();
        }
        dir
    }

    #[test]
    fn test_list_csv_files_sorted_and_filtered() {
        let dir = create_test_dir(&["2_wave.csv", "1_wave.CSV", "notes.txt", "10_wave.csv"]);
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let files = list_csv_files(dir.path()).unwrap();
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();

        // Lexicographic, not numeric
        assert_eq!(names, vec!["10_wave.csv", "1_wave.CSV", "2_wave.csv"]);
    }

    #[test]
    fn test_list_csv_files_empty_dir() {
        let dir = TempDir::new().unwrap();
        let files = list_csv_files(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_list_csv_files_not_a_directory() {
        let dir = create_test_dir(&["1_wave.csv"]);
        let result = list_csv_files(&dir.path().join("1_wave.csv"));
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_discover_sources_batch_ids() {
        let dir = create_test_dir(&["1_wave.csv", "pilot.csv"]);
        let sources = discover_sources(dir.path()).unwrap();

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].file_name(), "1_wave.csv");
        assert_eq!(sources[0].batch_id.as_ref().map(BatchId::as_str), Some("1"));
        assert_eq!(sources[1].file_name(), "pilot.csv");
        assert!(sources[1].batch_id.is_none());
    }
}
