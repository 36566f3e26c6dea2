//! CSV reading for survey exports.
//!
//! A survey export has three structural parts: the column-name row, one
//! metadata row restating each question, and the response rows.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::StringRecord;

use crate::error::{IngestError, Result};

use super::header::{normalize_cell, normalize_header};
use super::table::SourceTable;

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Pads short records with missing cells and drops cells beyond the header.
fn fit_record(record: &StringRecord, width: usize) -> Vec<Option<String>> {
    let mut row: Vec<Option<String>> = record.iter().take(width).map(normalize_cell).collect();
    row.resize(width, None);
    row
}

/// Reads one survey export.
///
/// Fails when the file has no column-name row, no metadata row, or two
/// columns with the same name. A file with only the two header rows is valid
/// and has no responses.
pub fn read_source_table(path: &Path) -> Result<SourceTable> {
    let file = open_file(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let parse_error = |e: csv::Error| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record.map_err(parse_error)?,
        None => {
            return Err(IngestError::EmptyCsv {
                path: path.to_path_buf(),
            });
        }
    };
    let columns: Vec<String> = header.iter().map(normalize_header).collect();
    if columns.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    let mut seen = BTreeSet::new();
    for column in &columns {
        if !seen.insert(column.as_str()) {
            return Err(IngestError::DuplicateColumn {
                column: column.clone(),
                path: path.to_path_buf(),
            });
        }
    }

    let width = columns.len();
    let metadata = match records.next() {
        Some(record) => fit_record(&record.map_err(parse_error)?, width),
        None => {
            return Err(IngestError::MissingMetadataRow {
                path: path.to_path_buf(),
            });
        }
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(parse_error)?;
        if record.len() > width {
            tracing::debug!(
                path = %path.display(),
                cells = record.len(),
                width,
                "record longer than header, extra cells ignored"
            );
        }
        rows.push(fit_record(&record, width));
    }

    tracing::debug!(
        path = %path.display(),
        columns = width,
        rows = rows.len(),
        "read export file"
    );

    Ok(SourceTable {
        path: path.to_path_buf(),
        columns,
        metadata,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_reads_three_structural_rows() {
        let file = create_temp_csv(
            "RecordedDate,Q1,Finished\nRecorded Date,How much?,Finished\n2024-01-01,A lot,True\n2024-01-02,,False\n",
        );
        let table = read_source_table(file.path()).unwrap();

        assert_eq!(table.columns, vec!["RecordedDate", "Q1", "Finished"]);
        assert_eq!(table.metadata_value("Q1"), Some("How much?"));
        assert_eq!(table.height(), 2);
        assert_eq!(table.rows[1][1], None);
        assert_eq!(table.rows[1][2], Some("False".to_string()));
    }

    #[test]
    fn test_quoted_multiline_metadata() {
        let file = create_temp_csv("Q1,Q2\n\"How much,\nreally?\",\"Second\"\n1,2\n");
        let table = read_source_table(file.path()).unwrap();

        assert_eq!(table.metadata_value("Q1"), Some("How much,\nreally?"));
        assert_eq!(table.height(), 1);
    }

    #[test]
    fn test_short_and_long_records_fit_header() {
        let file = create_temp_csv("A,B,C\na,b,c\n1\n1,2,3,4\n");
        let table = read_source_table(file.path()).unwrap();

        assert_eq!(table.rows[0], vec![Some("1".to_string()), None, None]);
        assert_eq!(table.rows[1].len(), 3);
    }

    #[test]
    fn test_strips_bom_from_first_column() {
        let file = create_temp_csv("\u{feff}StartDate,Q1\nStart,Q\nx,y\n");
        let table = read_source_table(file.path()).unwrap();
        assert_eq!(table.columns[0], "StartDate");
    }

    #[test]
    fn test_metadata_only_file_has_no_rows() {
        let file = create_temp_csv("Q1,Finished\nQuestion,Finished\n");
        let table = read_source_table(file.path()).unwrap();
        assert_eq!(table.height(), 0);
        assert_eq!(table.metadata.len(), 2);
    }

    #[test]
    fn test_empty_file() {
        let file = create_temp_csv("");
        let result = read_source_table(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_missing_metadata_row() {
        let file = create_temp_csv("Q1,Finished\n");
        let result = read_source_table(file.path());
        assert!(matches!(
            result,
            Err(IngestError::MissingMetadataRow { .. })
        ));
    }

    #[test]
    fn test_duplicate_column() {
        let file = create_temp_csv("Q1,Q1\na,b\n");
        let result = read_source_table(file.path());
        assert!(matches!(
            result,
            Err(IngestError::DuplicateColumn { ref column, .. }) if column == "Q1"
        ));
    }

    #[test]
    fn test_file_not_found() {
        let result = read_source_table(Path::new("/nonexistent/1_wave.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
