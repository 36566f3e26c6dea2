//! Numeric code extraction.

use std::sync::LazyLock;

use regex::Regex;
use wave_common::CellValue;

static DIGIT_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("Invalid digit run regex"));

/// Returns the first run of ASCII digits in `value` as an integer.
///
/// `"3 - neutral"` → 3, `"Level 12 of 20"` → 12. Runs too long for `i64` count
/// as no match.
pub fn first_digit_run(value: &str) -> Option<i64> {
    DIGIT_RUN_REGEX.find(value)?.as_str().parse().ok()
}

/// The first value of a column that carried no digit run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionFailure {
    pub row: usize,
    /// `None` when the cell was missing.
    pub value: Option<String>,
}

/// Extracts a digit code from every cell of a column.
///
/// Succeeds only when every row yields a code; a missing cell or a text value
/// without digits fails the whole column. Integer cells are their own code. An
/// empty column succeeds.
pub fn extract_numeric(cells: &[CellValue]) -> Result<Vec<i64>, ExtractionFailure> {
    cells
        .iter()
        .enumerate()
        .map(|(row, cell)| match cell {
            CellValue::Integer(code) => Ok(*code),
            CellValue::Text(text) => first_digit_run(text).ok_or_else(|| ExtractionFailure {
                row,
                value: Some(text.clone()),
            }),
            CellValue::Missing => Err(ExtractionFailure { row, value: None }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(values: &[Option<&str>]) -> Vec<CellValue> {
        values
            .iter()
            .map(|v| match v {
                Some(text) => CellValue::Text((*text).to_string()),
                None => CellValue::Missing,
            })
            .collect()
    }

    #[test]
    fn test_first_digit_run() {
        assert_eq!(first_digit_run("3 - neutral"), Some(3));
        assert_eq!(first_digit_run("Level 12 of 20"), Some(12));
        assert_eq!(first_digit_run("007"), Some(7));
        assert_eq!(first_digit_run("A lot"), None);
        assert_eq!(first_digit_run(""), None);
        assert_eq!(first_digit_run("99999999999999999999999"), None);
    }

    #[test]
    fn test_extract_numeric_all_rows() {
        let values = col(&[Some("1"), Some("5 - Strongly agree"), Some("x2")]);
        assert_eq!(extract_numeric(&values), Ok(vec![1, 5, 2]));
    }

    #[test]
    fn test_extract_numeric_fails_on_text() {
        let values = col(&[Some("1"), Some("A lot")]);
        assert_eq!(
            extract_numeric(&values),
            Err(ExtractionFailure {
                row: 1,
                value: Some("A lot".to_string())
            })
        );
    }

    #[test]
    fn test_extract_numeric_fails_on_missing() {
        let values = col(&[None, Some("1")]);
        assert_eq!(
            extract_numeric(&values),
            Err(ExtractionFailure { row: 0, value: None })
        );
    }

    #[test]
    fn test_extract_numeric_keeps_integer_cells() {
        let cells = vec![CellValue::Integer(4), CellValue::Text("2 - rarely".to_string())];
        assert_eq!(extract_numeric(&cells), Ok(vec![4, 2]));
    }

    #[test]
    fn test_extract_numeric_empty_column() {
        assert_eq!(extract_numeric(&[]), Ok(vec![]));
    }
}
