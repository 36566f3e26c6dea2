//! Column name and cell clean-up.

/// Normalizes a column name: strips a UTF-8 byte-order mark and surrounding
/// whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

/// Converts a raw cell to an optional value. Empty cells are missing; any
/// other text, including its spacing, is kept as exported.
pub(crate) fn normalize_cell(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
