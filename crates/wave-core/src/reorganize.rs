//! Canonical column order.

use tracing::warn;
use wave_config::ColumnLayout;
use wave_normalization::first_digit_run;

use crate::error::Result;
use crate::table::MergedTable;

/// Number of a question column: the first digit run anywhere in its name.
///
/// `None` when the name lacks the question prefix or has no digits.
pub fn question_number(column: &str, layout: &ColumnLayout) -> Option<i64> {
    if !column.starts_with(layout.question_prefix.as_str()) {
        return None;
    }
    first_digit_run(column)
}

/// Computes the canonical order of `columns`.
///
/// ID, RecordedDate and Duration come first (exact name, else the first
/// column starting with that name; absent ones are skipped), then question
/// columns by number, then everything else in its current order, then
/// attention columns. Every input column appears exactly once.
pub fn canonical_order(columns: &[String], layout: &ColumnLayout) -> Vec<String> {
    let mut placed = vec![false; columns.len()];
    let mut order = Vec::with_capacity(columns.len());

    for name in layout.leading() {
        let unplaced = |idx: &usize| !placed[*idx];
        let found = (0..columns.len())
            .filter(unplaced)
            .find(|&idx| columns[idx] == name)
            .or_else(|| {
                (0..columns.len())
                    .filter(unplaced)
                    .find(|&idx| columns[idx].starts_with(name))
            });
        if let Some(idx) = found {
            placed[idx] = true;
            order.push(columns[idx].clone());
        }
    }

    let mut questions = Vec::new();
    let mut remaining = Vec::new();
    let mut attention = Vec::new();
    for (idx, column) in columns.iter().enumerate() {
        if placed[idx] {
            continue;
        }
        if let Some(number) = question_number(column, layout) {
            questions.push((number, column.clone()));
        } else if column.starts_with(layout.attention_prefix.as_str()) {
            attention.push(column.clone());
        } else {
            if column.starts_with(layout.question_prefix.as_str()) {
                warn!(column = %column, "Question column has no number; keeping it with the other columns");
            }
            remaining.push(column.clone());
        }
    }
    questions.sort_by_key(|(number, _)| *number);

    order.extend(questions.into_iter().map(|(_, column)| column));
    order.extend(remaining);
    order.extend(attention);
    order
}

/// Reorders the table's columns, and its metadata row with them.
pub fn reorganize(table: MergedTable, layout: &ColumnLayout) -> Result<MergedTable> {
    let order = canonical_order(&table.column_names(), layout);
    table.select_columns(&order)
}
