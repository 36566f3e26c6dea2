use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::commands::RunSummary;

pub fn print_summary(summary: &RunSummary, styled: bool) {
    if let Some(preview) = &summary.preview {
        println!("{preview}");
    }
    println!("Data saved to {}", summary.output.display());
    if summary.files.is_empty() {
        println!("No .csv exports found in {}", summary.folder.display());
        return;
    }
    println!();
    println!("{}", files_table(summary, styled));
    println!("{}", columns_summary(summary));
}

/// One row per export plus a total.
pub fn files_table(summary: &RunSummary, styled: bool) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Wave"),
        header_cell("Rows"),
        header_cell("Unfinished"),
        header_cell("Kept"),
    ]);
    apply_summary_table_style(&mut table);
    if !styled {
        table.force_no_tty();
    }
    for index in 2..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for file in &summary.files {
        let name = file
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.path.display().to_string());
        table.add_row(vec![
            Cell::new(name),
            match &file.batch_id {
                Some(id) => Cell::new(id),
                None => dim_cell("-"),
            },
            Cell::new(file.rows_read),
            count_cell(file.rows_dropped, Color::Yellow),
            Cell::new(file.rows_kept()),
        ]);
    }

    let dropped: usize = summary.files.iter().map(|file| file.rows_dropped).sum();
    let read: usize = summary.files.iter().map(|file| file.rows_read).sum();
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(read).add_attribute(Attribute::Bold),
        count_cell(dropped, Color::Yellow).add_attribute(Attribute::Bold),
        Cell::new(summary.rows).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Final column count, then the per-export classification counts summed over
/// all exports.
pub fn columns_summary(summary: &RunSummary) -> String {
    let normalization = &summary.normalization;
    format!(
        "Columns: {}\nNormalized across {} exports: numeric {}, coded {}, with unmapped text {}",
        summary.columns,
        summary.files.len(),
        normalization.numeric,
        normalization.coded,
        normalization.mixed
    )
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
