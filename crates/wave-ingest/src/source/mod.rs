//! Survey export reading.

mod header;
mod reader;
mod table;

pub use header::normalize_header;
pub use reader::read_source_table;
pub use table::SourceTable;
