//! Output sinks for the merged survey table.
//!
//! - [`write_xlsx`]: header row, metadata row, then responses, with integer
//!   codes written as numbers
//! - [`render_preview`]: a console table of the first and last rows

mod error;
mod preview;
mod xlsx;

pub use error::{OutputError, Result};
pub use preview::{PreviewOptions, render_preview};
pub use xlsx::{DEFAULT_OUTPUT_PATH, WriteSummary, write_xlsx};
