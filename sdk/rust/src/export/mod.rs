//! Export of filtered rows
//!
//! Matched rows are projected through a fixed column table into
//! [`ExportRecord`]s and handed to a [`SpreadsheetBuilder`]. The builder is
//! treated as a scoped resource: it is destroyed once the build finishes,
//! whether or not the build succeeded.

mod error;
mod projector;
mod session;

pub use error::ExportError;
pub use projector::{ColumnSpec, ExportRecord, labels, overview_columns, project};
pub use session::{
    DEFAULT_FILE_NAME, ExportSession, ExportSettings, SpreadsheetBuilder, export_rows,
};
