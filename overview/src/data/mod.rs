//! Data layer: request snapshot loading and spreadsheet output

pub mod error;
pub mod snapshot;
pub mod spreadsheet;

pub use error::SnapshotError;
pub use snapshot::{load_rows, parse_rows};
pub use spreadsheet::XlsxBuilder;
