//! # costcenter
//!
//! Query-filter builder for the Cost Center request overview.
//!
//! Search input is captured as a [`FilterCriteria`], compiled into a
//! [`Predicate`] tree, evaluated against [`Row`]s, and optionally projected
//! into spreadsheet [`ExportRecord`]s. Everything here is synchronous and
//! free of I/O apart from the [`SpreadsheetBuilder`] seam.
//!
//! ```
//! use costcenter::{FilterCriteria, Row, compile, filter_rows};
//!
//! let rows = vec![
//!     Row::new().with("requestType", "CREATE"),
//!     Row::new().with("requestType", "CHANGE"),
//! ];
//! let predicate = compile(&FilterCriteria::new().with_request_type("CREATE"));
//! assert_eq!(filter_rows(&rows, &predicate).len(), 1);
//! ```

pub mod compiler;
pub mod criteria;
pub mod export;
pub mod matcher;
pub mod predicate;
pub mod value;

pub use compiler::{FieldNames, FilterCompiler, SearchMode, compile, fields};
pub use criteria::{DateRange, FilterCriteria};
pub use export::{
    ColumnSpec, DEFAULT_FILE_NAME, ExportError, ExportRecord, ExportSession, ExportSettings,
    SpreadsheetBuilder, export_rows, overview_columns, project,
};
pub use matcher::{filter_rows, filter_rows_owned, matches};
pub use predicate::{Combinator, Operator, Predicate};
pub use value::{FieldValue, Row};
