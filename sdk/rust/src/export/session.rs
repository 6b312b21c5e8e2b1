//! Spreadsheet builder contract and scoped export session

use std::path::PathBuf;

use serde::Serialize;

use super::error::ExportError;
use super::projector::{ColumnSpec, ExportRecord, project};
use crate::value::Row;

/// Default workbook file name
pub const DEFAULT_FILE_NAME: &str = "CostCenterRequests.xlsx";

/// Everything a builder needs to write one workbook
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSettings {
    pub file_name: String,
    /// Column labels, in order
    pub columns: Vec<String>,
    pub records: Vec<ExportRecord>,
}

impl ExportSettings {
    pub fn new(columns: &[ColumnSpec], records: Vec<ExportRecord>) -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            columns: columns.iter().map(|c| c.label.clone()).collect(),
            records,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }
}

/// Serializes export settings into a spreadsheet file
///
/// Implementations hold whatever resources the output format needs;
/// [`destroy`](SpreadsheetBuilder::destroy) releases them and is called
/// exactly once by [`ExportSession`].
pub trait SpreadsheetBuilder {
    /// Write the workbook and return its location
    fn build(&mut self, settings: &ExportSettings) -> Result<PathBuf, ExportError>;

    fn destroy(&mut self);
}

/// Owns a builder for the duration of one build and destroys it on drop
pub struct ExportSession<B: SpreadsheetBuilder> {
    builder: B,
}

impl<B: SpreadsheetBuilder> ExportSession<B> {
    pub fn new(builder: B) -> Self {
        Self { builder }
    }

    /// Run the build. The builder is destroyed when the session drops at
    /// the end of this call, on success, failure, or unwind.
    pub fn build(mut self, settings: &ExportSettings) -> Result<PathBuf, ExportError> {
        self.builder.build(settings)
    }
}

impl<B: SpreadsheetBuilder> Drop for ExportSession<B> {
    fn drop(&mut self) {
        self.builder.destroy();
        tracing::trace!("Spreadsheet builder destroyed");
    }
}

/// Export matched rows.
///
/// Returns [`ExportError::NoData`] without projecting or acquiring a builder
/// when `rows` is empty.
pub fn export_rows<B, F>(
    rows: &[&Row],
    columns: &[ColumnSpec],
    file_name: &str,
    acquire: F,
) -> Result<PathBuf, ExportError>
where
    B: SpreadsheetBuilder,
    F: FnOnce() -> Result<B, ExportError>,
{
    if rows.is_empty() {
        tracing::warn!("No data to export");
        return Err(ExportError::NoData);
    }

    let records = project(rows.iter().copied(), columns);
    let settings = ExportSettings::new(columns, records).with_file_name(file_name);

    let session = ExportSession::new(acquire()?);
    let path = session.build(&settings)?;
    tracing::info!(
        rows = settings.records.len(),
        path = %path.display(),
        "Exported rows"
    );
    Ok(path)
}
