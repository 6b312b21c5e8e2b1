//! Spreadsheet builder backed by rust_xlsxwriter

use std::path::PathBuf;

use costcenter::{ExportError, ExportSettings, SpreadsheetBuilder};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::core::constants::EXPORT_SHEET_NAME;

/// Default column width in characters
const COLUMN_WIDTH: u16 = 24;

/// Writes one `.xlsx` workbook into an output directory
pub struct XlsxBuilder {
    output_dir: PathBuf,
    workbook: Option<Workbook>,
}

impl XlsxBuilder {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            workbook: Some(Workbook::new()),
        }
    }
}

impl SpreadsheetBuilder for XlsxBuilder {
    fn build(&mut self, settings: &ExportSettings) -> Result<PathBuf, ExportError> {
        let workbook = self
            .workbook
            .as_mut()
            .ok_or_else(|| ExportError::Build("builder already destroyed".to_string()))?;

        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(&settings.file_name);

        write_sheet(workbook, settings).map_err(xlsx_error)?;
        workbook.save(&path).map_err(xlsx_error)?;

        tracing::debug!(path = %path.display(), "Workbook saved");
        Ok(path)
    }

    fn destroy(&mut self) {
        self.workbook = None;
    }
}

fn write_sheet(workbook: &mut Workbook, settings: &ExportSettings) -> Result<(), XlsxError> {
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    for (col, label) in settings.columns.iter().enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, COLUMN_WIDTH)?;
        worksheet.write_string_with_format(0, col, label, &header)?;
    }

    for (index, record) in settings.records.iter().enumerate() {
        let row = index as u32 + 1;
        for (col, value) in record.values().enumerate() {
            worksheet.write_string(row, col as u16, value)?;
        }
    }

    Ok(())
}

fn xlsx_error(e: XlsxError) -> ExportError {
    ExportError::Build(e.to_string())
}
