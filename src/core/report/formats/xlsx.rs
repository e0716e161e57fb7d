//! Excel workbook writer

use crate::core::error::ReportError;
use crate::core::report::formats::{WorkbookFormat, WorkbookWriter};
use crate::core::report::sheet::{Cell, Sheet};
use crate::debug;
use rust_xlsxwriter::{Workbook, XlsxError};

/// Width of the register-number column, in characters
const FIRST_COLUMN_WIDTH: f64 = 16.0;

/// Writes sheets as an Office Open XML workbook
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxWriter;

impl XlsxWriter {
    /// Create a new xlsx writer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn build(sheets: &[Sheet]) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();

        for sheet in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name)?;
            worksheet.set_column_width(0, FIRST_COLUMN_WIDTH)?;

            for (row_idx, row) in sheet.rows.iter().enumerate() {
                let Ok(r) = u32::try_from(row_idx) else {
                    break;
                };
                for (col_idx, cell) in row.iter().enumerate() {
                    let Ok(c) = u16::try_from(col_idx) else {
                        break;
                    };
                    match cell {
                        Cell::Text(text) => {
                            worksheet.write_string(r, c, text)?;
                        }
                        Cell::Number(n) => {
                            worksheet.write_number(r, c, *n)?;
                        }
                        Cell::Empty => {}
                    }
                }
            }
            debug!("Wrote sheet '{}' ({} rows)", sheet.name, sheet.rows.len());
        }

        workbook.save_to_buffer()
    }
}

impl WorkbookWriter for XlsxWriter {
    fn format(&self) -> WorkbookFormat {
        WorkbookFormat::Xlsx
    }

    fn write(&self, sheets: &[Sheet]) -> Result<Vec<u8>, ReportError> {
        Self::build(sheets).map_err(|e| ReportError::Workbook(e.to_string()))
    }
}
