//! XLSX serialization of a [`CoverageReport`].

use log::info;
use rust_xlsxwriter::{Format, Workbook};

use super::report::CoverageReport;
use crate::error::{CoverageError, CoverageResult};
use crate::models::CellValue;

/// Excel's hard row limit, header included.
const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;

/// Serialize the report to an in-memory XLSX workbook.
pub fn write_xlsx(report: &CoverageReport) -> CoverageResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for sheet in &report.sheets {
        if sheet.rows.len() + 1 > MAX_ROWS || sheet.header.len() > MAX_COLUMNS {
            return Err(CoverageError::Export(format!(
                "sheet '{}' exceeds spreadsheet limits",
                sheet.name
            )));
        }

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (col, title) in sheet.header.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, title, &header_format)?;
        }

        for (r, row) in sheet.rows.iter().enumerate() {
            let excel_row = (r + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                match cell {
                    CellValue::Empty => {}
                    CellValue::Number(n) if n.is_finite() => {
                        worksheet.write_number(excel_row, col, *n)?;
                    }
                    // Not representable as an XLSX number.
                    CellValue::Number(n) => {
                        worksheet.write_string(excel_row, col, n.to_string())?;
                    }
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(excel_row, col, *b)?;
                    }
                    CellValue::Text(s) => {
                        worksheet.write_string(excel_row, col, s)?;
                    }
                }
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    info!("Wrote report {} ({} bytes)", report.file_name, bytes.len());
    Ok(bytes)
}
