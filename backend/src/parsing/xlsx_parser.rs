use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

use super::PatientTableBuilder;
use crate::error::{CellLocation, CoverageError, CoverageResult};
use crate::models::{CellValue, PatientTable};

/// Parse the first worksheet of a spreadsheet into a validated patient table.
///
/// The first row of the used range is the header. Works for any workbook type
/// calamine detects (xlsx, xlsm, xls, ods).
pub fn parse_patients_xlsx_bytes(bytes: &[u8]) -> CoverageResult<PatientTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CoverageError::InvalidInputFormat {
            message: "workbook contains no worksheets".to_string(),
            location: CellLocation::column("*"),
        })??;

    let mut rows = range.rows();
    let header = match rows.next() {
        Some(cells) => cells.iter().map(header_text).collect(),
        None => Vec::new(),
    };
    let mut builder = PatientTableBuilder::new(header)?;

    for (i, cells) in rows.enumerate() {
        builder.push_row(i + 1, cells.iter().map(cell_value).collect())?;
    }

    Ok(builder.finish())
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use rust_xlsxwriter::Workbook;

    fn workbook_bytes(rows: &[Vec<&str>]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                match value.parse::<f64>() {
                    Ok(n) => sheet.write_number(r as u32, c as u16, n).unwrap(),
                    Err(_) => sheet.write_string(r as u32, c as u16, *value).unwrap(),
                };
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_parse_xlsx_numeric_coordinates() {
        let bytes = workbook_bytes(&[
            vec!["Name", "Latitude", "Longitude"],
            vec!["Ann", "38.2527", "-85.7585"],
            vec!["Bob", "38.18", "-85.75"],
        ]);
        let table = parse_patients_xlsx_bytes(&bytes).unwrap();
        assert_eq!(table.columns, vec!["Name", "Latitude", "Longitude"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[1].location, GeoPoint::new(38.18, -85.75));
        assert_eq!(table.records[0].cells[0], CellValue::Text("Ann".into()));
    }

    #[test]
    fn test_parse_xlsx_rejects_text_coordinate() {
        let bytes = workbook_bytes(&[
            vec!["Latitude", "Longitude"],
            vec!["38.1", "-85.1"],
            vec!["unknown", "-85.2"],
        ]);
        let err = parse_patients_xlsx_bytes(&bytes).unwrap_err();
        match err {
            CoverageError::InvalidInputFormat { location, .. } => {
                assert_eq!(location.row, Some(2));
                assert_eq!(location.column, "Latitude");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_garbage_bytes_fails() {
        let err = parse_patients_xlsx_bytes(b"definitely not a workbook").unwrap_err();
        assert!(matches!(err, CoverageError::InvalidInputFormat { .. }));
    }
}
