//! Parsers for uploaded patient tables.
//!
//! Both formats are reduced to a header plus rows of [`CellValue`]s and then
//! validated by [`PatientTableBuilder`], so CSV and spreadsheet uploads fail
//! with identical row/column diagnostics.
//!
//! # Parsers
//!
//! - [`csv_parser`]: comma-separated uploads, read with polars
//! - [`xlsx_parser`]: spreadsheet uploads (first worksheet), read with calamine

pub mod csv_parser;
pub mod xlsx_parser;

use log::warn;

use crate::error::{CoverageError, CoverageResult};
use crate::models::{
    CellValue, GeoPoint, PatientRecord, PatientTable, LATITUDE_COLUMN, LONGITUDE_COLUMN,
};

/// Validates rows as they are read and accumulates a [`PatientTable`].
#[derive(Debug)]
pub struct PatientTableBuilder {
    columns: Vec<String>,
    lat_idx: usize,
    lon_idx: usize,
    records: Vec<PatientRecord>,
}

impl PatientTableBuilder {
    /// Start a table from its header row.
    ///
    /// Header names are trimmed before matching; the coordinate columns must be
    /// named exactly `Latitude` and `Longitude`.
    pub fn new(columns: Vec<String>) -> CoverageResult<Self> {
        let columns: Vec<String> = columns.into_iter().map(|c| c.trim().to_string()).collect();
        let find = |name: &str| {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| CoverageError::missing_column(name))
        };
        let lat_idx = find(LATITUDE_COLUMN)?;
        let lon_idx = find(LONGITUDE_COLUMN)?;

        Ok(Self {
            columns,
            lat_idx,
            lon_idx,
            records: Vec::new(),
        })
    }

    /// Validate and append one data row. `row` is the 1-based data row.
    ///
    /// Rows where every cell is empty are skipped.
    pub fn push_row(&mut self, row: usize, mut cells: Vec<CellValue>) -> CoverageResult<()> {
        if cells.iter().all(CellValue::is_empty) {
            return Ok(());
        }
        cells.resize(self.columns.len(), CellValue::Empty);

        let latitude = coordinate(row, LATITUDE_COLUMN, &cells[self.lat_idx])?;
        let longitude = coordinate(row, LONGITUDE_COLUMN, &cells[self.lon_idx])?;
        let location = GeoPoint::try_new(latitude, longitude).map_err(|msg| {
            let column = if msg.starts_with("latitude") {
                LATITUDE_COLUMN
            } else {
                LONGITUDE_COLUMN
            };
            CoverageError::invalid_cell(row, column, msg)
        })?;

        self.records.push(PatientRecord {
            row,
            location,
            cells,
        });
        Ok(())
    }

    pub fn finish(self) -> PatientTable {
        PatientTable::new(self.columns, self.records)
    }
}

fn coordinate(row: usize, column: &str, cell: &CellValue) -> CoverageResult<f64> {
    let value = match cell {
        CellValue::Number(n) => Ok(*n),
        CellValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("value '{}' is not a number", s)),
        CellValue::Empty => Err("value is missing".to_string()),
        CellValue::Bool(b) => Err(format!("value '{}' is not a number", b)),
    };
    value.map_err(|msg| {
        warn!("Rejected upload at row {} column {}: {}", row, column, msg);
        CoverageError::invalid_cell(row, column, msg)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_builder_requires_coordinate_columns() {
        let err = PatientTableBuilder::new(header(&["Name", "Latitude"])).unwrap_err();
        assert!(err.to_string().contains("Longitude"));
    }

    #[test]
    fn test_builder_trims_header() {
        let builder = PatientTableBuilder::new(header(&[" Latitude ", "Longitude"]));
        assert!(builder.is_ok());
    }

    #[test]
    fn test_builder_rejects_text_coordinate() {
        let mut b = PatientTableBuilder::new(header(&["Latitude", "Longitude"])).unwrap();
        let err = b
            .push_row(
                4,
                vec![CellValue::Text("north".into()), CellValue::Number(1.0)],
            )
            .unwrap_err();
        match err {
            CoverageError::InvalidInputFormat { location, message } => {
                assert_eq!(location.row, Some(4));
                assert_eq!(location.column, "Latitude");
                assert!(message.contains("north"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_builder_rejects_out_of_range_longitude() {
        let mut b = PatientTableBuilder::new(header(&["Latitude", "Longitude"])).unwrap();
        let err = b
            .push_row(1, vec![CellValue::Number(38.0), CellValue::Number(-200.0)])
            .unwrap_err();
        match err {
            CoverageError::InvalidInputFormat { location, .. } => {
                assert_eq!(location.column, "Longitude");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_builder_skips_blank_rows_and_pads_short_rows() {
        let mut b = PatientTableBuilder::new(header(&["Latitude", "Longitude", "Name"])).unwrap();
        b.push_row(1, vec![CellValue::Empty, CellValue::Empty]).unwrap();
        b.push_row(2, vec![CellValue::Number(38.0), CellValue::Text("-85.7".into())])
            .unwrap();
        let table = b.finish();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].row, 2);
        assert_eq!(table.records[0].cells.len(), 3);
        assert_eq!(table.records[0].location, GeoPoint::new(38.0, -85.7));
    }

    #[test]
    fn test_builder_missing_value() {
        let mut b = PatientTableBuilder::new(header(&["Latitude", "Longitude", "Id"])).unwrap();
        let err = b
            .push_row(
                7,
                vec![CellValue::Number(38.0), CellValue::Empty, CellValue::Number(3.0)],
            )
            .unwrap_err();
        assert!(err.to_string().contains("row=7"));
        assert!(err.to_string().contains("Longitude"));
    }
}
