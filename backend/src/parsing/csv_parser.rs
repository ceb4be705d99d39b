use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

use super::PatientTableBuilder;
use crate::error::CoverageResult;
use crate::models::{CellValue, PatientTable};

/// Read CSV bytes into a DataFrame with every column as text.
///
/// Schema inference is disabled so that a stray word in a coordinate column
/// surfaces as a row-level error instead of a whole-column cast failure.
pub fn read_csv_bytes(bytes: &[u8]) -> CoverageResult<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()?;
    Ok(df)
}

/// Parse an uploaded CSV body into a validated patient table.
pub fn parse_patients_csv_bytes(bytes: &[u8]) -> CoverageResult<PatientTable> {
    let df = read_csv_bytes(bytes)?;
    dataframe_to_table(&df)
}

/// Parse a CSV file into a validated patient table.
pub fn parse_patients_csv(csv_path: &Path) -> CoverageResult<PatientTable> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(csv_path.into()))?
        .finish()?;
    dataframe_to_table(&df)
}

/// Convert a text DataFrame to a [`PatientTable`], validating each row.
pub fn dataframe_to_table(df: &DataFrame) -> CoverageResult<PatientTable> {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut builder = PatientTableBuilder::new(columns.clone())?;

    let text_columns = columns
        .iter()
        .map(|name| df.column(name)?.str())
        .collect::<PolarsResult<Vec<_>>>()?;

    for i in 0..df.height() {
        let cells = text_columns
            .iter()
            .map(|col| col.get(i).map_or(CellValue::Empty, CellValue::from_text))
            .collect();
        builder.push_row(i + 1, cells)?;
    }

    Ok(builder.finish())
}
