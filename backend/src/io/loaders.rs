use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoverageError, CoverageResult};
use crate::models::PatientTable;
use crate::parsing::{csv_parser, xlsx_parser};

/// Represents the source type of an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadFormat {
    Csv,
    Spreadsheet,
}

impl UploadFormat {
    /// Pick a format from a file name's extension.
    pub fn from_file_name(name: &str) -> CoverageResult<Self> {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| CoverageError::UnsupportedFormat(format!("'{}' has no extension", name)))?;

        match extension.to_lowercase().as_str() {
            "csv" => Ok(UploadFormat::Csv),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(UploadFormat::Spreadsheet),
            other => Err(CoverageError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Result of loading an upload
#[derive(Debug)]
pub struct PatientLoadResult {
    pub table: PatientTable,
    pub format: UploadFormat,
    pub num_patients: usize,
}

impl PatientLoadResult {
    pub fn new(table: PatientTable, format: UploadFormat) -> Self {
        let num_patients = table.len();
        Self {
            table,
            format,
            num_patients,
        }
    }
}

/// Unified interface for loading patient tables from CSV or spreadsheets
pub struct PatientLoader;

impl PatientLoader {
    /// Load a patient table from a file (auto-detects CSV or spreadsheet)
    pub fn load_from_file(path: &Path) -> CoverageResult<PatientLoadResult> {
        let name = path.to_string_lossy();
        let format = UploadFormat::from_file_name(&name)?;
        let result = match format {
            UploadFormat::Csv => {
                PatientLoadResult::new(csv_parser::parse_patients_csv(path)?, format)
            }
            UploadFormat::Spreadsheet => {
                let bytes = std::fs::read(path)?;
                PatientLoadResult::new(xlsx_parser::parse_patients_xlsx_bytes(&bytes)?, format)
            }
        };
        info!(
            "Loaded {} patients from {} ({:?})",
            result.num_patients,
            path.display(),
            result.format
        );
        Ok(result)
    }

    /// Load an in-memory upload; `file_name` decides the format.
    pub fn load_from_bytes(file_name: &str, bytes: &[u8]) -> CoverageResult<PatientLoadResult> {
        let format = UploadFormat::from_file_name(file_name)?;
        let table = match format {
            UploadFormat::Csv => csv_parser::parse_patients_csv_bytes(bytes)?,
            UploadFormat::Spreadsheet => xlsx_parser::parse_patients_xlsx_bytes(bytes)?,
        };
        let result = PatientLoadResult::new(table, format);
        info!(
            "Loaded {} patients from upload '{}' ({:?})",
            result.num_patients, file_name, result.format
        );
        Ok(result)
    }
}
