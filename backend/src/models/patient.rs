//! Uploaded patient rows.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::geo::GeoPoint;

/// Header of the required latitude column.
pub const LATITUDE_COLUMN: &str = "Latitude";
/// Header of the required longitude column.
pub const LONGITUDE_COLUMN: &str = "Longitude";

/// A single uploaded cell, kept so the report can echo the original row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Interpret raw CSV text, keeping finite numbers numeric.
    ///
    /// Spellings such as `inf` or `NaN` stay text.
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// One patient row with validated coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// 1-based data row in the uploaded file.
    pub row: usize,
    pub location: GeoPoint,
    /// All uploaded cells, aligned with [`PatientTable::columns`].
    pub cells: Vec<CellValue>,
}

/// A validated upload: header plus one record per data row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientTable {
    pub columns: Vec<String>,
    pub records: Vec<PatientRecord>,
}

impl PatientTable {
    pub fn new(columns: Vec<String>, records: Vec<PatientRecord>) -> Self {
        Self { columns, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn locations(&self) -> Vec<GeoPoint> {
        self.records.iter().map(|r| r.location).collect()
    }
}
