//! Error types for coverage analysis.
//!
//! Every failure in the crate is local to the current session: the caller can
//! fix the upload or the parameters and try again.

use std::fmt;

/// Result type for coverage operations
pub type CoverageResult<T> = Result<T, CoverageError>;

/// Location of an offending cell in an uploaded table.
///
/// `row` is the 1-based data row (the header is not counted). It is `None`
/// when the problem concerns a whole column, e.g. a missing header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellLocation {
    pub row: Option<usize>,
    pub column: String,
}

impl CellLocation {
    pub fn column(column: impl Into<String>) -> Self {
        Self {
            row: None,
            column: column.into(),
        }
    }

    pub fn cell(row: usize, column: impl Into<String>) -> Self {
        Self {
            row: Some(row),
            column: column.into(),
        }
    }
}

impl fmt::Display for CellLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(f, "[row={}, column={}]", row, self.column),
            None => write!(f, "[column={}]", self.column),
        }
    }
}

/// Error type for coverage operations
#[derive(Debug, thiserror::Error)]
pub enum CoverageError {
    /// Uploaded table is missing a coordinate column or holds a bad coordinate.
    #[error("Invalid input format: {message} {location}")]
    InvalidInputFormat {
        message: String,
        location: CellLocation,
    },

    /// At least one clinic is required to measure any distance.
    #[error("Clinic set is empty")]
    EmptyClinicSet,

    /// A clinic definition is unusable (bad coordinates, duplicate name).
    #[error("Invalid clinic: {0}")]
    InvalidClinic(String),

    /// Radius handed to the analyzer is negative or not finite.
    #[error("Invalid radius: {0} miles")]
    InvalidRadius(f64),

    /// A UI parameter is outside its allowed domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Upload file type is neither CSV nor a spreadsheet.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// An operation needs patient data but nothing has been uploaded.
    #[error("No patient dataset has been uploaded")]
    NoDataset,

    #[error("Configuration error: {0}")]
    Config(String),

    /// Report serialization failed.
    #[error("Export error: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoverageError {
    /// Build an `InvalidInputFormat` error for a missing or malformed column.
    pub fn missing_column(column: impl Into<String>) -> Self {
        let column = column.into();
        CoverageError::InvalidInputFormat {
            message: format!("required column '{}' not found", column),
            location: CellLocation::column(column),
        }
    }

    /// Build an `InvalidInputFormat` error pointing at a single cell.
    pub fn invalid_cell(row: usize, column: impl Into<String>, message: impl Into<String>) -> Self {
        CoverageError::InvalidInputFormat {
            message: message.into(),
            location: CellLocation::cell(row, column),
        }
    }

    /// Check if this error was caused by the caller's input rather than the
    /// server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoverageError::InvalidInputFormat { .. }
                | CoverageError::InvalidRadius(_)
                | CoverageError::InvalidParameter(_)
                | CoverageError::UnsupportedFormat(_)
        )
    }
}

impl From<polars::error::PolarsError> for CoverageError {
    fn from(err: polars::error::PolarsError) -> Self {
        CoverageError::InvalidInputFormat {
            message: format!("failed to read CSV: {}", err),
            location: CellLocation::column("*"),
        }
    }
}

impl From<calamine::Error> for CoverageError {
    fn from(err: calamine::Error) -> Self {
        CoverageError::InvalidInputFormat {
            message: format!("failed to read spreadsheet: {}", err),
            location: CellLocation::column("*"),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for CoverageError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        CoverageError::Export(err.to_string())
    }
}

impl From<toml::de::Error> for CoverageError {
    fn from(err: toml::de::Error) -> Self {
        CoverageError::Config(format!("Failed to parse config file: {}", err))
    }
}
