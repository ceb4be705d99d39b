//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::CoverageError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (validation error)
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Error raised by the coverage core
    Coverage(CoverageError),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ApiError) {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg)),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Coverage(e) => coverage_error_body(e),
        }
    }
}

fn coverage_error_body(err: CoverageError) -> (StatusCode, ApiError) {
    let message = err.to_string();
    match err {
        CoverageError::NoDataset => (StatusCode::NOT_FOUND, ApiError::new("NO_DATASET", message)),
        CoverageError::InvalidInputFormat { location, .. } => (
            StatusCode::BAD_REQUEST,
            ApiError::new("INVALID_INPUT_FORMAT", message).with_details(location.to_string()),
        ),
        CoverageError::InvalidRadius(_) => (
            StatusCode::BAD_REQUEST,
            ApiError::new("INVALID_RADIUS", message),
        ),
        CoverageError::InvalidParameter(_) => (
            StatusCode::BAD_REQUEST,
            ApiError::new("INVALID_PARAMETER", message),
        ),
        CoverageError::UnsupportedFormat(_) => (
            StatusCode::BAD_REQUEST,
            ApiError::new("UNSUPPORTED_FORMAT", message),
        ),
        CoverageError::Export(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("EXPORT_ERROR", message),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("INTERNAL_ERROR", message),
        ),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_body();
        if status.is_server_error() {
            tracing::error!("{}: {}", error.code, error.message);
        }
        (status, Json(error)).into_response()
    }
}

impl From<CoverageError> for AppError {
    fn from(err: CoverageError) -> Self {
        AppError::Coverage(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Task join error: {}", err))
    }
}
