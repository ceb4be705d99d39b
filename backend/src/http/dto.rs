//! Data Transfer Objects for the HTTP API.
//!
//! Analysis results and map layers already derive Serialize/Deserialize and
//! are re-exported here; the rest are request queries and small envelopes.

use serde::{Deserialize, Serialize};

pub use crate::models::{
    BracketCount, ClinicSite, CoverageAnalysis, CoverageSummary, HeatMode, MapStyle,
    PatientCoverage,
};
pub use crate::services::map_layers::MapLayers;
pub use crate::services::{DatasetInfo, ParameterUpdate, SessionParameters};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether a patient dataset is loaded
    pub dataset_loaded: bool,
}

/// Configured clinics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicListResponse {
    pub clinics: Vec<ClinicSite>,
    pub total: usize,
}

/// Allowed parameter domains and the current selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParametersResponse {
    pub radius_options: Vec<f64>,
    pub default_radius: f64,
    pub map_styles: Vec<MapStyle>,
    pub heat_modes: Vec<HeatMode>,
    pub heat_intensity_min: f64,
    pub heat_intensity_max: f64,
    pub current: SessionParameters,
}

/// Query parameters for the upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadQuery {
    /// Original file name; its extension selects the parser
    #[serde(default)]
    pub filename: Option<String>,
}

/// Response for a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub dataset: DatasetInfo,
    pub message: String,
}

/// Query parameters for radius-dependent endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RadiusQuery {
    /// Service radius in miles; the session value when absent
    #[serde(default)]
    pub radius: Option<f64>,
}

/// Query parameters for the map endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MapQuery {
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub map_style: Option<MapStyle>,
    #[serde(default)]
    pub heat_intensity: Option<f64>,
    #[serde(default)]
    pub heat_mode: Option<HeatMode>,
}
