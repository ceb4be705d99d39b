//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! coverage session for business logic. Parsing, analysis and workbook
//! serialization run on the blocking pool.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use super::dto::{
    ClinicListResponse, CoverageAnalysis, HealthResponse, MapLayers, MapQuery, ParameterUpdate,
    ParametersResponse, RadiusQuery, SessionParameters, UploadQuery, UploadResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::{
    HeatIntensity, HeatMode, MapOptions, MapStyle, HEAT_INTENSITY_MAX, HEAT_INTENSITY_MIN,
};
use crate::services::report::XLSX_CONTENT_TYPE;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let dataset_loaded = state.session.read().dataset().is_some();
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        dataset_loaded,
    }))
}

// =============================================================================
// Configuration
// =============================================================================

/// GET /v1/clinics
pub async fn list_clinics(State(state): State<AppState>) -> HandlerResult<ClinicListResponse> {
    let session = state.session.read();
    let clinics = session.clinics().sites().to_vec();
    let total = clinics.len();
    Ok(Json(ClinicListResponse { clinics, total }))
}

/// GET /v1/parameters
///
/// Allowed values for every UI parameter plus the current selection.
pub async fn get_parameters(State(state): State<AppState>) -> HandlerResult<ParametersResponse> {
    let session = state.session.read();
    let radius = session.radius_options();
    Ok(Json(ParametersResponse {
        radius_options: radius.options.clone(),
        default_radius: radius.default,
        map_styles: MapStyle::ALL.to_vec(),
        heat_modes: vec![HeatMode::AllPatients, HeatMode::OnlyUncovered],
        heat_intensity_min: HEAT_INTENSITY_MIN,
        heat_intensity_max: HEAT_INTENSITY_MAX,
        current: session.parameters(),
    }))
}

/// PUT /v1/parameters
///
/// Change the session's current parameters. Either every field applies or none.
pub async fn update_parameters(
    State(state): State<AppState>,
    Json(update): Json<ParameterUpdate>,
) -> HandlerResult<SessionParameters> {
    let params = state.session.write().update_parameters(&update)?;
    info!("Parameters updated: radius={} mi", params.radius_miles.value());
    Ok(Json(params))
}

// =============================================================================
// Patient Dataset
// =============================================================================

/// POST /v1/patients?filename=<name>
///
/// Parse the raw request body and make it the session dataset. The previous
/// dataset stays in place if parsing fails.
pub async fn upload_patients(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let file_name = query
        .filename
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing 'filename' query parameter".to_string()))?;
    if body.is_empty() {
        return Err(AppError::BadRequest("Upload body is empty".to_string()));
    }

    let session = state.session.clone();
    let upload_name = file_name.clone();
    let dataset =
        tokio::task::spawn_blocking(move || session.write().upload(&upload_name, &body)).await??;

    info!("Uploaded {} with {} patients", file_name, dataset.patient_count);
    let message = format!("Loaded {} patients from {}", dataset.patient_count, file_name);
    Ok((StatusCode::CREATED, Json(UploadResponse { dataset, message })))
}

/// DELETE /v1/patients
pub async fn clear_patients(State(state): State<AppState>) -> StatusCode {
    state.session.write().clear_dataset();
    StatusCode::NO_CONTENT
}

// =============================================================================
// Analysis Endpoints
// =============================================================================

/// GET /v1/coverage?radius=
///
/// Per-patient results and the summary at the requested radius.
pub async fn get_coverage(
    State(state): State<AppState>,
    Query(query): Query<RadiusQuery>,
) -> HandlerResult<CoverageAnalysis> {
    let session = state.session.clone();
    let analysis = tokio::task::spawn_blocking(move || {
        let session = session.read();
        let radius = session.resolve_radius(query.radius)?;
        session.coverage(radius)
    })
    .await??;

    Ok(Json(analysis))
}

/// GET /v1/map?radius=&map_style=&heat_intensity=&heat_mode=
///
/// Map layers. Without an upload only the clinic layer is returned.
pub async fn get_map(
    State(state): State<AppState>,
    Query(query): Query<MapQuery>,
) -> HandlerResult<MapLayers> {
    let session = state.session.clone();
    let layers = tokio::task::spawn_blocking(move || {
        let session = session.read();
        let radius = session.resolve_radius(query.radius)?;
        let current = session.parameters().map;
        let options = MapOptions {
            style: query.map_style.unwrap_or(current.style),
            heat_intensity: match query.heat_intensity {
                Some(v) => HeatIntensity::new(v)?,
                None => current.heat_intensity,
            },
            heat_mode: query.heat_mode.unwrap_or(current.heat_mode),
        };
        session.map_layers(radius, &options)
    })
    .await??;

    Ok(Json(layers))
}

/// GET /v1/report?radius=
///
/// The strategic report as an XLSX attachment.
pub async fn get_report(
    State(state): State<AppState>,
    Query(query): Query<RadiusQuery>,
) -> Result<Response, AppError> {
    let session = state.session.clone();
    let file = tokio::task::spawn_blocking(move || {
        let session = session.read();
        let radius = session.resolve_radius(query.radius)?;
        session.report_xlsx(radius)
    })
    .await??;

    info!("Serving report {} ({} bytes)", file.file_name, file.bytes.len());
    let disposition = format!("attachment; filename=\"{}\"", file.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response())
}
