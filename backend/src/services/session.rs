//! The single interactive session: current upload plus current parameters.
//!
//! Nothing derived is cached. Every read recomputes the analysis over the full
//! dataset for the requested radius.

use log::info;
use qtty::Miles;
use serde::{Deserialize, Serialize};

use super::map_layers::{build_map_layers, MapLayers, PatientOverlay};
use super::report::{build_report, CoverageReport};
use super::xlsx_export::write_xlsx;
use crate::algorithms::analyze;
use crate::config::{CoverageConfig, MapSettings};
use crate::error::{CoverageError, CoverageResult};
use crate::io::{PatientLoader, UploadFormat};
use crate::models::{
    ClinicSet, CoverageAnalysis, HeatIntensity, HeatMode, MapOptions, MapStyle, PatientTable,
    RadiusOptions,
};

/// The uploaded table and where it came from.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub file_name: String,
    pub format: UploadFormat,
    pub table: PatientTable,
}

/// Short description of the current upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub file_name: String,
    pub format: UploadFormat,
    pub columns: Vec<String>,
    pub patient_count: usize,
}

/// Parameters currently selected in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionParameters {
    pub radius_miles: Miles,
    pub map: MapOptions,
}

/// Partial parameter change; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterUpdate {
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub map_style: Option<MapStyle>,
    #[serde(default)]
    pub heat_intensity: Option<f64>,
    #[serde(default)]
    pub heat_mode: Option<HeatMode>,
}

/// A rendered report.
#[derive(Debug, Clone)]
pub struct ReportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct CoverageSession {
    clinics: ClinicSet,
    radius_options: RadiusOptions,
    map_settings: MapSettings,
    parameters: SessionParameters,
    dataset: Option<Dataset>,
}

impl CoverageSession {
    pub fn new(
        clinics: ClinicSet,
        radius_options: RadiusOptions,
        map_settings: MapSettings,
    ) -> CoverageResult<Self> {
        if clinics.is_empty() {
            return Err(CoverageError::EmptyClinicSet);
        }
        let parameters = SessionParameters {
            radius_miles: Miles::new(radius_options.default),
            map: MapOptions {
                style: map_settings.default_style,
                ..MapOptions::default()
            },
        };
        Ok(Self {
            clinics,
            radius_options,
            map_settings,
            parameters,
            dataset: None,
        })
    }

    pub fn from_config(config: &CoverageConfig) -> CoverageResult<Self> {
        Self::new(
            config.clinic_set()?,
            config.radius_options()?,
            config.map.clone(),
        )
    }

    pub fn clinics(&self) -> &ClinicSet {
        &self.clinics
    }

    pub fn radius_options(&self) -> &RadiusOptions {
        &self.radius_options
    }

    pub fn parameters(&self) -> SessionParameters {
        self.parameters
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn dataset_info(&self) -> Option<DatasetInfo> {
        self.dataset.as_ref().map(|d| DatasetInfo {
            file_name: d.file_name.clone(),
            format: d.format,
            columns: d.table.columns.clone(),
            patient_count: d.table.len(),
        })
    }

    /// Parse an upload and make it the session dataset.
    ///
    /// On failure the previous dataset is kept untouched.
    pub fn upload(&mut self, file_name: &str, bytes: &[u8]) -> CoverageResult<DatasetInfo> {
        let loaded = PatientLoader::load_from_bytes(file_name, bytes)?;
        self.replace_dataset(Dataset {
            file_name: file_name.to_string(),
            format: loaded.format,
            table: loaded.table,
        });
        self.dataset_info().ok_or(CoverageError::NoDataset)
    }

    pub fn replace_dataset(&mut self, dataset: Dataset) {
        info!(
            "Session dataset replaced: {} ({} patients)",
            dataset.file_name,
            dataset.table.len()
        );
        self.dataset = Some(dataset);
    }

    pub fn clear_dataset(&mut self) {
        if self.dataset.take().is_some() {
            info!("Session dataset cleared");
        }
    }

    /// Apply a parameter change after validating every field.
    pub fn update_parameters(&mut self, update: &ParameterUpdate) -> CoverageResult<SessionParameters> {
        let mut next = self.parameters;
        if let Some(r) = update.radius {
            next.radius_miles = self.radius_options.resolve(Some(r))?;
        }
        if let Some(style) = update.map_style {
            next.map.style = style;
        }
        if let Some(intensity) = update.heat_intensity {
            next.map.heat_intensity = HeatIntensity::new(intensity)?;
        }
        if let Some(mode) = update.heat_mode {
            next.map.heat_mode = mode;
        }
        self.parameters = next;
        Ok(next)
    }

    /// Radius from a request override, falling back to the session value.
    pub fn resolve_radius(&self, requested: Option<f64>) -> CoverageResult<Miles> {
        match requested {
            Some(_) => self.radius_options.resolve(requested),
            None => Ok(self.parameters.radius_miles),
        }
    }

    /// Full analysis of the current dataset.
    pub fn coverage(&self, radius: Miles) -> CoverageResult<CoverageAnalysis> {
        let dataset = self.dataset.as_ref().ok_or(CoverageError::NoDataset)?;
        analyze(&dataset.table.records, &self.clinics, radius)
    }

    /// Map layers; clinic layer only when nothing is uploaded.
    pub fn map_layers(&self, radius: Miles, options: &MapOptions) -> CoverageResult<MapLayers> {
        let analysis = match &self.dataset {
            Some(d) => Some(analyze(&d.table.records, &self.clinics, radius)?),
            None => None,
        };
        let overlay = match (&self.dataset, &analysis) {
            (Some(d), Some(a)) => Some(PatientOverlay {
                table: &d.table,
                analysis: a,
            }),
            _ => None,
        };
        Ok(build_map_layers(
            &self.clinics,
            overlay,
            radius,
            options,
            &self.map_settings,
        ))
    }

    pub fn report(&self, radius: Miles) -> CoverageResult<CoverageReport> {
        let dataset = self.dataset.as_ref().ok_or(CoverageError::NoDataset)?;
        let analysis = analyze(&dataset.table.records, &self.clinics, radius)?;
        build_report(&dataset.table, &analysis)
    }

    pub fn report_xlsx(&self, radius: Miles) -> CoverageResult<ReportFile> {
        let report = self.report(radius)?;
        let bytes = write_xlsx(&report)?;
        Ok(ReportFile {
            file_name: report.file_name,
            bytes,
        })
    }
}
