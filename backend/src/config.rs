//! Configuration file support.
//!
//! The backend reads an optional `coverage.toml`:
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [analysis]
//! default_radius = 5
//! radius_options = [1, 2, 3, 5, 8, 10, 15, 20]
//!
//! [map]
//! center_latitude = 38.2527
//! center_longitude = -85.7585
//! zoom = 11
//! default_style = "dark_matter"
//!
//! [[clinics]]
//! name = "Downtown Clinic"
//! latitude = 38.2527
//! longitude = -85.7585
//! ```
//!
//! Every section is optional. Without `[[clinics]]` the five built-in clinics
//! are used.

use log::info;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CoverageError, CoverageResult};
use crate::models::{
    ClinicSet, ClinicSite, MapStyle, RadiusOptions, DEFAULT_RADIUS_MILES, DEFAULT_RADIUS_OPTIONS,
};

/// Environment variable pointing at a config file.
pub const CONFIG_ENV_VAR: &str = "COVERAGE_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoverageConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub clinics: Vec<ClinicSettings>,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

/// Radius slider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    #[serde(default = "default_radius")]
    pub default_radius: f64,
    #[serde(default = "default_radius_options")]
    pub radius_options: Vec<f64>,
}

/// Initial map view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    #[serde(default = "default_center_latitude")]
    pub center_latitude: f64,
    #[serde(default = "default_center_longitude")]
    pub center_longitude: f64,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default)]
    pub default_style: MapStyle,
}

/// One `[[clinics]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicSettings {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS_MILES
}

fn default_radius_options() -> Vec<f64> {
    DEFAULT_RADIUS_OPTIONS.to_vec()
}

fn default_center_latitude() -> f64 {
    38.2527
}

fn default_center_longitude() -> f64 {
    -85.7585
}

fn default_zoom() -> u8 {
    11
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            default_radius: default_radius(),
            radius_options: default_radius_options(),
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center_latitude: default_center_latitude(),
            center_longitude: default_center_longitude(),
            zoom: default_zoom(),
            default_style: MapStyle::default(),
        }
    }
}

impl CoverageConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> CoverageResult<Self> {
        let config: CoverageConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(CoverageConfig)` if successful
    /// * `Err(CoverageError::Config)` if the file cannot be read, parsed or validated
    pub fn from_file<P: AsRef<Path>>(path: P) -> CoverageResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            CoverageError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from the default location.
    ///
    /// Uses `$COVERAGE_CONFIG` if set, otherwise searches for `coverage.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Falls back to built-in defaults when no file is found.
    pub fn from_default_location() -> CoverageResult<Self> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(path);
        }

        let search_paths = [
            PathBuf::from("coverage.toml"),
            PathBuf::from("backend/coverage.toml"),
            PathBuf::from("../coverage.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                info!("Using configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        info!("No coverage.toml found, using built-in defaults");
        Ok(Self::default())
    }

    /// Load from an explicit path if given, else from the default location.
    pub fn load(path: Option<&Path>) -> CoverageResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Self::from_default_location(),
        }
    }

    /// Apply `HOST` / `PORT` environment overrides.
    pub fn apply_env_overrides(&mut self) -> CoverageResult<()> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| CoverageError::Config(format!("Invalid PORT value '{}'", port)))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> CoverageResult<()> {
        self.radius_options()?;
        let clinics = self.clinic_set()?;
        if clinics.is_empty() {
            return Err(CoverageError::EmptyClinicSet);
        }
        Ok(())
    }

    /// Configured clinics, or the built-in set when none are configured.
    pub fn clinic_set(&self) -> CoverageResult<ClinicSet> {
        if self.clinics.is_empty() {
            return Ok(ClinicSet::builtin());
        }
        let sites = self
            .clinics
            .iter()
            .map(|c| ClinicSite::new(c.name.clone(), c.latitude, c.longitude))
            .collect::<CoverageResult<Vec<_>>>()?;
        ClinicSet::new(sites)
    }

    pub fn radius_options(&self) -> CoverageResult<RadiusOptions> {
        RadiusOptions::new(
            self.analysis.radius_options.clone(),
            self.analysis.default_radius,
        )
    }
}
