//! Interactive parameters: service radius and map presentation options.

use qtty::Miles;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{CoverageError, CoverageResult};

/// Radius options offered by the dashboard slider, in miles.
pub const DEFAULT_RADIUS_OPTIONS: [f64; 8] = [1.0, 2.0, 3.0, 5.0, 8.0, 10.0, 15.0, 20.0];
pub const DEFAULT_RADIUS_MILES: f64 = 5.0;

pub const HEAT_INTENSITY_MIN: f64 = 0.1;
pub const HEAT_INTENSITY_MAX: f64 = 1.0;
pub const DEFAULT_HEAT_INTENSITY: f64 = 0.5;

/// The discrete set of radii a user may pick from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiusOptions {
    pub options: Vec<f64>,
    pub default: f64,
}

impl RadiusOptions {
    pub fn new(options: Vec<f64>, default: f64) -> CoverageResult<Self> {
        if options.is_empty() {
            return Err(CoverageError::Config(
                "radius_options must not be empty".to_string(),
            ));
        }
        if let Some(bad) = options.iter().find(|r| !r.is_finite() || **r < 0.0) {
            return Err(CoverageError::Config(format!(
                "radius option {} must be a non-negative number",
                bad
            )));
        }
        let this = Self { options, default };
        if !this.contains(default) {
            return Err(CoverageError::Config(format!(
                "default radius {} is not one of {:?}",
                default, this.options
            )));
        }
        Ok(this)
    }

    pub fn contains(&self, radius: f64) -> bool {
        self.options.iter().any(|r| *r == radius)
    }

    /// Resolve an optional requested radius against the option set.
    pub fn resolve(&self, requested: Option<f64>) -> CoverageResult<Miles> {
        match requested {
            None => Ok(Miles::new(self.default)),
            Some(r) if self.contains(r) => Ok(Miles::new(r)),
            Some(r) => Err(CoverageError::InvalidParameter(format!(
                "radius {} is not one of {:?}",
                r, self.options
            ))),
        }
    }
}

impl Default for RadiusOptions {
    fn default() -> Self {
        Self {
            options: DEFAULT_RADIUS_OPTIONS.to_vec(),
            default: DEFAULT_RADIUS_MILES,
        }
    }
}

/// Tile theme for the map renderer. Not consumed by the analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapStyle {
    #[default]
    DarkMatter,
    Positron,
    OpenStreetMap,
}

impl MapStyle {
    pub const ALL: [MapStyle; 3] = [MapStyle::DarkMatter, MapStyle::Positron, MapStyle::OpenStreetMap];

    /// Tile set name understood by the map renderer.
    pub fn tiles(&self) -> &'static str {
        match self {
            MapStyle::DarkMatter => "CartoDB dark_matter",
            MapStyle::Positron => "CartoDB positron",
            MapStyle::OpenStreetMap => "OpenStreetMap",
        }
    }
}

impl FromStr for MapStyle {
    type Err = CoverageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark_matter" | "cartodb dark_matter" => Ok(MapStyle::DarkMatter),
            "positron" | "cartodb positron" => Ok(MapStyle::Positron),
            "open_street_map" | "openstreetmap" => Ok(MapStyle::OpenStreetMap),
            _ => Err(CoverageError::InvalidParameter(format!(
                "unknown map style '{}'",
                s
            ))),
        }
    }
}

/// Which patients feed the heat layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatMode {
    #[default]
    AllPatients,
    /// Only patients with `min_distance_miles > radius`.
    OnlyUncovered,
}

impl FromStr for HeatMode {
    type Err = CoverageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all_patients" | "all patients" => Ok(HeatMode::AllPatients),
            "only_uncovered" | "only uncovered" => Ok(HeatMode::OnlyUncovered),
            _ => Err(CoverageError::InvalidParameter(format!(
                "unknown heat mode '{}'",
                s
            ))),
        }
    }
}

/// Heat point weight in `[0.1, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct HeatIntensity(f64);

impl HeatIntensity {
    pub fn new(value: f64) -> CoverageResult<Self> {
        if !(HEAT_INTENSITY_MIN..=HEAT_INTENSITY_MAX).contains(&value) {
            return Err(CoverageError::InvalidParameter(format!(
                "heat intensity {} is outside [{}, {}]",
                value, HEAT_INTENSITY_MIN, HEAT_INTENSITY_MAX
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for HeatIntensity {
    fn default() -> Self {
        Self(DEFAULT_HEAT_INTENSITY)
    }
}

impl TryFrom<f64> for HeatIntensity {
    type Error = CoverageError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HeatIntensity> for f64 {
    fn from(value: HeatIntensity) -> Self {
        value.0
    }
}

/// Presentation parameters for one map request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MapOptions {
    pub style: MapStyle,
    pub heat_intensity: HeatIntensity,
    pub heat_mode: HeatMode,
}
