//! Clinic sites and the immutable clinic set the analyzer measures against.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use super::geo::{validate_clinic_point, GeoPoint};
use crate::error::{CoverageError, CoverageResult};

/// A fixed service location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicSite {
    pub name: String,
    pub location: GeoPoint,
}

impl ClinicSite {
    /// Create a clinic, validating its coordinates.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> CoverageResult<Self> {
        let name = name.into();
        let location = validate_clinic_point(&name, latitude, longitude)?;
        Ok(Self { name, location })
    }
}

/// Ordered, immutable collection of clinics.
///
/// Cloning is cheap; the sites are shared. Construction checks that names are
/// unique, but an empty set is allowed here so that the analyzer can report
/// `EmptyClinicSet` itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ClinicSet {
    sites: Arc<[ClinicSite]>,
}

impl ClinicSet {
    pub fn new(sites: Vec<ClinicSite>) -> CoverageResult<Self> {
        let mut seen = HashSet::with_capacity(sites.len());
        for site in &sites {
            if !seen.insert(site.name.as_str()) {
                return Err(CoverageError::InvalidClinic(format!(
                    "duplicate clinic name '{}'",
                    site.name
                )));
            }
        }
        Ok(Self { sites: sites.into() })
    }

    /// The five Louisville clinics the dashboard ships with.
    pub fn builtin() -> Self {
        let sites = BUILTIN_CLINICS
            .iter()
            .map(|(name, lat, lon)| ClinicSite {
                name: (*name).to_string(),
                location: GeoPoint::new(*lat, *lon),
            })
            .collect::<Vec<_>>();
        Self { sites: sites.into() }
    }

    pub fn sites(&self) -> &[ClinicSite] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClinicSite> {
        self.sites.iter()
    }
}

impl Default for ClinicSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a ClinicSet {
    type Item = &'a ClinicSite;
    type IntoIter = std::slice::Iter<'a, ClinicSite>;

    fn into_iter(self) -> Self::IntoIter {
        self.sites.iter()
    }
}

const BUILTIN_CLINICS: [(&str, f64, f64); 5] = [
    ("Downtown Clinic", 38.2527, -85.7585),
    ("East Hub", 38.2450, -85.6000),
    ("West Medical", 38.2600, -85.8500),
    ("South Center", 38.1800, -85.7500),
    ("North Health", 38.3200, -85.7000),
];
