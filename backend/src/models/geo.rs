//! Geographic coordinates.

use qtty::{Degrees, Radian, Radians};
use serde::{Deserialize, Serialize};

use crate::error::{CoverageError, CoverageResult};

/// Valid latitude range in decimal degrees.
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
/// Valid longitude range in decimal degrees.
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: Degrees,
    pub longitude: Degrees,
}

impl GeoPoint {
    /// Create a point without range checks.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Degrees::new(latitude),
            longitude: Degrees::new(longitude),
        }
    }

    /// Create a point, rejecting non-finite or out-of-range coordinates.
    ///
    /// The returned message is meant to be wrapped with row/column context by
    /// the caller.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, String> {
        check_range("latitude", latitude, LATITUDE_RANGE)?;
        check_range("longitude", longitude, LONGITUDE_RANGE)?;
        Ok(Self::new(latitude, longitude))
    }

    pub fn latitude_rad(&self) -> Radians {
        self.latitude.to::<Radian>()
    }

    pub fn longitude_rad(&self) -> Radians {
        self.longitude.to::<Radian>()
    }

    /// `[lat, lon]` pair, the order map renderers expect.
    pub fn as_lat_lon(&self) -> [f64; 2] {
        [self.latitude.value(), self.longitude.value()]
    }
}

/// Check a single coordinate against its valid range.
pub fn check_range(name: &str, value: f64, (min, max): (f64, f64)) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!("{} {} is not a finite number", name, value));
    }
    if value < min || value > max {
        return Err(format!(
            "{} {} is outside the valid range [{}, {}]",
            name, value, min, max
        ));
    }
    Ok(())
}

/// Validate a point and map failures to an `InvalidClinic` error.
pub fn validate_clinic_point(name: &str, latitude: f64, longitude: f64) -> CoverageResult<GeoPoint> {
    GeoPoint::try_new(latitude, longitude)
        .map_err(|msg| CoverageError::InvalidClinic(format!("'{}': {}", name, msg)))
}
