//! Great-circle distance on a spherical Earth.

use qtty::Miles;

use crate::models::GeoPoint;

/// Mean Earth radius used for all coverage distances.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Great-circle distance between two points using the haversine formula.
///
/// ```text
/// a = sin²(Δφ/2) + cos(φ1)·cos(φ2)·sin²(Δλ/2)
/// d = 2R·atan2(√a, √(1-a))
/// ```
///
/// The result is non-negative and symmetric in its arguments. Longitude
/// differences across the ±180° meridian need no special handling since only
/// `sin²(Δλ/2)` enters the formula.
///
/// # Arguments
///
/// * `a` - First point in decimal degrees
/// * `b` - Second point in decimal degrees
///
/// # Returns
///
/// Distance in statute miles.
///
/// # Examples
///
/// ```
/// use coverage_backend::algorithms::haversine::distance;
/// use coverage_backend::models::GeoPoint;
///
/// let p = GeoPoint::new(38.2527, -85.7585);
/// assert_eq!(distance(&p, &p).value(), 0.0);
/// ```
pub fn distance(a: &GeoPoint, b: &GeoPoint) -> Miles {
    let phi1 = a.latitude_rad().value();
    let phi2 = b.latitude_rad().value();
    let d_phi = phi2 - phi1;
    let d_lambda = b.longitude_rad().value() - a.longitude_rad().value();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);

    Miles::new(2.0 * EARTH_RADIUS_MILES * h.sqrt().atan2((1.0 - h).sqrt()))
}
