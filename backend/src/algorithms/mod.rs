//! Core coverage computations.
//!
//! - [`haversine`]: great-circle distance
//! - [`coverage`]: nearest clinic, bracket step function, analysis and summary

pub mod coverage;
pub mod haversine;

pub use coverage::{
    analyze, analyze_points, classify, is_covered, nearest_clinic, nearest_clinic_distance,
    summarize, NearestClinic,
};
pub use haversine::{distance, EARTH_RADIUS_MILES};
