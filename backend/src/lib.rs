//! # Health Coverage Backend
//!
//! Geographic coverage analysis for a fixed set of health clinics.
//!
//! Given a table of patient locations, the backend computes each patient's
//! great-circle distance to the nearest clinic, decides coverage against a
//! chosen service radius, groups patients into radius-relative gap brackets,
//! and produces a summary, a two-sheet strategic report and the data for an
//! interactive map. An axum REST API exposes all of it to the dashboard.
//!
//! ## Architecture
//!
//! - [`models`]: Geographic points, clinics, patients, brackets and UI parameters
//! - [`algorithms`]: Haversine distance and the coverage analyzer
//! - [`parsing`]: CSV and spreadsheet ingestion into a patient table
//! - [`io`]: Upload format detection and loading
//! - [`services`]: Session state, map layers and the XLSX report
//! - [`config`]: TOML configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Example
//!
//! ```
//! use coverage_backend::algorithms::analyze_points;
//! use coverage_backend::models::{ClinicSet, GeoPoint};
//! use qtty::Miles;
//!
//! let patients = [GeoPoint::new(38.2527, -85.7585), GeoPoint::new(37.0, -85.7585)];
//! let analysis = analyze_points(&patients, &ClinicSet::builtin(), Miles::new(5.0)).unwrap();
//! assert_eq!(analysis.summary.covered_count, 1);
//! assert_eq!(analysis.summary.coverage_percent, 50.0);
//! ```

pub mod algorithms;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod parsing;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{CoverageError, CoverageResult};
