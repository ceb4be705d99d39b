//! File loading entry points.

pub mod loaders;

pub use loaders::{PatientLoadResult, PatientLoader, UploadFormat};
