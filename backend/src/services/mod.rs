//! Service layer between the analysis core and the outer surfaces.
//!
//! Services own the single session, shape the map and report data contracts,
//! and serialize the report workbook.

pub mod map_layers;
pub mod report;
pub mod session;
pub mod xlsx_export;

pub use map_layers::{build_map_layers, MapLayers, PatientOverlay};
pub use report::{build_report, report_file_name, CoverageReport, ReportSheet};
pub use session::{CoverageSession, DatasetInfo, ParameterUpdate, ReportFile, SessionParameters};
pub use xlsx_export::write_xlsx;
