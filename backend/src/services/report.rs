//! Strategic report: a format-neutral two-sheet table plus its file name.

use qtty::Miles;
use serde::{Deserialize, Serialize};

use crate::error::{CoverageError, CoverageResult};
use crate::models::{Bracket, CellValue, CoverageAnalysis, PatientTable};

pub const DETAILED_SHEET: &str = "Detailed_Patient_Data";
pub const SUMMARY_SHEET: &str = "Executive_Summary";
pub const MIN_DIST_COLUMN: &str = "Min_Dist";
pub const BRACKET_COLUMN: &str = "Bracket";
pub const COUNT_COLUMN: &str = "count";

/// MIME type of the XLSX export.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// One sheet of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSheet {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// The full report, ready for a spreadsheet writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub file_name: String,
    pub sheets: Vec<ReportSheet>,
}

/// `Health_Coverage_Report_{radius}mi.xlsx`; whole radii print without `.0`.
pub fn report_file_name(radius: Miles) -> String {
    format!("Health_Coverage_Report_{}mi.xlsx", radius.value())
}

/// Build both report sheets.
///
/// The detailed sheet repeats every uploaded column and appends `Min_Dist` and
/// `Bracket` (overwriting same-named uploaded columns in place). Rows are
/// sorted by `Min_Dist`, farthest first; ties keep upload order.
pub fn build_report(table: &PatientTable, analysis: &CoverageAnalysis) -> CoverageResult<CoverageReport> {
    if table.records.len() != analysis.patients.len() {
        return Err(CoverageError::Export(format!(
            "analysis covers {} patients but the table has {}",
            analysis.patients.len(),
            table.records.len()
        )));
    }

    let mut header = table.columns.clone();
    let min_dist_idx = column_slot(&mut header, MIN_DIST_COLUMN);
    let bracket_idx = column_slot(&mut header, BRACKET_COLUMN);

    let mut order: Vec<usize> = (0..table.records.len()).collect();
    order.sort_by(|&a, &b| {
        let da = analysis.patients[a].min_distance_miles.value();
        let db = analysis.patients[b].min_distance_miles.value();
        db.total_cmp(&da)
    });

    let rows = order
        .into_iter()
        .map(|i| {
            let result = &analysis.patients[i];
            let mut cells = table.records[i].cells.clone();
            cells.resize(header.len(), CellValue::Empty);
            cells[min_dist_idx] = CellValue::Number(result.min_distance_miles.value());
            cells[bracket_idx] = CellValue::Text(result.bracket.label().to_string());
            cells
        })
        .collect();

    let detailed = ReportSheet {
        name: DETAILED_SHEET.to_string(),
        header,
        rows,
    };

    let summary = ReportSheet {
        name: SUMMARY_SHEET.to_string(),
        header: vec![BRACKET_COLUMN.to_string(), COUNT_COLUMN.to_string()],
        rows: Bracket::ALL
            .iter()
            .map(|b| {
                vec![
                    CellValue::Text(b.label().to_string()),
                    CellValue::Number(analysis.summary.count(*b) as f64),
                ]
            })
            .collect(),
    };

    Ok(CoverageReport {
        file_name: report_file_name(analysis.summary.radius_miles),
        sheets: vec![detailed, summary],
    })
}

fn column_slot(header: &mut Vec<String>, name: &str) -> usize {
    match header.iter().position(|c| c == name) {
        Some(idx) => idx,
        None => {
            header.push(name.to_string());
            header.len() - 1
        }
    }
}
