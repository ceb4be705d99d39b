//! Coverage analysis results.

use qtty::Miles;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Radius-relative distance category.
///
/// Variant order is the fixed bracket order used in summaries and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Bracket {
    InRadius,
    Gap5,
    Gap10,
    CriticalGap,
}

impl Bracket {
    pub const ALL: [Bracket; 4] = [
        Bracket::InRadius,
        Bracket::Gap5,
        Bracket::Gap10,
        Bracket::CriticalGap,
    ];

    /// Display label, as shown in the dashboard and the report.
    pub fn label(&self) -> &'static str {
        match self {
            Bracket::InRadius => "In Radius",
            Bracket::Gap5 => "+5 Miles Gap",
            Bracket::Gap10 => "+10 Miles Gap",
            Bracket::CriticalGap => "Critical Gap",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Derived fields for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientCoverage {
    /// 1-based data row of the source record.
    pub row: usize,
    pub min_distance_miles: Miles,
    /// Index into the clinic set of the nearest clinic.
    pub nearest_clinic: usize,
    pub covered: bool,
    pub bracket: Bracket,
}

/// Count for one bracket label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketCount {
    pub bracket: Bracket,
    pub label: String,
    pub count: usize,
}

/// Aggregate over all patients for one radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub radius_miles: Miles,
    pub total_count: usize,
    pub covered_count: usize,
    /// 0-100, rounded to one decimal place; 0 for an empty dataset.
    pub coverage_percent: f64,
    /// Always four entries, in [`Bracket::ALL`] order.
    pub bracket_counts: Vec<BracketCount>,
}

impl CoverageSummary {
    pub fn count(&self, bracket: Bracket) -> usize {
        self.bracket_counts
            .iter()
            .find(|b| b.bracket == bracket)
            .map_or(0, |b| b.count)
    }

    pub fn uncovered_count(&self) -> usize {
        self.total_count - self.covered_count
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

/// Full analysis output: per-patient rows in input order plus the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageAnalysis {
    pub patients: Vec<PatientCoverage>,
    pub summary: CoverageSummary,
}
