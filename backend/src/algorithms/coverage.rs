//! Coverage analysis: nearest clinic, bracket assignment and aggregation.
//!
//! Everything here is a pure function of `(patients, clinics, radius)`. There
//! is no cached state; changing the radius means calling [`analyze`] again on
//! the full patient set.

use log::debug;
use qtty::Miles;

use super::haversine::distance;
use crate::error::{CoverageError, CoverageResult};
use crate::models::{
    Bracket, BracketCount, ClinicSet, CoverageAnalysis, CoverageSummary, GeoPoint,
    PatientCoverage, PatientRecord,
};

/// Width of the `Gap5` and `Gap10` brackets beyond the radius, in miles.
pub const GAP_STEP_MILES: f64 = 5.0;

/// Nearest clinic for a single patient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestClinic {
    /// Index into the clinic set.
    pub index: usize,
    pub distance: Miles,
}

/// Find the clinic closest to `patient`.
///
/// Ties resolve to the clinic that comes first in the set.
///
/// # Errors
///
/// Returns [`CoverageError::EmptyClinicSet`] when `clinics` is empty.
pub fn nearest_clinic(patient: &GeoPoint, clinics: &ClinicSet) -> CoverageResult<NearestClinic> {
    clinics
        .iter()
        .enumerate()
        .map(|(index, clinic)| NearestClinic {
            index,
            distance: distance(patient, &clinic.location),
        })
        .fold(None, |best: Option<NearestClinic>, candidate| match best {
            Some(b) if b.distance.value() <= candidate.distance.value() => Some(b),
            _ => Some(candidate),
        })
        .ok_or(CoverageError::EmptyClinicSet)
}

/// Minimum haversine distance from `patient` to any clinic.
///
/// # Errors
///
/// Returns [`CoverageError::EmptyClinicSet`] when `clinics` is empty.
pub fn nearest_clinic_distance(patient: &GeoPoint, clinics: &ClinicSet) -> CoverageResult<Miles> {
    nearest_clinic(patient, clinics).map(|n| n.distance)
}

/// Assign a bracket from the nearest-clinic distance and the service radius.
///
/// Edges are `[0, r, r+5, r+10, ∞)` and every interval is closed on the right,
/// so a patient exactly on the radius is `InRadius`, matching the `covered`
/// test `d <= r`:
///
/// | distance            | bracket       |
/// |---------------------|---------------|
/// | `d <= r`            | `InRadius`    |
/// | `r < d <= r+5`      | `Gap5`        |
/// | `r+5 < d <= r+10`   | `Gap10`       |
/// | `d > r+10`          | `CriticalGap` |
///
/// `CriticalGap` has no upper bound.
pub fn classify(min_distance: Miles, radius: Miles) -> Bracket {
    let d = min_distance.value();
    let r = radius.value();

    if d <= r {
        Bracket::InRadius
    } else if d <= r + GAP_STEP_MILES {
        Bracket::Gap5
    } else if d <= r + 2.0 * GAP_STEP_MILES {
        Bracket::Gap10
    } else {
        Bracket::CriticalGap
    }
}

/// Whether a patient at `min_distance` is inside the service radius.
pub fn is_covered(min_distance: Miles, radius: Miles) -> bool {
    min_distance.value() <= radius.value()
}

/// Classify every patient and aggregate the results.
///
/// # Arguments
///
/// * `patients` - Uploaded records, in upload order
/// * `clinics` - Non-empty clinic set
/// * `radius` - Service radius in miles, finite and non-negative
///
/// # Returns
///
/// Per-patient results in the same order as `patients`, plus the summary.
///
/// # Errors
///
/// * [`CoverageError::EmptyClinicSet`] if `clinics` is empty
/// * [`CoverageError::InvalidRadius`] if `radius` is negative or not finite
pub fn analyze(
    patients: &[PatientRecord],
    clinics: &ClinicSet,
    radius: Miles,
) -> CoverageResult<CoverageAnalysis> {
    analyze_located(
        patients.iter().map(|p| (p.row, p.location)),
        clinics,
        radius,
    )
}

/// Same as [`analyze`] for bare points; rows are numbered from 1.
pub fn analyze_points(
    points: &[GeoPoint],
    clinics: &ClinicSet,
    radius: Miles,
) -> CoverageResult<CoverageAnalysis> {
    analyze_located(
        points.iter().enumerate().map(|(i, p)| (i + 1, *p)),
        clinics,
        radius,
    )
}

fn analyze_located<I>(located: I, clinics: &ClinicSet, radius: Miles) -> CoverageResult<CoverageAnalysis>
where
    I: Iterator<Item = (usize, GeoPoint)>,
{
    if !radius.value().is_finite() || radius.value() < 0.0 {
        return Err(CoverageError::InvalidRadius(radius.value()));
    }
    if clinics.is_empty() {
        return Err(CoverageError::EmptyClinicSet);
    }

    let patients = located
        .map(|(row, location)| {
            let nearest = nearest_clinic(&location, clinics)?;
            Ok(PatientCoverage {
                row,
                min_distance_miles: nearest.distance,
                nearest_clinic: nearest.index,
                covered: is_covered(nearest.distance, radius),
                bracket: classify(nearest.distance, radius),
            })
        })
        .collect::<CoverageResult<Vec<_>>>()?;

    let summary = summarize(&patients, radius);
    debug!(
        "Coverage pass: radius={} mi, total={}, covered={}, percent={}",
        radius.value(),
        summary.total_count,
        summary.covered_count,
        summary.coverage_percent
    );

    Ok(CoverageAnalysis { patients, summary })
}

/// Aggregate per-patient results into a summary.
///
/// All four brackets are always present. The percentage is rounded to one
/// decimal place and is `0.0` for an empty slice.
pub fn summarize(patients: &[PatientCoverage], radius: Miles) -> CoverageSummary {
    let mut counts = [0usize; 4];
    let mut covered_count = 0;
    for p in patients {
        counts[p.bracket.index()] += 1;
        if p.covered {
            covered_count += 1;
        }
    }

    let total_count = patients.len();
    let coverage_percent = if total_count == 0 {
        0.0
    } else {
        round_one_decimal(100.0 * covered_count as f64 / total_count as f64)
    };

    let bracket_counts = Bracket::ALL
        .iter()
        .map(|b| BracketCount {
            bracket: *b,
            label: b.label().to_string(),
            count: counts[b.index()],
        })
        .collect();

    CoverageSummary {
        radius_miles: radius,
        total_count,
        covered_count,
        coverage_percent,
        bracket_counts,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClinicSite;

    fn mi(v: f64) -> Miles {
        Miles::new(v)
    }

    #[test]
    fn test_classify_boundaries_at_radius_five() {
        let r = mi(5.0);
        assert_eq!(classify(mi(0.0), r), Bracket::InRadius);
        assert_eq!(classify(mi(5.0), r), Bracket::InRadius);
        assert_eq!(classify(mi(5.0001), r), Bracket::Gap5);
        assert_eq!(classify(mi(10.0), r), Bracket::Gap5);
        assert_eq!(classify(mi(10.0001), r), Bracket::Gap10);
        assert_eq!(classify(mi(15.0), r), Bracket::Gap10);
        assert_eq!(classify(mi(15.0001), r), Bracket::CriticalGap);
    }

    #[test]
    fn test_classify_far_distances_are_critical() {
        assert_eq!(classify(mi(250.0), mi(5.0)), Bracket::CriticalGap);
        assert_eq!(classify(mi(12_000.0), mi(20.0)), Bracket::CriticalGap);
    }

    #[test]
    fn test_classify_agrees_with_covered() {
        for d in [0.0, 0.99, 1.0, 1.01, 3.0, 7.5] {
            let r = mi(1.0);
            assert_eq!(
                classify(mi(d), r) == Bracket::InRadius,
                is_covered(mi(d), r),
                "distance {}",
                d
            );
        }
    }

    #[test]
    fn test_nearest_clinic_empty_set() {
        let clinics = ClinicSet::new(vec![]).unwrap();
        let err = nearest_clinic_distance(&GeoPoint::new(0.0, 0.0), &clinics).unwrap_err();
        assert!(matches!(err, CoverageError::EmptyClinicSet));
    }

    #[test]
    fn test_nearest_clinic_tie_prefers_first() {
        let clinics = ClinicSet::new(vec![
            ClinicSite::new("North", 1.0, 0.0).unwrap(),
            ClinicSite::new("South", -1.0, 0.0).unwrap(),
        ])
        .unwrap();
        let nearest = nearest_clinic(&GeoPoint::new(0.0, 0.0), &clinics).unwrap();
        assert_eq!(nearest.index, 0);
    }

    #[test]
    fn test_analyze_rejects_bad_radius() {
        let clinics = ClinicSet::builtin();
        assert!(matches!(
            analyze_points(&[], &clinics, mi(-1.0)),
            Err(CoverageError::InvalidRadius(_))
        ));
        assert!(matches!(
            analyze_points(&[], &clinics, mi(f64::NAN)),
            Err(CoverageError::InvalidRadius(_))
        ));
    }

    #[test]
    fn test_analyze_empty_clinics_fails_even_without_patients() {
        let clinics = ClinicSet::new(vec![]).unwrap();
        assert!(matches!(
            analyze_points(&[], &clinics, mi(5.0)),
            Err(CoverageError::EmptyClinicSet)
        ));
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[], mi(5.0));
        assert_eq!(summary.total_count, 0);
        assert_eq!(summary.coverage_percent, 0.0);
        assert_eq!(summary.bracket_counts.len(), 4);
        assert!(summary.bracket_counts.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_summarize_rounds_to_one_decimal() {
        let make = |covered: bool| PatientCoverage {
            row: 1,
            min_distance_miles: mi(if covered { 1.0 } else { 30.0 }),
            nearest_clinic: 0,
            covered,
            bracket: if covered {
                Bracket::InRadius
            } else {
                Bracket::CriticalGap
            },
        };
        let patients = vec![make(true), make(true), make(false)];
        let summary = summarize(&patients, mi(5.0));
        assert_eq!(summary.coverage_percent, 66.7);
        assert_eq!(summary.count(Bracket::CriticalGap), 1);
    }

    #[test]
    fn test_analyze_preserves_record_rows() {
        let records = vec![
            PatientRecord {
                row: 2,
                location: GeoPoint::new(38.2527, -85.7585),
                cells: vec![],
            },
            PatientRecord {
                row: 5,
                location: GeoPoint::new(38.2450, -85.6000),
                cells: vec![],
            },
        ];
        let result = analyze(&records, &ClinicSet::builtin(), mi(5.0)).unwrap();
        let rows: Vec<usize> = result.patients.iter().map(|p| p.row).collect();
        assert_eq!(rows, vec![2, 5]);
        assert_eq!(result.patients[1].nearest_clinic, 1);
    }
}
