//! Property and scenario tests for the distance engine and coverage analyzer.

use coverage_backend::algorithms::{
    analyze_points, classify, distance, nearest_clinic, nearest_clinic_distance,
};
use coverage_backend::models::{Bracket, ClinicSet, ClinicSite, GeoPoint};
use coverage_backend::CoverageError;
use proptest::prelude::*;
use qtty::Miles;

fn three_clinics() -> ClinicSet {
    ClinicSet::new(vec![
        ClinicSite::new("A", 38.2527, -85.7585).unwrap(),
        ClinicSite::new("B", 38.1800, -85.7500).unwrap(),
        ClinicSite::new("C", 38.2200, -85.6000).unwrap(),
    ])
    .unwrap()
}

proptest! {
    #[test]
    fn prop_distance_to_self_is_zero(lat in -90.0..=90.0f64, lon in -180.0..=180.0f64) {
        let p = GeoPoint::new(lat, lon);
        prop_assert!(distance(&p, &p).value().abs() < 1e-9);
    }

    #[test]
    fn prop_distance_is_symmetric(
        lat1 in -90.0..=90.0f64, lon1 in -180.0..=180.0f64,
        lat2 in -90.0..=90.0f64, lon2 in -180.0..=180.0f64,
    ) {
        let a = GeoPoint::new(lat1, lon1);
        let b = GeoPoint::new(lat2, lon2);
        let ab = distance(&a, &b).value();
        let ba = distance(&b, &a).value();
        prop_assert!((ab - ba).abs() < 1e-9);
        prop_assert!(ab >= 0.0);
        // Half the circumference bounds every great-circle distance
        prop_assert!(ab <= std::f64::consts::PI * 3958.8 + 1e-6);
    }

    #[test]
    fn prop_nearest_is_minimum_of_pairwise(lat in 37.5..39.0f64, lon in -86.5..-85.0f64) {
        let clinics = three_clinics();
        let p = GeoPoint::new(lat, lon);
        let expected = clinics
            .iter()
            .map(|c| distance(&p, &c.location).value())
            .fold(f64::INFINITY, f64::min);
        let got = nearest_clinic_distance(&p, &clinics).unwrap().value();
        prop_assert!((got - expected).abs() <= 1e-6 * expected.max(1.0));
    }

    #[test]
    fn prop_bracket_counts_sum_to_total(
        points in proptest::collection::vec((37.0..39.5f64, -86.5..-85.0f64), 0..40),
        radius_idx in 0usize..8,
    ) {
        let radius = [1.0, 2.0, 3.0, 5.0, 8.0, 10.0, 15.0, 20.0][radius_idx];
        let points: Vec<GeoPoint> = points.into_iter().map(|(a, b)| GeoPoint::new(a, b)).collect();
        let analysis = analyze_points(&points, &ClinicSet::builtin(), Miles::new(radius)).unwrap();
        let summary = &analysis.summary;

        let sum: usize = summary.bracket_counts.iter().map(|b| b.count).sum();
        prop_assert_eq!(sum, summary.total_count);
        prop_assert_eq!(summary.covered_count, summary.count(Bracket::InRadius));
        prop_assert_eq!(summary.total_count, points.len());
    }
}

#[test]
fn test_nearest_picks_closest_of_three() {
    let clinics = three_clinics();
    // Just east of clinic C.
    let nearest = nearest_clinic(&GeoPoint::new(38.22, -85.59), &clinics).unwrap();
    assert_eq!(nearest.index, 2);
}

#[test]
fn test_nearest_distance_matches_reference_value() {
    // East Hub against A, B and C; reference values computed by hand with R = 3958.8 mi.
    let east_hub = GeoPoint::new(38.2450, -85.6000);
    let clinics = three_clinics();
    let expected = 1.727_352_360_698_680_5;
    let got = nearest_clinic_distance(&east_hub, &clinics).unwrap().value();
    assert!(
        (got - expected).abs() <= 1e-6 * expected,
        "nearest distance {got} != {expected}"
    );

    let downtown = GeoPoint::new(38.2527, -85.7585);
    let expected = 8.616_905_613_699_12;
    let got = distance(&downtown, &east_hub).value();
    assert!((got - expected).abs() <= 1e-6 * expected);
}

#[test]
fn test_bracket_boundaries_at_radius_five() {
    let r = Miles::new(5.0);
    assert_eq!(classify(Miles::new(5.0), r), Bracket::InRadius);
    assert_eq!(classify(Miles::new(5.0001), r), Bracket::Gap5);
    assert_eq!(classify(Miles::new(10.0), r), Bracket::Gap5);
    assert_eq!(classify(Miles::new(10.0001), r), Bracket::Gap10);
    assert_eq!(classify(Miles::new(15.0), r), Bracket::Gap10);
    assert_eq!(classify(Miles::new(15.0001), r), Bracket::CriticalGap);
}

#[test]
fn test_analyze_is_idempotent() {
    let points = vec![
        GeoPoint::new(38.25, -85.76),
        GeoPoint::new(38.10, -85.75),
        GeoPoint::new(37.00, -85.75),
    ];
    let clinics = ClinicSet::builtin();
    let first = analyze_points(&points, &clinics, Miles::new(5.0)).unwrap();
    let second = analyze_points(&points, &clinics, Miles::new(5.0)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_patient_on_downtown_clinic_is_covered_at_every_radius() {
    let points = [GeoPoint::new(38.2527, -85.7585)];
    for radius in [1.0, 2.0, 3.0, 5.0, 8.0, 10.0, 15.0, 20.0] {
        let analysis = analyze_points(&points, &ClinicSet::builtin(), Miles::new(radius)).unwrap();
        let patient = &analysis.patients[0];
        assert!(patient.min_distance_miles.value() < 1e-6);
        assert!(patient.covered);
        assert_eq!(patient.bracket, Bracket::InRadius);
        assert_eq!(patient.nearest_clinic, 0);
    }
}

#[test]
fn test_patient_twenty_miles_out_is_critical_gap() {
    // ~20 miles due south of South Center, farther from the rest.
    let points = [GeoPoint::new(37.8905, -85.75)];
    let analysis = analyze_points(&points, &ClinicSet::builtin(), Miles::new(5.0)).unwrap();
    let patient = &analysis.patients[0];
    assert!((patient.min_distance_miles.value() - 20.0).abs() < 0.1);
    assert!(!patient.covered);
    assert_eq!(patient.bracket, Bracket::CriticalGap);
    assert_eq!(analysis.summary.coverage_percent, 0.0);
}

#[test]
fn test_empty_dataset_reports_zero_percent() {
    let analysis = analyze_points(&[], &ClinicSet::builtin(), Miles::new(5.0)).unwrap();
    assert_eq!(analysis.summary.total_count, 0);
    assert_eq!(analysis.summary.coverage_percent, 0.0);
    assert!(analysis.summary.bracket_counts.iter().all(|b| b.count == 0));
}

#[test]
fn test_empty_clinic_set_is_an_error() {
    let clinics = ClinicSet::new(vec![]).unwrap();
    let err = analyze_points(&[GeoPoint::new(38.0, -85.0)], &clinics, Miles::new(5.0)).unwrap_err();
    assert!(matches!(err, CoverageError::EmptyClinicSet));
}

#[test]
fn test_negative_radius_is_an_error() {
    let err = analyze_points(&[], &ClinicSet::builtin(), Miles::new(-1.0)).unwrap_err();
    assert!(matches!(err, CoverageError::InvalidRadius(_)));
}
