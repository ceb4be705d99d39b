//! Map layer data for the interactive map renderer.
//!
//! The renderer draws whatever this module hands it: clinic markers with
//! service-radius circles, a heat layer over the selected patients, one marker
//! per patient colored by coverage, and a legend.

use qtty::Miles;
use serde::{Deserialize, Serialize};

use crate::config::MapSettings;
use crate::models::{
    ClinicSet, CoverageAnalysis, HeatMode, MapOptions, MapStyle, PatientTable,
};

/// Conversion used for the radius circles drawn around clinics.
pub const METERS_PER_MILE: f64 = 1609.34;

pub const RADIUS_CIRCLE_COLOR: &str = "#00EAFF";
pub const UNCOVERED_COLOR: &str = "#00FFFF";
pub const COVERED_COLOR: &str = "#888888";
pub const PATIENT_STROKE_COLOR: &str = "#444444";
pub const CLINIC_MARKER_COLOR: &str = "red";

pub const HEAT_POINT_RADIUS: u32 = 20;
pub const HEAT_BLUR: u32 = 15;

/// Heat gradient stops from low to high density.
pub const HEAT_GRADIENT: [(f64, &str); 4] = [
    (0.2, "#00EAFF"),
    (0.4, "#00FF41"),
    (0.7, "#FFF000"),
    (1.0, "#FF0000"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
    pub style: MapStyle,
    pub tiles: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicMarker {
    pub name: String,
    pub location: [f64; 2],
    pub color: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiusCircle {
    pub center: [f64; 2],
    pub radius_meters: f64,
    pub color: String,
    pub weight: f64,
    pub fill_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicLayer {
    pub name: String,
    pub markers: Vec<ClinicMarker>,
    pub circles: Vec<RadiusCircle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub stop: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatLayer {
    pub name: String,
    pub mode: HeatMode,
    /// `[lat, lon, weight]` triples.
    pub points: Vec<[f64; 3]>,
    pub radius: u32,
    pub blur: u32,
    pub gradient: Vec<GradientStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientMarker {
    pub row: usize,
    pub location: [f64; 2],
    pub covered: bool,
    pub min_distance_miles: Miles,
    pub radius: f64,
    pub color: String,
    pub weight: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientLayer {
    pub name: String,
    pub markers: Vec<PatientMarker>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

/// Everything the map renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLayers {
    pub view: MapView,
    pub radius_miles: Miles,
    pub clinic_layer: ClinicLayer,
    /// Absent until a dataset has been uploaded.
    pub heat_layer: Option<HeatLayer>,
    pub patient_layer: Option<PatientLayer>,
    pub legend: Vec<LegendEntry>,
}

/// Patient data for the heat and marker layers. The analysis must have been
/// computed from `table` at the same radius.
#[derive(Debug, Clone, Copy)]
pub struct PatientOverlay<'a> {
    pub table: &'a PatientTable,
    pub analysis: &'a CoverageAnalysis,
}

/// Popup text shown when a patient marker is clicked.
pub fn patient_popup(min_distance: Miles) -> String {
    format!("Distance to Clinic: {:.2} miles", min_distance.value())
}

/// Build all map layers.
///
/// # Arguments
///
/// * `clinics` - Clinic set, drawn with one circle each
/// * `overlay` - Patients and their analysis, if a dataset is loaded
/// * `radius` - Service radius; circle size and heat subset depend on it
/// * `options` - Tile theme, heat weight and heat subset selection
/// * `settings` - Initial map center and zoom
pub fn build_map_layers(
    clinics: &ClinicSet,
    overlay: Option<PatientOverlay<'_>>,
    radius: Miles,
    options: &MapOptions,
    settings: &MapSettings,
) -> MapLayers {
    let view = MapView {
        center: [settings.center_latitude, settings.center_longitude],
        zoom: settings.zoom,
        style: options.style,
        tiles: options.style.tiles().to_string(),
    };

    let radius_meters = radius.value() * METERS_PER_MILE;
    let clinic_layer = ClinicLayer {
        name: "Clinics".to_string(),
        markers: clinics
            .iter()
            .map(|c| ClinicMarker {
                name: c.name.clone(),
                location: c.location.as_lat_lon(),
                color: CLINIC_MARKER_COLOR.to_string(),
                icon: "hospital".to_string(),
            })
            .collect(),
        circles: clinics
            .iter()
            .map(|c| RadiusCircle {
                center: c.location.as_lat_lon(),
                radius_meters,
                color: RADIUS_CIRCLE_COLOR.to_string(),
                weight: 2.0,
                fill_opacity: 0.1,
            })
            .collect(),
    };

    let (heat_layer, patient_layer) = match overlay {
        Some(overlay) => (
            Some(heat_layer(overlay, options)),
            Some(patient_layer(overlay)),
        ),
        None => (None, None),
    };

    MapLayers {
        view,
        radius_miles: radius,
        clinic_layer,
        heat_layer,
        patient_layer,
        legend: legend(radius),
    }
}

fn heat_layer(overlay: PatientOverlay<'_>, options: &MapOptions) -> HeatLayer {
    let weight = options.heat_intensity.value();
    let points = overlay
        .table
        .records
        .iter()
        .zip(&overlay.analysis.patients)
        .filter(|(_, result)| match options.heat_mode {
            HeatMode::AllPatients => true,
            HeatMode::OnlyUncovered => !result.covered,
        })
        .map(|(record, _)| {
            let [lat, lon] = record.location.as_lat_lon();
            [lat, lon, weight]
        })
        .collect();

    HeatLayer {
        name: "Heatmap".to_string(),
        mode: options.heat_mode,
        points,
        radius: HEAT_POINT_RADIUS,
        blur: HEAT_BLUR,
        gradient: HEAT_GRADIENT
            .iter()
            .map(|(stop, color)| GradientStop {
                stop: *stop,
                color: (*color).to_string(),
            })
            .collect(),
    }
}

fn patient_layer(overlay: PatientOverlay<'_>) -> PatientLayer {
    let markers = overlay
        .table
        .records
        .iter()
        .zip(&overlay.analysis.patients)
        .map(|(record, result)| PatientMarker {
            row: record.row,
            location: record.location.as_lat_lon(),
            covered: result.covered,
            min_distance_miles: result.min_distance_miles,
            radius: 2.5,
            color: PATIENT_STROKE_COLOR.to_string(),
            weight: 0.6,
            fill_color: if result.covered {
                COVERED_COLOR.to_string()
            } else {
                UNCOVERED_COLOR.to_string()
            },
            fill_opacity: 0.8,
            popup: patient_popup(result.min_distance_miles),
        })
        .collect();

    PatientLayer {
        name: "Patients".to_string(),
        markers,
    }
}

fn legend(radius: Miles) -> Vec<LegendEntry> {
    let entry = |label: String, color: &str| LegendEntry {
        label,
        color: color.to_string(),
    };
    vec![
        entry("Clinic".to_string(), CLINIC_MARKER_COLOR),
        entry(format!("Radius ({} mi)", radius.value()), RADIUS_CIRCLE_COLOR),
        entry("Uncovered".to_string(), UNCOVERED_COLOR),
        entry("Covered".to_string(), COVERED_COLOR),
        entry(
            "Patient density (low to high)".to_string(),
            HEAT_GRADIENT[HEAT_GRADIENT.len() - 1].1,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::analyze;
    use crate::models::{CellValue, GeoPoint, HeatIntensity, PatientRecord};

    fn table(points: &[(f64, f64)]) -> PatientTable {
        PatientTable::new(
            vec!["Latitude".into(), "Longitude".into()],
            points
                .iter()
                .enumerate()
                .map(|(i, (lat, lon))| PatientRecord {
                    row: i + 1,
                    location: GeoPoint::new(*lat, *lon),
                    cells: vec![CellValue::Number(*lat), CellValue::Number(*lon)],
                })
                .collect(),
        )
    }

    #[test]
    fn test_clinic_layer_only_without_dataset() {
        let layers = build_map_layers(
            &ClinicSet::builtin(),
            None,
            Miles::new(5.0),
            &MapOptions::default(),
            &MapSettings::default(),
        );
        assert_eq!(layers.clinic_layer.markers.len(), 5);
        assert_eq!(layers.clinic_layer.circles.len(), 5);
        assert!((layers.clinic_layer.circles[0].radius_meters - 8046.7).abs() < 1e-9);
        assert!(layers.heat_layer.is_none());
        assert!(layers.patient_layer.is_none());
        assert_eq!(layers.view.center, [38.2527, -85.7585]);
        assert_eq!(layers.view.tiles, "CartoDB dark_matter");
        assert_eq!(layers.legend[1].label, "Radius (5 mi)");
        assert_eq!(layers.legend.len(), 5);
    }

    #[test]
    fn test_only_uncovered_heat_subset() {
        let clinics = ClinicSet::builtin();
        // First patient sits on Downtown Clinic, second is far to the south.
        let table = table(&[(38.2527, -85.7585), (37.5, -85.7585)]);
        let radius = Miles::new(5.0);
        let analysis = analyze(&table.records, &clinics, radius).unwrap();
        let overlay = PatientOverlay {
            table: &table,
            analysis: &analysis,
        };

        let options = MapOptions {
            heat_mode: HeatMode::OnlyUncovered,
            heat_intensity: HeatIntensity::new(0.8).unwrap(),
            ..MapOptions::default()
        };
        let layers = build_map_layers(&clinics, Some(overlay), radius, &options, &MapSettings::default());
        let heat = layers.heat_layer.unwrap();
        assert_eq!(heat.points, vec![[37.5, -85.7585, 0.8]]);

        let all = build_map_layers(
            &clinics,
            Some(overlay),
            radius,
            &MapOptions::default(),
            &MapSettings::default(),
        );
        assert_eq!(all.heat_layer.unwrap().points.len(), 2);
    }

    #[test]
    fn test_patient_markers_colored_by_coverage() {
        let clinics = ClinicSet::builtin();
        let table = table(&[(38.2527, -85.7585), (37.5, -85.7585)]);
        let radius = Miles::new(5.0);
        let analysis = analyze(&table.records, &clinics, radius).unwrap();
        let layers = build_map_layers(
            &clinics,
            Some(PatientOverlay {
                table: &table,
                analysis: &analysis,
            }),
            radius,
            &MapOptions::default(),
            &MapSettings::default(),
        );
        let markers = layers.patient_layer.unwrap().markers;
        assert_eq!(markers[0].fill_color, COVERED_COLOR);
        assert_eq!(markers[0].popup, "Distance to Clinic: 0.00 miles");
        assert_eq!(markers[1].fill_color, UNCOVERED_COLOR);
        assert!(!markers[1].covered);
    }

    #[test]
    fn test_popup_two_decimals() {
        assert_eq!(patient_popup(Miles::new(3.14159)), "Distance to Clinic: 3.14 miles");
    }
}
