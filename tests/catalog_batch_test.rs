mod common;

use neorbit::catalog::{CatalogOrbit, CatalogRecord, CloseApproach, EstimatedDiameter};
use neorbit::neorbit::{Neorbit, StateParams};
use neorbit::neorbit_errors::NeorbitError;

use crate::common::assert_state_close;

fn catalog() -> Vec<CatalogRecord> {
    let orbit = |a: f64, e: f64, i: f64, node: f64, peri: f64, m: f64| CatalogOrbit {
        semi_major_axis: a,
        eccentricity: e,
        inclination: i,
        ascending_node_longitude: node,
        perihelion_argument: peri,
        mean_anomaly: m,
        perihelion_distance: Some(a * (1.0 - e)),
        mean_motion: None,
        epoch_osculation: Some(2_460_600.5),
    };
    let approach = |mph: f64, km: f64, body: &str| CloseApproach {
        relative_velocity_mph: mph,
        miss_distance_km: km,
        orbiting_body: body.into(),
    };

    vec![
        CatalogRecord {
            id: "2000433".into(),
            name: "433 Eros (A898 PA)".into(),
            estimated_diameter: EstimatedDiameter {
                min_km: 22.1,
                max_km: 49.4,
            },
            close_approaches: vec![approach(13_000.0, 2.6e7, "Earth")],
            orbit: Some(orbit(1.458, 0.2227, 10.83, 304.3, 178.9, 110.8)),
        },
        CatalogRecord {
            id: "2099942".into(),
            name: "99942 Apophis (2004 MN4)".into(),
            estimated_diameter: EstimatedDiameter {
                min_km: 0.31,
                max_km: 0.69,
            },
            close_approaches: vec![approach(16_500.0, 3.8e4, "Earth")],
            orbit: Some(orbit(0.9224, 0.1914, 3.34, 204.0, 126.6, 215.5)),
        },
        CatalogRecord {
            id: "3000001".into(),
            name: "malformed".into(),
            estimated_diameter: EstimatedDiameter {
                min_km: 0.01,
                max_km: 0.02,
            },
            close_approaches: vec![approach(60_000.0, 9.0e6, "Mars")],
            orbit: Some(orbit(1.2, 1.0, 5.0, 0.0, 0.0, 0.0)),
        },
    ]
}

#[test]
fn test_catalog_batch() {
    common::init_tracing();
    let records = catalog();
    let neorbit = Neorbit::new(StateParams::default());

    let states = neorbit.compute_catalog_states(&records);
    assert_eq!(states.len(), 3);

    for (record, (id, state)) in records.iter().zip(&states).take(2) {
        assert_eq!(&record.id, id);
        let expected = neorbit
            .compute_state(&record.orbital_elements().unwrap())
            .unwrap();
        assert_state_close(state.as_ref().unwrap(), &expected, 0.0);

        // heliocentric distance stays between the apsides
        let elements = record.orbital_elements().unwrap();
        let r = state.as_ref().unwrap().distance();
        assert!(r >= elements.perihelion_distance() - 1e-12);
        assert!(r <= elements.aphelion_distance() + 1e-12);
    }

    assert_eq!(states[2].0, "3000001");
    assert!(matches!(states[2].1, Err(NeorbitError::InvalidOrbit(_))));
}

#[test]
fn test_catalog_summary() {
    let summary = Neorbit::default().summarize(&catalog());

    assert_eq!(summary.total_objects, 3);
    assert_eq!(summary.orbiting_bodies.len(), 2);
    assert_eq!(summary.closest_miss_distance_km, Some(3.8e4));
    assert_eq!(summary.furthest_miss_distance_km, Some(2.6e7));
    assert_eq!(summary.smallest_diameter_km, Some(0.01));
    assert_eq!(summary.largest_diameter_km, Some(49.4));

    let report = summary.to_string();
    assert!(report.contains("All Orbiting Bodies: {Earth, Mars}"));
}
