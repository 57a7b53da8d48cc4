//! # Catalog records
//!
//! Plain data structures mirroring the fields an ingestion layer extracts from a
//! near-Earth-object catalog: identification, estimated size, close approaches and the
//! osculating orbit. They derive [`serde::Serialize`] and [`serde::Deserialize`] so that the
//! caller can fill them from whatever source it reads; this crate performs no I/O.
//!
//! [`CatalogRecord::orbital_elements`] is the bridge towards the numeric core: it maps the
//! raw orbit onto a validated [`OrbitalElementSet`].

use hifitime::Epoch;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    constants::{AstronomicalUnit, Degree, Kilometer, JD},
    neorbit_errors::NeorbitError,
    orbital_elements::OrbitalElementSet,
};

/// Relative tolerance on the reported perihelion distance against `a(1 − e)`.
const PERIHELION_CONSISTENCY: f64 = 1e-3;

/// Estimated diameter range of an object (km).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    pub min_km: Kilometer,
    pub max_km: Kilometer,
}

/// One close approach of an object to a planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseApproach {
    /// Relative velocity at closest approach (miles per hour).
    pub relative_velocity_mph: f64,
    /// Miss distance (km).
    pub miss_distance_km: Kilometer,
    /// Body being approached (e.g. `"Earth"`).
    pub orbiting_body: String,
}

/// Osculating orbit as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogOrbit {
    pub semi_major_axis: AstronomicalUnit,
    pub eccentricity: f64,
    pub inclination: Degree,
    pub ascending_node_longitude: Degree,
    pub perihelion_argument: Degree,
    pub mean_anomaly: Degree,
    #[serde(default)]
    pub perihelion_distance: Option<AstronomicalUnit>,
    /// Mean motion (degrees per day).
    #[serde(default)]
    pub mean_motion: Option<f64>,
    /// Epoch of osculation (Julian Date, TDB).
    #[serde(default)]
    pub epoch_osculation: Option<JD>,
}

/// One near-Earth object as delivered by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub estimated_diameter: EstimatedDiameter,
    #[serde(default)]
    pub close_approaches: Vec<CloseApproach>,
    #[serde(default)]
    pub orbit: Option<CatalogOrbit>,
}

impl CatalogOrbit {
    /// Validated element set of this orbit.
    ///
    /// The epoch of osculation, when present, is attached to the element set. A reported
    /// perihelion distance that disagrees with `a(1 − e)` is logged but not rejected.
    pub fn to_elements(&self) -> Result<OrbitalElementSet, NeorbitError> {
        let mut elements = OrbitalElementSet::new(
            self.semi_major_axis,
            self.eccentricity,
            self.inclination,
            self.ascending_node_longitude,
            self.perihelion_argument,
            self.mean_anomaly,
        )?;

        if let Some(q) = self.perihelion_distance {
            let expected = elements.perihelion_distance();
            if ((q - expected) / expected).abs() > PERIHELION_CONSISTENCY {
                warn!(
                    reported = q,
                    expected, "perihelion distance inconsistent with a(1 - e)"
                );
            }
        }

        if let Some(jd) = self.epoch_osculation {
            elements = elements.with_epoch(Epoch::from_jde_tdb(jd));
        }

        Ok(elements)
    }
}

impl CatalogRecord {
    /// Validated element set of the object.
    ///
    /// Errors
    /// ------
    /// * [`NeorbitError::InvalidCatalogRecord`] – the record has no orbit.
    /// * Any error of [`OrbitalElementSet::new`] for a malformed orbit.
    pub fn orbital_elements(&self) -> Result<OrbitalElementSet, NeorbitError> {
        let orbit = self
            .orbit
            .as_ref()
            .ok_or_else(|| NeorbitError::InvalidCatalogRecord {
                id: self.id.clone(),
                reason: "missing orbital data".into(),
            })?;
        orbit.to_elements()
    }

    /// First reported close approach, the one used for batch statistics.
    pub fn first_close_approach(&self) -> Option<&CloseApproach> {
        self.close_approaches.first()
    }
}

#[cfg(test)]
pub(crate) mod catalog_test {
    use super::*;

    pub(crate) fn record(id: &str, orbit: Option<CatalogOrbit>) -> CatalogRecord {
        CatalogRecord {
            id: id.into(),
            name: format!("({id})"),
            estimated_diameter: EstimatedDiameter {
                min_km: 0.1,
                max_km: 0.3,
            },
            close_approaches: vec![CloseApproach {
                relative_velocity_mph: 40_000.0,
                miss_distance_km: 5.0e6,
                orbiting_body: "Earth".into(),
            }],
            orbit,
        }
    }

    pub(crate) fn orbit(a: f64, e: f64) -> CatalogOrbit {
        CatalogOrbit {
            semi_major_axis: a,
            eccentricity: e,
            inclination: 10.83,
            ascending_node_longitude: 304.3,
            perihelion_argument: 178.9,
            mean_anomaly: 110.8,
            perihelion_distance: Some(a * (1.0 - e)),
            mean_motion: None,
            epoch_osculation: Some(2_460_600.5),
        }
    }

    #[test]
    fn test_orbital_elements() {
        let rec = record("2000433", Some(orbit(1.458, 0.2227)));
        let elements = rec.orbital_elements().unwrap();

        assert_eq!(elements.semi_major_axis(), 1.458);
        assert_eq!(elements.eccentricity(), 0.2227);
        assert_eq!(elements.mean_anomaly(), 110.8);
        assert_eq!(elements.epoch(), Some(Epoch::from_jde_tdb(2_460_600.5)));
    }

    #[test]
    fn test_missing_orbit() {
        let rec = record("3542519", None);
        assert_eq!(
            rec.orbital_elements(),
            Err(NeorbitError::InvalidCatalogRecord {
                id: "3542519".into(),
                reason: "missing orbital data".into(),
            })
        );
    }

    #[test]
    fn test_hyperbolic_orbit_is_rejected() {
        let rec = record("C2017U1", Some(orbit(-1.27, 1.2)));
        assert!(matches!(
            rec.orbital_elements(),
            Err(NeorbitError::InvalidOrbit(_))
        ));
    }

    #[test]
    fn test_first_close_approach() {
        let mut rec = record("1", None);
        assert_eq!(rec.first_close_approach().unwrap().orbiting_body, "Earth");

        rec.close_approaches.clear();
        assert!(rec.first_close_approach().is_none());
    }
}
