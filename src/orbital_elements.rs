//! # Keplerian orbital element sets
//!
//! This module defines [`OrbitalElementSet`](crate::orbital_elements::OrbitalElementSet),
//! the **classical Keplerian element set** `(a, e, i, Ω, ω, M)` of one object at one epoch,
//! as received from an upstream catalog.
//!
//! ## Units
//!
//! - Lengths: **AU** (use [`OrbitalElementSet::from_kilometers`] for a semi-major axis in km)
//! - Angles: **degrees** at the boundary, **radians** through the `*_rad` accessors
//! - Epoch: optional [`hifitime::Epoch`] of osculation
//!
//! ## Domain
//!
//! Only bound orbits are supported. Construction fails with
//! [`NeorbitError::InvalidOrbit`] when:
//!
//! - the eccentricity is outside `[0, 1)` (parabolic and hyperbolic orbits are rejected),
//! - the semi-major axis is not a positive finite number,
//! - any angle is not finite.
//!
//! The inclination must lie in `[0°, 180°]` and is never wrapped
//! ([`NeorbitError::InclinationOutOfRange`] otherwise). The three other angles are reduced
//! into `[0°, 360°)` on construction, so every downstream trigonometric evaluation works on a
//! canonical value.
//!
//! ## Example
//!
//! ```rust
//! use neorbit::orbital_elements::OrbitalElementSet;
//!
//! let elements = OrbitalElementSet::new(1.458, 0.2227, 10.83, 304.3, 178.9, -50.0).unwrap();
//!
//! assert_eq!(elements.mean_anomaly(), 310.0);
//! assert!(OrbitalElementSet::new(1.458, 1.0, 10.83, 304.3, 178.9, 0.0).is_err());
//! ```

use std::fmt;

use hifitime::Epoch;

use crate::{
    constants::{AstronomicalUnit, Degree, Kilometer, Radian, AU, RADEG},
    kepler::principal_angle_deg,
    neorbit_errors::NeorbitError,
};

/// Keplerian orbital elements of a bound orbit (immutable, validated).
///
/// Units
/// -----
/// * `semi_major_axis`: Astronomical Units (AU).
/// * `eccentricity`: unitless, `0 ≤ e < 1`.
/// * `inclination`: degrees, `[0, 180]`.
/// * `ascending_node_longitude`: degrees (Ω), `[0, 360)`.
/// * `periapsis_argument`: degrees (ω), `[0, 360)`.
/// * `mean_anomaly`: degrees (M), `[0, 360)`.
///
/// See also
/// --------
/// * [`compute_state`](crate::orbital_state::compute_state) – Cartesian state of the set.
/// * [`CatalogOrbit`](crate::catalog::CatalogOrbit) – Raw catalog fields mapped onto this set.
#[derive(Debug, PartialEq, Clone)]
pub struct OrbitalElementSet {
    semi_major_axis: AstronomicalUnit,
    eccentricity: f64,
    inclination: Degree,
    ascending_node_longitude: Degree,
    periapsis_argument: Degree,
    mean_anomaly: Degree,
    epoch: Option<Epoch>,
}

/// Check that an eccentricity describes a bound (elliptic) orbit.
pub(crate) fn check_eccentricity(eccentricity: f64) -> Result<(), NeorbitError> {
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(NeorbitError::InvalidOrbit(format!(
            "eccentricity {eccentricity} outside [0, 1)"
        )));
    }
    Ok(())
}

/// Check that a length and an eccentricity describe a bound orbit.
pub(crate) fn check_bound_orbit(
    semi_major_axis: AstronomicalUnit,
    eccentricity: f64,
) -> Result<(), NeorbitError> {
    check_eccentricity(eccentricity)?;
    if !(semi_major_axis.is_finite() && semi_major_axis > 0.0) {
        return Err(NeorbitError::InvalidOrbit(format!(
            "semi-major axis {semi_major_axis} AU must be positive and finite"
        )));
    }
    Ok(())
}

fn check_angle(name: &str, value: Degree) -> Result<Degree, NeorbitError> {
    if !value.is_finite() {
        return Err(NeorbitError::InvalidOrbit(format!("{name} {value} is not finite")));
    }
    Ok(value)
}

impl OrbitalElementSet {
    /// Build and validate an element set.
    ///
    /// Arguments
    /// ---------
    /// * `semi_major_axis` – `a` (AU).
    /// * `eccentricity` – `e`.
    /// * `inclination` – `i` (degrees).
    /// * `ascending_node_longitude` – `Ω` (degrees).
    /// * `periapsis_argument` – `ω` (degrees).
    /// * `mean_anomaly` – `M` (degrees).
    ///
    /// Return
    /// ------
    /// * The element set, with Ω, ω and M reduced into `[0, 360)`.
    ///
    /// Errors
    /// ------
    /// * [`NeorbitError::InvalidOrbit`] – `e ∉ [0, 1)`, `a ≤ 0`, or a non-finite value.
    /// * [`NeorbitError::InclinationOutOfRange`] – `i ∉ [0, 180]`.
    pub fn new(
        semi_major_axis: AstronomicalUnit,
        eccentricity: f64,
        inclination: Degree,
        ascending_node_longitude: Degree,
        periapsis_argument: Degree,
        mean_anomaly: Degree,
    ) -> Result<Self, NeorbitError> {
        check_bound_orbit(semi_major_axis, eccentricity)?;

        let inclination = check_angle("inclination", inclination)?;
        if !(0.0..=180.0).contains(&inclination) {
            return Err(NeorbitError::InclinationOutOfRange(inclination));
        }

        let node = check_angle("longitude of ascending node", ascending_node_longitude)?;
        let peri = check_angle("argument of perihelion", periapsis_argument)?;
        let mean = check_angle("mean anomaly", mean_anomaly)?;

        Ok(OrbitalElementSet {
            semi_major_axis,
            eccentricity,
            inclination,
            ascending_node_longitude: principal_angle_deg(node),
            periapsis_argument: principal_angle_deg(peri),
            mean_anomaly: principal_angle_deg(mean),
            epoch: None,
        })
    }

    /// Same as [`OrbitalElementSet::new`] with a semi-major axis given in kilometers.
    pub fn from_kilometers(
        semi_major_axis: Kilometer,
        eccentricity: f64,
        inclination: Degree,
        ascending_node_longitude: Degree,
        periapsis_argument: Degree,
        mean_anomaly: Degree,
    ) -> Result<Self, NeorbitError> {
        OrbitalElementSet::new(
            semi_major_axis / AU,
            eccentricity,
            inclination,
            ascending_node_longitude,
            periapsis_argument,
            mean_anomaly,
        )
    }

    /// Attach the epoch of osculation the elements refer to.
    pub fn with_epoch(mut self, epoch: Epoch) -> Self {
        self.epoch = Some(epoch);
        self
    }

    pub fn semi_major_axis(&self) -> AstronomicalUnit {
        self.semi_major_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn inclination(&self) -> Degree {
        self.inclination
    }

    pub fn ascending_node_longitude(&self) -> Degree {
        self.ascending_node_longitude
    }

    pub fn periapsis_argument(&self) -> Degree {
        self.periapsis_argument
    }

    pub fn mean_anomaly(&self) -> Degree {
        self.mean_anomaly
    }

    pub fn epoch(&self) -> Option<Epoch> {
        self.epoch
    }

    pub fn inclination_rad(&self) -> Radian {
        self.inclination * RADEG
    }

    pub fn ascending_node_longitude_rad(&self) -> Radian {
        self.ascending_node_longitude * RADEG
    }

    pub fn periapsis_argument_rad(&self) -> Radian {
        self.periapsis_argument * RADEG
    }

    pub fn mean_anomaly_rad(&self) -> Radian {
        self.mean_anomaly * RADEG
    }

    /// Perihelion distance `q = a(1 − e)` (AU).
    pub fn perihelion_distance(&self) -> AstronomicalUnit {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Aphelion distance `Q = a(1 + e)` (AU).
    pub fn aphelion_distance(&self) -> AstronomicalUnit {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }
}

impl fmt::Display for OrbitalElementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.epoch {
            Some(epoch) => writeln!(f, "Keplerian Elements @ epoch: {epoch}")?,
            None => writeln!(f, "Keplerian Elements")?,
        }
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.6} AU",
            self.semi_major_axis
        )?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.6}",
            self.eccentricity
        )?;
        writeln!(
            f,
            "  i   (inclination)           = {:.6}°",
            self.inclination
        )?;
        writeln!(
            f,
            "  Ω   (longitude of node)     = {:.6}°",
            self.ascending_node_longitude
        )?;
        writeln!(
            f,
            "  ω   (argument of periapsis) = {:.6}°",
            self.periapsis_argument
        )?;
        writeln!(
            f,
            "  M   (mean anomaly)          = {:.6}°",
            self.mean_anomaly
        )
    }
}
