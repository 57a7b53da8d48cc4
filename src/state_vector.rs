//! # Cartesian state vectors
//!
//! [`StateVector`] is the output of the element → state transformation: a position and a
//! velocity expressed in the reference frame of the orbit.
//!
//! ## Unit contract
//!
//! The position is in **AU**. The velocity is **normalized**: it is computed with a
//! gravitational parameter μ = 1, so its unit is AU per `1/√μ` time unit and it is *not* a
//! physical velocity. Rescaling is always explicit:
//!
//! - [`StateVector::to_physical`] multiplies the velocity by `√μ` for a caller supplied μ
//!   (AU³ per squared time unit);
//! - [`StateVector::heliocentric_au_per_day`] uses the Gaussian constant `k² = μ☉`
//!   in AU³/day², giving AU/day;
//! - [`PhysicalStateVector::velocity_km_s`] converts AU/day into km/s.

use std::fmt;

use nalgebra::Vector3;

use crate::constants::{AU_PER_DAY_TO_KM_S, GAUSS_GRAV_SQUARED};

/// Position (AU) and normalized velocity (μ = 1) in the orbit's reference frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

/// Position (AU) and physical velocity (AU/day) obtained through an explicit rescaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalStateVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl StateVector {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        StateVector { position, velocity }
    }

    /// Heliocentric distance |r| (AU).
    pub fn distance(&self) -> f64 {
        self.position.norm()
    }

    /// Norm of the normalized velocity.
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Specific angular momentum `r × v` in normalized units.
    pub fn angular_momentum(&self) -> Vector3<f64> {
        self.position.cross(&self.velocity)
    }

    /// Specific orbital energy `v²/2 − 1/r` in normalized units (μ = 1).
    pub fn specific_energy(&self) -> f64 {
        0.5 * self.velocity.norm_squared() - 1.0 / self.position.norm()
    }

    /// Rescale the velocity for a gravitational parameter `gm`.
    ///
    /// Arguments
    /// ---------
    /// * `gm` – Gravitational parameter of the central body, in AU³ per squared time unit.
    ///
    /// Return
    /// ------
    /// * A [`PhysicalStateVector`] whose velocity is in AU per time unit of `gm`.
    pub fn to_physical(&self, gm: f64) -> PhysicalStateVector {
        PhysicalStateVector {
            position: self.position,
            velocity: self.velocity * gm.sqrt(),
        }
    }

    /// Rescale for heliocentric motion, velocity in AU/day.
    pub fn heliocentric_au_per_day(&self) -> PhysicalStateVector {
        self.to_physical(GAUSS_GRAV_SQUARED)
    }
}

impl PhysicalStateVector {
    /// Velocity in km/s, assuming the velocity is in AU/day.
    pub fn velocity_km_s(&self) -> Vector3<f64> {
        self.velocity * AU_PER_DAY_TO_KM_S
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  r = [{:+.9}, {:+.9}, {:+.9}] AU",
            self.position.x, self.position.y, self.position.z
        )?;
        write!(
            f,
            "  v = [{:+.9}, {:+.9}, {:+.9}] (normalized, μ = 1)",
            self.velocity.x, self.velocity.y, self.velocity.z
        )
    }
}
