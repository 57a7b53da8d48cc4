//! # Orbital element → Cartesian state transformation
//!
//! [`OrbitalStateTransform`] turns an [`OrbitalElementSet`] and a true anomaly into a
//! [`StateVector`] in the reference frame of the orbit:
//!
//! 1. the state is first written in the **perifocal frame** (x axis towards perihelion,
//!    z axis along the orbit pole):
//!    - `x = a(cos ν − e)`, `y = a√(1−e²)·sin ν`, `z = 0`
//!    - `vx = −√((1+e)/(a(1−e)))·sin ν`, `vy = √((1+e)/(a(1−e)))·cos ν`, `vz = 0`
//! 2. position and velocity are then rotated by the **same** 3-1-3 matrix
//!    `Rz(Ω)·Rx(i)·Rz(ω)` (see [`perifocal_to_reference`]).
//!
//! The velocity uses the normalized μ = 1 convention described in
//! [`state_vector`](crate::state_vector).
//!
//! [`compute_state`] chains the [`AnomalyResolver`] and the transform and is the single
//! entry point used by the batch layer.
//!
//! ## Example
//!
//! ```rust
//! use neorbit::orbital_elements::OrbitalElementSet;
//! use neorbit::orbital_state::compute_state;
//!
//! // circular equatorial orbit, object at its node
//! let elements = OrbitalElementSet::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0).unwrap();
//! let state = compute_state(&elements).unwrap();
//!
//! assert!((state.position.x - 1.0).abs() < 1e-15);
//! assert!(state.position.dot(&state.velocity).abs() < 1e-15);
//! ```

use nalgebra::{Rotation3, Vector3};

use crate::{
    constants::{Degree, RADEG},
    kepler::AnomalyResolver,
    neorbit_errors::NeorbitError,
    orbital_elements::{check_bound_orbit, OrbitalElementSet},
    ref_system::perifocal_to_reference,
    state_vector::StateVector,
};

/// Element set + true anomaly → state vector transformation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitalStateTransform {
    resolver: AnomalyResolver,
}

impl OrbitalStateTransform {
    pub fn new(resolver: AnomalyResolver) -> Self {
        OrbitalStateTransform { resolver }
    }

    pub fn resolver(&self) -> &AnomalyResolver {
        &self.resolver
    }

    /// Position and normalized velocity in the perifocal frame.
    ///
    /// Arguments
    /// ---------
    /// * `elements` – Element set (only `a` and `e` are used).
    /// * `true_anomaly` – `ν` (degrees).
    ///
    /// Return
    /// ------
    /// * The perifocal [`StateVector`]; both `z` components are zero.
    ///
    /// Errors
    /// ------
    /// * [`NeorbitError::InvalidOrbit`] – `e ∉ [0, 1)`, `a ≤ 0` or non-finite `ν`.
    pub fn perifocal_state(
        elements: &OrbitalElementSet,
        true_anomaly: Degree,
    ) -> Result<StateVector, NeorbitError> {
        let a = elements.semi_major_axis();
        let e = elements.eccentricity();
        check_bound_orbit(a, e)?;
        if !true_anomaly.is_finite() {
            return Err(NeorbitError::InvalidOrbit(format!(
                "true anomaly {true_anomaly} is not finite"
            )));
        }

        let (sin_nu, cos_nu) = (true_anomaly * RADEG).sin_cos();

        let position = Vector3::new(
            a * (cos_nu - e),
            a * (1.0 - e * e).sqrt() * sin_nu,
            0.0,
        );

        let velocity_scale = ((1.0 + e) / (a * (1.0 - e))).sqrt();
        let velocity = Vector3::new(-velocity_scale * sin_nu, velocity_scale * cos_nu, 0.0);

        Ok(StateVector::new(position, velocity))
    }

    /// Rotation from the perifocal frame of `elements` to their reference frame.
    pub fn rotation_matrix(elements: &OrbitalElementSet) -> Rotation3<f64> {
        perifocal_to_reference(
            elements.ascending_node_longitude_rad(),
            elements.inclination_rad(),
            elements.periapsis_argument_rad(),
        )
    }

    /// Cartesian state of `elements` at a given true anomaly.
    ///
    /// Arguments
    /// ---------
    /// * `elements` – Element set, semi-major axis in AU.
    /// * `true_anomaly` – `ν` (degrees).
    ///
    /// Return
    /// ------
    /// * The [`StateVector`] in the reference frame; position and velocity are rotated by the
    ///   identical matrix.
    ///
    /// See also
    /// --------
    /// * [`OrbitalStateTransform::perifocal_state`] – Error conditions.
    pub fn apply(
        elements: &OrbitalElementSet,
        true_anomaly: Degree,
    ) -> Result<StateVector, NeorbitError> {
        let perifocal = Self::perifocal_state(elements, true_anomaly)?;
        let rot = Self::rotation_matrix(elements);

        Ok(StateVector::new(
            rot * perifocal.position,
            rot * perifocal.velocity,
        ))
    }

    /// Resolve the true anomaly of `elements` and compute their state vector.
    pub fn compute_state(&self, elements: &OrbitalElementSet) -> Result<StateVector, NeorbitError> {
        let true_anomaly = self
            .resolver
            .true_anomaly(elements.mean_anomaly(), elements.eccentricity())?;
        Self::apply(elements, true_anomaly)
    }
}

/// State vector of `elements` with the default solver settings.
///
/// Equivalent to `OrbitalStateTransform::default().compute_state(elements)`.
pub fn compute_state(elements: &OrbitalElementSet) -> Result<StateVector, NeorbitError> {
    OrbitalStateTransform::default().compute_state(elements)
}
