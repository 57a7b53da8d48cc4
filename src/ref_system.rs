//! Elementary rotations and the perifocal → reference frame rotation.
//!
//! Rotations are *active*: `rotmt(α, axis) · v` turns `v` by `+α` about `axis`.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::Radian;

/// Cartesian axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Elementary rotation of angle `alpha` about one coordinate axis.
pub fn rotmt(alpha: Radian, axis: Axis) -> Rotation3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha)
}

/// Rotation from the perifocal frame of an orbit to its reference frame.
///
/// This is the classical 3-1-3 Euler sequence `R = Rz(Ω) · Rx(i) · Rz(ω)`: the perifocal
/// vector is first turned by the argument of perihelion within the orbital plane, then the
/// plane is tilted by the inclination about the line of nodes, and finally the line of nodes
/// is turned by the longitude of the ascending node.
///
/// Arguments
/// ---------
/// * `ascending_node_longitude` – Ω (radians).
/// * `inclination` – i (radians).
/// * `periapsis_argument` – ω (radians).
///
/// Return
/// ------
/// * An orthonormal rotation, to be applied identically to position and velocity.
pub fn perifocal_to_reference(
    ascending_node_longitude: Radian,
    inclination: Radian,
    periapsis_argument: Radian,
) -> Rotation3<f64> {
    rotmt(ascending_node_longitude, Axis::Z)
        * rotmt(inclination, Axis::X)
        * rotmt(periapsis_argument, Axis::Z)
}

/// Closed form of [`perifocal_to_reference`], entry by entry.
pub fn perifocal_to_reference_matrix(
    ascending_node_longitude: Radian,
    inclination: Radian,
    periapsis_argument: Radian,
) -> Matrix3<f64> {
    let (sin_node, cos_node) = ascending_node_longitude.sin_cos();
    let (sin_incl, cos_incl) = inclination.sin_cos();
    let (sin_peri, cos_peri) = periapsis_argument.sin_cos();

    Matrix3::new(
        cos_node * cos_peri - sin_node * sin_peri * cos_incl,
        -cos_node * sin_peri - sin_node * cos_peri * cos_incl,
        sin_node * sin_incl,
        sin_node * cos_peri + cos_node * sin_peri * cos_incl,
        -sin_node * sin_peri + cos_node * cos_peri * cos_incl,
        -cos_node * sin_incl,
        sin_peri * sin_incl,
        cos_peri * sin_incl,
        cos_incl,
    )
}
