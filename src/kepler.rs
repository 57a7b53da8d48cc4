//! # Anomaly resolution
//!
//! Conversion of a **mean anomaly** into the corresponding **true anomaly** for a bound
//! (elliptic) orbit, through the eccentric anomaly:
//!
//! 1. Kepler's equation `M = E − e·sin(E)` is solved for `E` with a Newton–Raphson
//!    search started at `E₀ = M`, or at `E₀ = π` for highly eccentric orbits
//!    (see [`AnomalyResolver::eccentric_anomaly`] and [`initial_guess`]).
//! 2. The half-angle relation
//!    `ν = 2·atan2(√(1+e)·sin(E/2), √(1−e)·cos(E/2))` gives the true anomaly
//!    (see [`eccentric_to_true`]).
//!
//! Angles are expressed in **degrees** at the public boundary and in **radians** for every
//! intermediate computation. All returned angles are normalized into `[0, 360)` degrees
//! (or `[0, 2π)` radians).
//!
//! ## Convergence
//!
//! The Newton iteration stops only when the step `|E_{n+1} − E_n|` falls below the
//! tolerance (or the residual is exactly zero). A small residual alone is not enough: close
//! to `e = 1` Kepler's function is nearly flat around perihelion, and the half-angle
//! relation amplifies any error on `E` by about `√(2/(1−e))`.
//!
//! Mean anomalies past `π` are mirrored onto `[0, π]` through `E(2π − M) = 2π − E(M)`, and
//! the residual is evaluated as `(1−e)·sin(E) + (E − sin(E)) − M` with a series for
//! `E − sin(E)` at small `E`, so the step keeps shrinking below the tolerance even for
//! `1 − e ~ 1e-10`. The iteration slows down as `e → 1`: about 10 steps at `e = 0.99` and
//! around 30 for `1 − e ~ 1e-9` with the default tolerance. When the cap is reached the
//! record fails with [`NeorbitError::KeplerNonConvergence`]: no low-confidence estimate is
//! ever returned.
//!
//! ## Example
//!
//! ```rust
//! use neorbit::kepler::AnomalyResolver;
//!
//! let resolver = AnomalyResolver::default();
//! let anomalies = resolver.resolve(57.29577951308232, 0.1).unwrap();
//!
//! assert!((anomalies.eccentric_anomaly() - 1.0885977523978936).abs() < 1e-12);
//! ```

use std::cell::Cell;

use roots::{find_root_newton_raphson, Convergency, SearchError};
use tracing::{debug, warn};

use crate::{
    constants::{Degree, Radian, DPI, RADEG},
    neorbit_errors::NeorbitError,
    orbital_elements::check_eccentricity,
};

/// Default stopping tolerance of the Newton iteration (radians).
pub const DEFAULT_KEPLER_TOLERANCE: f64 = 1e-12;

/// Default cap on the number of Newton iterations.
pub const DEFAULT_KEPLER_MAX_ITERATIONS: usize = 50;

/// Above this eccentricity the Newton search starts from `π` instead of `M`.
///
/// Starting from `M` oscillates for `e ≳ 0.99` and small `M`; starting from `π` converges
/// monotonically for every `M` in `[0, 2π)`.
pub const HIGH_ECCENTRICITY: f64 = 0.8;

/// Principal value of an angle in radians, in `[0, 2π)`.
pub fn principal_angle(a: Radian) -> Radian {
    fold_turn(a.rem_euclid(DPI), DPI)
}

/// Principal value of an angle in degrees, in `[0, 360)`.
pub fn principal_angle_deg(a: Degree) -> Degree {
    fold_turn(a.rem_euclid(360.0), 360.0)
}

// rem_euclid rounds tiny negative angles up to the full turn itself
fn fold_turn(reduced: f64, turn: f64) -> f64 {
    if reduced >= turn {
        0.0
    } else {
        reduced
    }
}

/// Residual of Kepler's equation, `E − e·sin(E) − M`.
pub fn kepler_residual(eccentric_anomaly: Radian, eccentricity: f64, mean_anomaly: Radian) -> f64 {
    eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly
}

/// `E − sin(E)` without cancellation for small `|E|`.
fn angle_minus_sine(x: Radian) -> f64 {
    if x.abs() >= 1.0 {
        return x - x.sin();
    }

    // x³/3! − x⁵/5! + x⁷/7! − …
    let x2 = x * x;
    let mut term = x * x2 / 6.0;
    let mut sum: f64 = 0.0;
    let mut k = 3.0;
    while term.abs() > f64::EPSILON * 0.1 * sum.abs() {
        sum += term;
        term *= -x2 / ((k + 1.0) * (k + 2.0));
        k += 2.0;
    }
    sum + term
}

/// Kepler's function `E − e·sin(E) − M`, written as `(1−e)·sin(E) + (E − sin(E)) − M`.
fn kepler_function(eccentric_anomaly: Radian, eccentricity: f64, mean_anomaly: Radian) -> f64 {
    (1.0 - eccentricity) * eccentric_anomaly.sin() + angle_minus_sine(eccentric_anomaly)
        - mean_anomaly
}

/// Derivative `1 − e·cos(E)`, written as `(1−e)·cos(E) + 2·sin²(E/2)`.
fn kepler_derivative(eccentric_anomaly: Radian, eccentricity: f64) -> f64 {
    let half_sin = (0.5 * eccentric_anomaly).sin();
    (1.0 - eccentricity) * eccentric_anomaly.cos() + 2.0 * half_sin * half_sin
}

/// Newton stopping rule on the step size only.
///
/// `roots::SimpleConvergency` also accepts any point where `|f| < eps`, which near `e = 1`
/// stops far away from the root.
struct StepConvergency {
    tolerance: f64,
    max_iterations: usize,
}

impl Convergency<f64> for StepConvergency {
    fn is_root_found(&mut self, y: f64) -> bool {
        y == 0.0
    }

    fn is_converged(&mut self, x1: f64, x2: f64) -> bool {
        (x1 - x2).abs() < self.tolerance
    }

    fn is_iteration_limit_reached(&mut self, iter: usize) -> bool {
        iter >= self.max_iterations
    }
}

/// Check the Newton stopping criteria shared by [`AnomalyResolver`] and
/// [`StateParams`](crate::neorbit::StateParams).
pub(crate) fn check_solver_settings(
    tolerance: f64,
    max_iterations: usize,
) -> Result<(), NeorbitError> {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(NeorbitError::InvalidStateParameter(
            "kepler_tolerance must be finite and > 0".into(),
        ));
    }
    if max_iterations == 0 {
        return Err(NeorbitError::InvalidStateParameter(
            "kepler_max_iterations must be >= 1".into(),
        ));
    }
    Ok(())
}

/// Starting point of the Newton search for a reduced mean anomaly `M ∈ [0, 2π)`.
pub fn initial_guess(mean_anomaly: Radian, eccentricity: f64) -> Radian {
    if eccentricity < HIGH_ECCENTRICITY {
        mean_anomaly
    } else {
        std::f64::consts::PI
    }
}

/// Convert an eccentric anomaly into a true anomaly.
///
/// Uses the half-angle form `ν = 2·atan2(√(1+e)·sin(E/2), √(1−e)·cos(E/2))`, which keeps
/// the correct quadrant for every `E` and never divides by zero.
///
/// Arguments
/// ---------
/// * `eccentric_anomaly` – `E` (radians).
/// * `eccentricity` – `e`, with `0 ≤ e < 1`.
///
/// Return
/// ------
/// * The true anomaly `ν` in radians, normalized into `[0, 2π)`.
pub fn eccentric_to_true(eccentric_anomaly: Radian, eccentricity: f64) -> Radian {
    let half = 0.5 * eccentric_anomaly;
    let nu = 2.0
        * ((1.0 + eccentricity).sqrt() * half.sin()).atan2((1.0 - eccentricity).sqrt() * half.cos());
    principal_angle(nu)
}

/// Mean, eccentric and true anomaly of the same orbital position.
///
/// Stored in radians; the `*_deg` accessors convert at the boundary. The triple also carries
/// diagnostics of the Kepler solve that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyTriple {
    mean_anomaly: Radian,
    eccentric_anomaly: Radian,
    true_anomaly: Radian,
    evaluations: usize,
    residual: f64,
}

impl AnomalyTriple {
    /// Mean anomaly `M` (radians, `[0, 2π)`).
    pub fn mean_anomaly(&self) -> Radian {
        self.mean_anomaly
    }

    /// Eccentric anomaly `E` (radians).
    pub fn eccentric_anomaly(&self) -> Radian {
        self.eccentric_anomaly
    }

    /// True anomaly `ν` (radians, `[0, 2π)`).
    pub fn true_anomaly(&self) -> Radian {
        self.true_anomaly
    }

    pub fn mean_anomaly_deg(&self) -> Degree {
        self.mean_anomaly / RADEG
    }

    pub fn eccentric_anomaly_deg(&self) -> Degree {
        self.eccentric_anomaly / RADEG
    }

    pub fn true_anomaly_deg(&self) -> Degree {
        principal_angle_deg(self.true_anomaly / RADEG)
    }

    /// Number of evaluations of Kepler's function spent by the Newton search
    /// (`0` when the circular short-cut was taken).
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Final residual `|E − e·sin(E) − M|` of Kepler's equation.
    pub fn residual(&self) -> f64 {
        self.residual
    }
}

/// Solver turning a mean anomaly into eccentric and true anomalies.
///
/// The resolver is a plain value holding the Newton stopping criteria; it carries no state
/// between calls and can be shared freely across threads.
///
/// See also
/// --------
/// * [`StateParams`](crate::neorbit::StateParams) – Configuration from which a resolver is built.
/// * [`eccentric_to_true`] – Second stage of the conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyResolver {
    tolerance: f64,
    max_iterations: usize,
}

impl Default for AnomalyResolver {
    fn default() -> Self {
        AnomalyResolver {
            tolerance: DEFAULT_KEPLER_TOLERANCE,
            max_iterations: DEFAULT_KEPLER_MAX_ITERATIONS,
        }
    }
}

impl AnomalyResolver {
    /// Build a resolver with explicit stopping criteria.
    ///
    /// Arguments
    /// ---------
    /// * `tolerance` – Newton stops once the step is below this value (radians).
    /// * `max_iterations` – Hard cap on the number of Newton steps.
    ///
    /// Errors
    /// ------
    /// * [`NeorbitError::InvalidStateParameter`] – non-positive or non-finite tolerance, or a
    ///   zero iteration cap.
    pub fn new(tolerance: f64, max_iterations: usize) -> Result<Self, NeorbitError> {
        check_solver_settings(tolerance, max_iterations)?;
        Ok(Self::from_checked(tolerance, max_iterations))
    }

    /// Resolver from settings already validated by [`check_solver_settings`].
    pub(crate) fn from_checked(tolerance: f64, max_iterations: usize) -> Self {
        AnomalyResolver {
            tolerance,
            max_iterations,
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Solve Kepler's equation `M = E − e·sin(E)` for the eccentric anomaly.
    ///
    /// The mean anomaly is first reduced to `[0, 2π)`. For `e = 0` the equation is already
    /// satisfied by `E = M` and no iteration is performed. Otherwise Newton runs on `[0, π]`,
    /// with `M > π` mirrored, and stops on the step size.
    ///
    /// Arguments
    /// ---------
    /// * `mean_anomaly` – `M` (radians, any value).
    /// * `eccentricity` – `e`, with `0 ≤ e < 1`.
    ///
    /// Return
    /// ------
    /// * `(E, evaluations)` – the eccentric anomaly in radians and the number of Kepler
    ///   function evaluations.
    ///
    /// Errors
    /// ------
    /// * [`NeorbitError::InvalidOrbit`] – `e` outside `[0, 1)` or non-finite `M`.
    /// * [`NeorbitError::KeplerNonConvergence`] – iteration cap reached.
    /// * [`NeorbitError::RootFindingError`] – any other failure of the root search.
    pub fn eccentric_anomaly(
        &self,
        mean_anomaly: Radian,
        eccentricity: f64,
    ) -> Result<(Radian, usize), NeorbitError> {
        check_eccentricity(eccentricity)?;
        if !mean_anomaly.is_finite() {
            return Err(NeorbitError::InvalidOrbit(format!(
                "mean anomaly {mean_anomaly} is not finite"
            )));
        }

        let mean_anomaly = principal_angle(mean_anomaly);
        if eccentricity == 0.0 {
            return Ok((mean_anomaly, 0));
        }

        // E(2π - M) = 2π - E(M)
        let mirrored = mean_anomaly > std::f64::consts::PI;
        let reduced = if mirrored {
            DPI - mean_anomaly
        } else {
            mean_anomaly
        };

        let evaluations = Cell::new(0_usize);

        // R(E) = E - e·sin(E) - M
        let f = |ecc_anom: f64| -> f64 {
            evaluations.set(evaluations.get() + 1);
            kepler_function(ecc_anom, eccentricity, reduced)
        };

        // R'(E) = 1 - e·cos(E)
        let df = |ecc_anom: f64| -> f64 { kepler_derivative(ecc_anom, eccentricity) };

        let mut convergency = StepConvergency {
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
        };

        let start = initial_guess(reduced, eccentricity);
        match find_root_newton_raphson(start, &f, &df, &mut convergency) {
            Ok(ecc_anom) => {
                let ecc_anom = if mirrored { DPI - ecc_anom } else { ecc_anom };
                Ok((ecc_anom, evaluations.get()))
            }
            Err(SearchError::NoConvergency) => {
                warn!(
                    eccentricity,
                    mean_anomaly,
                    max_iterations = self.max_iterations,
                    "Kepler equation did not converge"
                );
                Err(NeorbitError::KeplerNonConvergence {
                    eccentricity,
                    mean_anomaly,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Resolve the full anomaly triple from a mean anomaly in degrees.
    ///
    /// Arguments
    /// ---------
    /// * `mean_anomaly` – `M` (degrees, any value; reduced to `[0, 360)`).
    /// * `eccentricity` – `e`, with `0 ≤ e < 1`.
    ///
    /// Return
    /// ------
    /// * An [`AnomalyTriple`] whose angles all describe the same point of the orbit.
    ///
    /// See also
    /// --------
    /// * [`AnomalyResolver::eccentric_anomaly`] – Error conditions.
    pub fn resolve(
        &self,
        mean_anomaly: Degree,
        eccentricity: f64,
    ) -> Result<AnomalyTriple, NeorbitError> {
        if !mean_anomaly.is_finite() {
            return Err(NeorbitError::InvalidOrbit(format!(
                "mean anomaly {mean_anomaly}° is not finite"
            )));
        }
        let mean_anomaly = principal_angle_deg(mean_anomaly) * RADEG;
        let (eccentric_anomaly, evaluations) =
            self.eccentric_anomaly(mean_anomaly, eccentricity)?;

        let residual = kepler_residual(eccentric_anomaly, eccentricity, mean_anomaly).abs();
        debug!(
            eccentricity,
            mean_anomaly, eccentric_anomaly, evaluations, residual, "Kepler equation solved"
        );

        Ok(AnomalyTriple {
            mean_anomaly,
            eccentric_anomaly,
            true_anomaly: eccentric_to_true(eccentric_anomaly, eccentricity),
            evaluations,
            residual,
        })
    }

    /// True anomaly (degrees, `[0, 360)`) for a mean anomaly in degrees.
    pub fn true_anomaly(
        &self,
        mean_anomaly: Degree,
        eccentricity: f64,
    ) -> Result<Degree, NeorbitError> {
        Ok(self.resolve(mean_anomaly, eccentricity)?.true_anomaly_deg())
    }
}
