use thiserror::Error;

use crate::constants::{Degree, Radian};

#[derive(Error, Debug)]
pub enum NeorbitError {
    #[error("Invalid orbit: {0}")]
    InvalidOrbit(String),

    #[error(
        "Kepler equation did not converge (e = {eccentricity}, M = {mean_anomaly} rad)"
    )]
    KeplerNonConvergence {
        eccentricity: f64,
        mean_anomaly: Radian,
    },

    #[error("ROOTS finding error: {0}")]
    RootFindingError(#[from] roots::SearchError),

    #[error("Invalid state computation parameter: {0}")]
    InvalidStateParameter(String),

    #[error("Invalid catalog record {id}: {reason}")]
    InvalidCatalogRecord { id: String, reason: String },

    #[error("Inclination out of range: {0}° (expected [0°, 180°])")]
    InclinationOutOfRange(Degree),
}

impl NeorbitError {
    /// `true` for errors caused by a malformed upstream record rather than by the solver.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            NeorbitError::InvalidOrbit(_)
                | NeorbitError::InvalidCatalogRecord { .. }
                | NeorbitError::InclinationOutOfRange(_)
        )
    }
}

impl PartialEq for NeorbitError {
    fn eq(&self, other: &Self) -> bool {
        use NeorbitError::*;
        match (self, other) {
            (InvalidOrbit(a), InvalidOrbit(b)) => a == b,
            (
                KeplerNonConvergence {
                    eccentricity: e1,
                    mean_anomaly: m1,
                },
                KeplerNonConvergence {
                    eccentricity: e2,
                    mean_anomaly: m2,
                },
            ) => e1 == e2 && m1 == m2,
            (RootFindingError(a), RootFindingError(b)) => a == b,
            (InvalidStateParameter(a), InvalidStateParameter(b)) => a == b,
            (
                InvalidCatalogRecord { id: i1, reason: r1 },
                InvalidCatalogRecord { id: i2, reason: r2 },
            ) => i1 == i2 && r1 == r2,
            (InclinationOutOfRange(a), InclinationOutOfRange(b)) => a == b,
            _ => false,
        }
    }
}
