//! # Neorbit: configuration and batch façade
//!
//! This module defines the [`StateParams`](crate::neorbit::StateParams) configuration and
//! the [`Neorbit`](crate::neorbit::Neorbit) façade that applies it to single records and to
//! whole batches.
//!
//! ## Key responsibilities
//!
//! - Hold the validated **Kepler solver settings** (tolerance, iteration cap).
//! - Expose the single logical operation, [`Neorbit::compute_state`].
//! - Evaluate **batches** record by record, sequentially or in parallel with `rayon`. The
//!   output keeps the input order and every record gets its own `Result`: one malformed
//!   record never aborts the batch.
//! - Summarize a batch of raw catalog records ([`Neorbit::summarize`]).
//!
//! ## Typical usage
//!
//! ```rust
//! use neorbit::neorbit::{Neorbit, StateParams};
//! use neorbit::orbital_elements::OrbitalElementSet;
//!
//! let params = StateParams::builder()
//!     .kepler_tolerance(1e-10)
//!     .kepler_max_iterations(30)
//!     .build()
//!     .unwrap();
//! let neorbit = Neorbit::new(params);
//!
//! let batch = vec![
//!     OrbitalElementSet::new(1.458, 0.2227, 10.83, 304.3, 178.9, 110.8).unwrap(),
//!     OrbitalElementSet::new(0.922, 0.1914, 3.34, 204.4, 126.7, 215.5).unwrap(),
//! ];
//! let states = neorbit.compute_states(&batch);
//!
//! assert_eq!(states.len(), 2);
//! assert!(states.iter().all(|s| s.is_ok()));
//! ```

use rayon::prelude::*;
use tracing::{info, warn};

use crate::{
    catalog::CatalogRecord,
    kepler::{
        check_solver_settings, AnomalyResolver, DEFAULT_KEPLER_MAX_ITERATIONS,
        DEFAULT_KEPLER_TOLERANCE,
    },
    neorbit_errors::NeorbitError,
    orbital_elements::OrbitalElementSet,
    orbital_state::OrbitalStateTransform,
    state_vector::StateVector,
    summary::BatchSummary,
};

/// Tunable parameters of the state computation.
///
/// Instances come from [`StateParams::default`] or the validating [`StateParamsBuilder`],
/// so the solver settings they hold are always usable.
///
/// Fields
/// ------
/// * `kepler_tolerance` – Newton stopping tolerance on Kepler's equation (radians).
/// * `kepler_max_iterations` – Hard cap on Newton steps; reaching it fails the record.
/// * `parallel` – Evaluate batches with `rayon` instead of a sequential loop.
///
/// # Example
///
/// ```rust
/// use neorbit::neorbit::StateParams;
/// let params = StateParams::default();
/// assert!(params.parallel());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StateParams {
    kepler_tolerance: f64,
    kepler_max_iterations: usize,
    parallel: bool,
}

impl StateParams {
    /// Construct a new [`StateParams`] with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`StateParamsBuilder`] to configure custom parameters.
    pub fn builder() -> StateParamsBuilder {
        StateParamsBuilder::new()
    }

    pub fn kepler_tolerance(&self) -> f64 {
        self.kepler_tolerance
    }

    pub fn kepler_max_iterations(&self) -> usize {
        self.kepler_max_iterations
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Anomaly resolver configured with these parameters.
    pub fn resolver(&self) -> AnomalyResolver {
        AnomalyResolver::from_checked(self.kepler_tolerance, self.kepler_max_iterations)
    }
}

impl Default for StateParams {
    fn default() -> Self {
        StateParams {
            kepler_tolerance: DEFAULT_KEPLER_TOLERANCE,
            kepler_max_iterations: DEFAULT_KEPLER_MAX_ITERATIONS,
            parallel: true,
        }
    }
}

/// Builder for [`StateParams`], with validation.
#[derive(Debug, Clone)]
pub struct StateParamsBuilder {
    params: StateParams,
}

impl Default for StateParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StateParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: StateParams::default(),
        }
    }

    pub fn kepler_tolerance(mut self, v: f64) -> Self {
        self.params.kepler_tolerance = v;
        self
    }
    pub fn kepler_max_iterations(mut self, v: usize) -> Self {
        self.params.kepler_max_iterations = v;
        self
    }
    pub fn parallel(mut self, v: bool) -> Self {
        self.params.parallel = v;
        self
    }

    /// Validate and return the parameters.
    ///
    /// Errors
    /// ------
    /// * [`NeorbitError::InvalidStateParameter`] – non-positive or non-finite tolerance, or a
    ///   zero iteration cap.
    pub fn build(self) -> Result<StateParams, NeorbitError> {
        check_solver_settings(
            self.params.kepler_tolerance,
            self.params.kepler_max_iterations,
        )?;
        Ok(self.params)
    }
}

/// Entry point of the crate: configured state computation over records and batches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Neorbit {
    params: StateParams,
    transform: OrbitalStateTransform,
}

impl Neorbit {
    pub fn new(params: StateParams) -> Self {
        let transform = OrbitalStateTransform::new(params.resolver());
        Neorbit { params, transform }
    }

    pub fn params(&self) -> &StateParams {
        &self.params
    }

    /// Cartesian state vector of one element set.
    ///
    /// See also
    /// --------
    /// * [`OrbitalStateTransform::compute_state`] – Anomaly resolution then transformation.
    pub fn compute_state(&self, elements: &OrbitalElementSet) -> Result<StateVector, NeorbitError> {
        self.transform.compute_state(elements)
    }

    fn map_batch<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if self.params.parallel {
            items.par_iter().map(f).collect()
        } else {
            items.iter().map(f).collect()
        }
    }

    /// State vectors of a batch of element sets, in input order.
    ///
    /// Each record is evaluated independently; failures are reported in place.
    pub fn compute_states(
        &self,
        batch: &[OrbitalElementSet],
    ) -> Vec<Result<StateVector, NeorbitError>> {
        let states = self.map_batch(batch, |elements| self.compute_state(elements));
        log_batch_outcome(&states);
        states
    }

    /// State vectors of a batch of catalog records, paired with the record ids.
    ///
    /// Records without an orbit or with a malformed one fail individually.
    pub fn compute_catalog_states(
        &self,
        records: &[CatalogRecord],
    ) -> Vec<(String, Result<StateVector, NeorbitError>)> {
        let states = self.map_batch(records, |record| {
            let state = record
                .orbital_elements()
                .and_then(|elements| self.compute_state(&elements));
            if let Err(err) = &state {
                warn!(id = %record.id, name = %record.name, error = %err, "record rejected");
            }
            (record.id.clone(), state)
        });

        let failed = states.iter().filter(|(_, s)| s.is_err()).count();
        info!(
            total = states.len(),
            failed, "catalog state computation complete"
        );
        states
    }

    /// Descriptive statistics of a batch of catalog records.
    pub fn summarize(&self, records: &[CatalogRecord]) -> BatchSummary {
        BatchSummary::from_records(records)
    }
}

fn log_batch_outcome(states: &[Result<StateVector, NeorbitError>]) {
    let failed = states.iter().filter(|s| s.is_err()).count();
    if failed > 0 {
        warn!(total = states.len(), failed, "some records were rejected");
    }
    info!(total = states.len(), failed, "state computation complete");
}

#[cfg(test)]
mod neorbit_test {
    use super::*;
    use crate::catalog::catalog_test::{orbit, record};
    use crate::orbital_state::compute_state;

    #[test]
    fn test_builder_defaults() {
        let params = StateParams::builder().build().unwrap();
        assert_eq!(params, StateParams::default());
        assert_eq!(params.resolver(), AnomalyResolver::default());
    }

    #[test]
    fn test_builder_validation() {
        assert_eq!(
            StateParams::builder().kepler_tolerance(0.0).build(),
            Err(NeorbitError::InvalidStateParameter(
                "kepler_tolerance must be finite and > 0".into()
            ))
        );
        assert!(StateParams::builder()
            .kepler_tolerance(f64::NAN)
            .build()
            .is_err());
        assert!(StateParams::builder()
            .kepler_tolerance(-1e-12)
            .build()
            .is_err());
        assert_eq!(
            StateParams::builder().kepler_max_iterations(0).build(),
            Err(NeorbitError::InvalidStateParameter(
                "kepler_max_iterations must be >= 1".into()
            ))
        );
    }

    #[test]
    fn test_built_params_give_a_valid_resolver() {
        let params = StateParams::builder()
            .kepler_tolerance(1e-10)
            .kepler_max_iterations(30)
            .parallel(false)
            .build()
            .unwrap();

        assert_eq!(params.kepler_tolerance(), 1e-10);
        assert_eq!(params.kepler_max_iterations(), 30);
        assert!(!params.parallel());
        assert_eq!(
            params.resolver(),
            AnomalyResolver::new(1e-10, 30).unwrap()
        );
    }

    #[test]
    fn test_compute_state_matches_free_function() {
        let elements = OrbitalElementSet::new(1.5, 0.2, 10.0, 30.0, 60.0, 45.0).unwrap();
        let neorbit = Neorbit::default();

        assert_eq!(
            neorbit.compute_state(&elements).unwrap(),
            compute_state(&elements).unwrap()
        );
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let batch = (0..64)
            .map(|k| {
                let k = k as f64;
                OrbitalElementSet::new(0.8 + 0.05 * k, 0.01 * k, k, 5.0 * k, 7.0 * k, 11.0 * k)
                    .unwrap()
            })
            .collect::<Vec<_>>();

        let parallel = Neorbit::new(StateParams::builder().parallel(true).build().unwrap());
        let sequential = Neorbit::new(StateParams::builder().parallel(false).build().unwrap());

        assert_eq!(parallel.compute_states(&batch), sequential.compute_states(&batch));
    }

    #[test]
    fn test_bad_record_does_not_abort_batch() {
        let records = vec![
            record("good-1", Some(orbit(1.458, 0.2227))),
            record("no-orbit", None),
            record("hyperbolic", Some(orbit(-1.27, 1.2))),
            record("good-2", Some(orbit(0.922, 0.1914))),
        ];

        let states = Neorbit::default().compute_catalog_states(&records);
        let ids = states.iter().map(|(id, _)| id.as_str()).collect::<Vec<_>>();

        assert_eq!(ids, ["good-1", "no-orbit", "hyperbolic", "good-2"]);
        assert!(states[0].1.is_ok());
        assert!(matches!(
            states[1].1,
            Err(NeorbitError::InvalidCatalogRecord { .. })
        ));
        assert!(matches!(states[2].1, Err(NeorbitError::InvalidOrbit(_))));
        assert!(states[3].1.is_ok());
    }

    #[test]
    fn test_non_convergence_is_reported_per_record() {
        let neorbit = Neorbit::new(
            StateParams::builder()
                .kepler_tolerance(1e-15)
                .kepler_max_iterations(1)
                .build()
                .unwrap(),
        );
        let batch = vec![
            OrbitalElementSet::new(1.0, 0.0, 0.0, 0.0, 0.0, 30.0).unwrap(),
            OrbitalElementSet::new(1.0, 0.5, 0.0, 0.0, 0.0, 30.0).unwrap(),
        ];

        let states = neorbit.compute_states(&batch);

        assert!(states[0].is_ok());
        assert!(matches!(
            states[1],
            Err(NeorbitError::KeplerNonConvergence { .. })
        ));
    }

    #[test]
    fn test_summarize() {
        let records = vec![record("1", None), record("2", None)];
        let summary = Neorbit::default().summarize(&records);
        assert_eq!(summary.total_objects, 2);
        assert_eq!(summary.mean_velocity_mph, Some(40_000.0));
    }
}
