//! Cartesian state vectors of near-Earth objects from their Keplerian orbital elements.
//!
//! The numeric core resolves the true anomaly of an [`OrbitalElementSet`] through Kepler's
//! equation ([`kepler`]) and rotates the perifocal state into the orbit's reference frame
//! ([`orbital_state`]). The [`neorbit`] module wraps it with configuration, batch evaluation
//! and descriptive statistics over raw [`catalog`] records.
//!
//! [`OrbitalElementSet`]: orbital_elements::OrbitalElementSet

pub mod catalog;
pub mod constants;
pub mod kepler;
pub mod neorbit;
pub mod neorbit_errors;
pub mod orbital_elements;
pub mod orbital_state;
pub mod ref_system;
pub mod state_vector;
pub mod summary;

pub use orbital_state::compute_state;
