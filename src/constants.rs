//! # Constants and type definitions for Neorbit
//!
//! This module centralizes the **physical constants**, **conversion factors** and the
//! **unit type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Astronomical constants (AU, Gaussian gravitational constant)
//! - Unit conversions (degrees ↔ radians, AU ↔ km, AU/day ↔ km/s, mph ↔ km/h)
//! - Type aliases documenting the unit carried by a plain `f64`

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Gaussian gravitational constant k (AU^(3/2) / day)
pub const GAUSS_GRAV: f64 = 0.01720209895;

/// k², heliocentric gravitational parameter in AU³/day²
pub const GAUSS_GRAV_SQUARED: f64 = GAUSS_GRAV * GAUSS_GRAV;

/// AU/day → km/s
pub const AU_PER_DAY_TO_KM_S: f64 = AU / SECONDS_PER_DAY;

/// Miles per hour → kilometers per hour
pub const MPH_TO_KPH: f64 = 1.60934;

/// Miles per hour → kilometers per second, as reported by the catalog tooling
pub const MPH_TO_KPS: f64 = 0.44704;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Julian Date (days)
pub type JD = f64;

#[cfg(test)]
mod constants_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_velocity_conversion_factor() {
        // 1 AU/day is a bit more than 1731 km/s
        assert_relative_eq!(AU_PER_DAY_TO_KM_S, 1731.4568368055554, epsilon = 1e-9);
    }

    #[test]
    fn test_earth_orbital_speed() {
        // circular speed at 1 AU around the Sun ≈ 29.78 km/s
        let v = GAUSS_GRAV * AU_PER_DAY_TO_KM_S;
        assert_relative_eq!(v, 29.7847, epsilon = 1e-3);
    }
}
