//! Descriptive statistics over a batch of catalog records.
//!
//! Only raw catalog fields are used (first close approach and estimated diameter); the
//! orbital elements play no role here.

use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;

use crate::{
    catalog::CatalogRecord,
    constants::{Kilometer, MPH_TO_KPH, MPH_TO_KPS},
};

/// Aggregate statistics of a batch of objects.
///
/// Every statistic is `None` when no record carries the corresponding field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchSummary {
    pub total_objects: usize,
    pub orbiting_bodies: BTreeSet<String>,
    pub mean_velocity_mph: Option<f64>,
    pub closest_miss_distance_km: Option<Kilometer>,
    pub furthest_miss_distance_km: Option<Kilometer>,
    /// Smallest lower bound of the estimated diameters.
    pub smallest_diameter_km: Option<Kilometer>,
    /// Largest upper bound of the estimated diameters.
    pub largest_diameter_km: Option<Kilometer>,
}

fn finite(values: impl Iterator<Item = f64>) -> impl Iterator<Item = f64> {
    values.filter(|v| v.is_finite())
}

impl BatchSummary {
    /// Summarize a batch of records.
    pub fn from_records(records: &[CatalogRecord]) -> Self {
        let approaches = records
            .iter()
            .filter_map(CatalogRecord::first_close_approach)
            .collect_vec();

        let velocities = finite(approaches.iter().map(|ca| ca.relative_velocity_mph)).collect_vec();
        let mean_velocity_mph = if velocities.is_empty() {
            None
        } else {
            Some(velocities.iter().sum::<f64>() / velocities.len() as f64)
        };

        let (closest_miss_distance_km, furthest_miss_distance_km) =
            match finite(approaches.iter().map(|ca| ca.miss_distance_km))
                .minmax()
                .into_option()
            {
                Some((min, max)) => (Some(min), Some(max)),
                None => (None, None),
            };

        let smallest_diameter_km = finite(records.iter().map(|r| r.estimated_diameter.min_km))
            .min_by(f64::total_cmp);
        let largest_diameter_km = finite(records.iter().map(|r| r.estimated_diameter.max_km))
            .max_by(f64::total_cmp);

        BatchSummary {
            total_objects: records.len(),
            orbiting_bodies: approaches
                .iter()
                .map(|ca| ca.orbiting_body.clone())
                .collect(),
            mean_velocity_mph,
            closest_miss_distance_km,
            furthest_miss_distance_km,
            smallest_diameter_km,
            largest_diameter_km,
        }
    }

    pub fn mean_velocity_kph(&self) -> Option<f64> {
        self.mean_velocity_mph.map(|v| v * MPH_TO_KPH)
    }

    pub fn mean_velocity_kps(&self) -> Option<f64> {
        self.mean_velocity_mph.map(|v| v * MPH_TO_KPS)
    }
}

struct OptionalValue(Option<f64>);

impl fmt::Display for OptionalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v:.3}"),
            None => write!(f, "n/a"),
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Batch Stats ===")?;
        writeln!(f, "Total Num NEOs: {}", self.total_objects)?;
        writeln!(
            f,
            "All Orbiting Bodies: {{{}}}",
            self.orbiting_bodies.iter().join(", ")
        )?;
        writeln!(f, "AVG mph of NEO: {}", OptionalValue(self.mean_velocity_mph))?;
        writeln!(f, "AVG kph of NEO: {}", OptionalValue(self.mean_velocity_kph()))?;
        writeln!(f, "AVG kps of NEO: {}", OptionalValue(self.mean_velocity_kps()))?;
        writeln!(
            f,
            "Closest miss distance (km): {}",
            OptionalValue(self.closest_miss_distance_km)
        )?;
        writeln!(
            f,
            "Furthest miss distance (km): {}",
            OptionalValue(self.furthest_miss_distance_km)
        )?;
        writeln!(
            f,
            "Smallest estimated diameter (km): {}",
            OptionalValue(self.smallest_diameter_km)
        )?;
        writeln!(
            f,
            "Largest estimated diameter (km): {}",
            OptionalValue(self.largest_diameter_km)
        )?;
        write!(f, "===================")
    }
}

#[cfg(test)]
mod summary_test {
    use super::*;
    use crate::catalog::{CloseApproach, EstimatedDiameter};
    use approx::assert_relative_eq;

    fn neo(id: &str, mph: f64, miss_km: f64, body: &str, dmin: f64, dmax: f64) -> CatalogRecord {
        CatalogRecord {
            id: id.into(),
            name: id.into(),
            estimated_diameter: EstimatedDiameter {
                min_km: dmin,
                max_km: dmax,
            },
            close_approaches: vec![CloseApproach {
                relative_velocity_mph: mph,
                miss_distance_km: miss_km,
                orbiting_body: body.into(),
            }],
            orbit: None,
        }
    }

    #[test]
    fn test_summary_statistics() {
        let records = vec![
            neo("a", 10_000.0, 7.5e6, "Earth", 0.05, 0.11),
            neo("b", 30_000.0, 1.2e6, "Earth", 0.40, 0.90),
            neo("c", 50_000.0, 4.0e7, "Mars", 0.01, 0.02),
        ];

        let summary = BatchSummary::from_records(&records);

        assert_eq!(summary.total_objects, 3);
        assert_eq!(
            summary.orbiting_bodies,
            BTreeSet::from(["Earth".to_string(), "Mars".to_string()])
        );
        assert_eq!(summary.mean_velocity_mph, Some(30_000.0));
        assert_relative_eq!(summary.mean_velocity_kph().unwrap(), 48_280.2, epsilon = 1e-6);
        assert_relative_eq!(summary.mean_velocity_kps().unwrap(), 13_411.2, epsilon = 1e-6);
        assert_eq!(summary.closest_miss_distance_km, Some(1.2e6));
        assert_eq!(summary.furthest_miss_distance_km, Some(4.0e7));
        assert_eq!(summary.smallest_diameter_km, Some(0.01));
        assert_eq!(summary.largest_diameter_km, Some(0.90));
    }

    #[test]
    fn test_empty_batch() {
        let summary = BatchSummary::from_records(&[]);

        assert_eq!(summary, BatchSummary::default());
        assert!(summary.mean_velocity_kps().is_none());
        assert!(format!("{summary}").contains("AVG mph of NEO: n/a"));
    }

    #[test]
    fn test_records_without_close_approach() {
        let mut lonely = neo("d", 0.0, 0.0, "Earth", 1.0, 2.0);
        lonely.close_approaches.clear();
        let records = vec![lonely, neo("e", 20_000.0, 3.0e6, "Venus", 0.2, 0.3)];

        let summary = BatchSummary::from_records(&records);

        assert_eq!(summary.total_objects, 2);
        assert_eq!(summary.mean_velocity_mph, Some(20_000.0));
        assert_eq!(summary.closest_miss_distance_km, Some(3.0e6));
        assert_eq!(summary.furthest_miss_distance_km, Some(3.0e6));
        assert_eq!(summary.smallest_diameter_km, Some(0.2));
        assert_eq!(summary.largest_diameter_km, Some(2.0));
    }

    #[test]
    fn test_display() {
        let summary = BatchSummary::from_records(&[neo("a", 1.0, 2.0, "Earth", 0.1, 0.2)]);
        let text = format!("{summary}");

        assert!(text.starts_with("=== Batch Stats ==="));
        assert!(text.contains("Total Num NEOs: 1"));
        assert!(text.contains("All Orbiting Bodies: {Earth}"));
    }
}
