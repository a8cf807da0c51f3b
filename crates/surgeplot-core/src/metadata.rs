//! Simulation metadata consumed when building the plot tree
//!
//! The loader that reads these values from the solver's input files lives
//! outside this crate; only the shape of the data is defined here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::axis::Bounds;

/// Domain extents and time range of a simulation run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DomainMetadata {
    /// Lower corner (x, y) of the computational domain
    pub lower: [f64; 2],

    /// Upper corner (x, y) of the computational domain
    pub upper: [f64; 2],

    /// Simulation start time in seconds
    #[serde(default)]
    pub t0: Option<f64>,

    /// Simulation end time in seconds
    #[serde(default)]
    pub tfinal: Option<f64>,

    /// Time of landfall in simulation seconds, used to offset day counts
    #[serde(default)]
    pub landfall: Option<f64>,

    /// Calendar time corresponding to simulation time zero
    #[serde(default)]
    pub reference_time: Option<DateTime<Utc>>,
}

impl DomainMetadata {
    /// Metadata with spatial bounds only
    pub fn new(lower: [f64; 2], upper: [f64; 2]) -> Self {
        Self {
            lower,
            upper,
            t0: None,
            tfinal: None,
            landfall: None,
            reference_time: None,
        }
    }

    /// Set the time range
    pub fn with_time_range(mut self, t0: f64, tfinal: f64) -> Self {
        self.t0 = Some(t0);
        self.tfinal = Some(tfinal);
        self
    }

    /// Set the landfall offset
    pub fn with_landfall(mut self, landfall: f64) -> Self {
        self.landfall = Some(landfall);
        self
    }

    /// Set the calendar reference
    pub fn with_reference_time(mut self, reference: DateTime<Utc>) -> Self {
        self.reference_time = Some(reference);
        self
    }

    /// Extent along x
    pub fn x_bounds(&self) -> Bounds {
        Bounds::explicit(self.lower[0], self.upper[0])
    }

    /// Extent along y
    pub fn y_bounds(&self) -> Bounds {
        Bounds::explicit(self.lower[1], self.upper[1])
    }

    /// Time extent; automatic when either end is unknown, non-finite, or
    /// the range is inverted
    pub fn time_bounds(&self) -> Bounds {
        match (self.t0, self.tfinal) {
            (Some(t0), Some(tfinal)) if usable_range(t0, tfinal) => Bounds::explicit(t0, tfinal),
            _ => Bounds::Automatic,
        }
    }
}

fn usable_range(t0: f64, tfinal: f64) -> bool {
    t0.is_finite() && tfinal.is_finite() && t0 <= tfinal
}

/// A recorded gauge location
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    /// Gauge number as used by the solver
    pub number: u32,

    /// Label drawn next to the marker
    pub label: String,

    /// Physical location (x, y)
    pub location: [f64; 2],
}

impl Gauge {
    /// Gauge labelled with its number
    pub fn new(number: u32, x: f64, y: f64) -> Self {
        Self {
            number,
            label: number.to_string(),
            location: [x, y],
        }
    }

    /// Override the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_bounds() {
        let meta = DomainMetadata::new([-100e3, -50e3], [100e3, 50e3]);
        assert_eq!(meta.x_bounds(), Bounds::explicit(-100e3, 100e3));
        assert_eq!(meta.y_bounds(), Bounds::explicit(-50e3, 50e3));
    }

    #[test]
    fn test_time_bounds_fall_back() {
        let meta = DomainMetadata::new([0.0, 0.0], [1.0, 1.0]);
        assert!(meta.time_bounds().is_automatic());

        let mut partial = meta.clone();
        partial.t0 = Some(0.0);
        assert!(partial.time_bounds().is_automatic());

        let full = meta.with_time_range(0.0, 3600.0);
        assert_eq!(full.time_bounds(), Bounds::explicit(0.0, 3600.0));
    }

    #[test]
    fn test_unusable_time_range_is_automatic() {
        let meta = DomainMetadata::new([0.0, 0.0], [1.0, 1.0]);
        assert!(meta.clone().with_time_range(10.0, 0.0).time_bounds().is_automatic());
        assert!(meta.clone().with_time_range(f64::NAN, 10.0).time_bounds().is_automatic());
        assert!(meta
            .clone()
            .with_time_range(0.0, f64::INFINITY)
            .time_bounds()
            .is_automatic());
        assert_eq!(
            meta.with_time_range(5.0, 5.0).time_bounds(),
            Bounds::explicit(5.0, 5.0)
        );
    }

    #[test]
    fn test_deserialize_without_time() {
        let meta: DomainMetadata =
            serde_json::from_str(r#"{"lower":[-1.0,-2.0],"upper":[1.0,2.0]}"#).unwrap();
        assert_eq!(meta.t0, None);
        assert_eq!(meta.reference_time, None);
    }

    #[test]
    fn test_gauge_label_defaults_to_number() {
        let gauge = Gauge::new(3, 10.0, -5.0);
        assert_eq!(gauge.label, "3");
        assert_eq!(gauge.with_label("Pier").label, "Pier");
    }
}
