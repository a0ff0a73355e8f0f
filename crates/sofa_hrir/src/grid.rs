//! Measurement grid observation and uniform-spacing validation.
//!
//! While the spatial index is built, every newly seen quantized value is recorded per
//! axis.  After the build, each axis must form a uniformly spaced grid; the summary
//! `{min, max, step}` is what callers use to walk the measured directions.

use crate::error::{Error, Result};
use crate::quantizer::Quantizer;

/// One spherical coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Radius,
    Elevation,
    Azimuth,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Axis::Radius => "radius",
            Axis::Elevation => "elevation",
            Axis::Azimuth => "azimuth",
        };
        f.write_str(name)
    }
}

/// Bounds and spacing of one validated axis, in dequantized units.
///
/// A single-value axis is a legal trivial grid: `min == max` and `step == 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridStatistics {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// The distinct quantized keys observed on one axis, in first-seen order.
#[derive(Debug, Clone, Default)]
pub(crate) struct AxisObservations {
    keys: Vec<i64>,
}

impl AxisObservations {
    /// Record a key; repeats are ignored.
    pub fn record(&mut self, key: i64) {
        if !self.keys.contains(&key) {
            self.keys.push(key);
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

/// Check that the observed keys form a uniformly spaced grid and summarize it.
///
/// Keys are sorted ascending, so every adjacent difference is non-negative; the first
/// difference establishes the step and every later pair must reproduce it exactly (tick
/// arithmetic, no float comparison).
pub(crate) fn validate(
    axis: Axis,
    observations: &AxisObservations,
    quantizer: Quantizer,
) -> Result<GridStatistics> {
    let mut sorted = observations.keys.clone();
    sorted.sort_unstable();

    let (&first, &last) = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(Error::EmptyAxis(axis)),
    };

    let min = quantizer.value_of(first);
    let max = quantizer.value_of(last);

    if sorted.len() < 2 {
        return Ok(GridStatistics { min, max, step: 0.0 });
    }

    let step = sorted[1] - sorted[0];
    for pair in sorted.windows(2) {
        let delta = pair[1] - pair[0];
        if delta != step {
            return Err(Error::NonUniformGrid {
                axis,
                expected: quantizer.value_of(step),
                found: quantizer.value_of(delta),
            });
        }
    }

    Ok(GridStatistics {
        min,
        max,
        step: quantizer.value_of(step),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn observed(values: &[f64]) -> AxisObservations {
        let q = Quantizer::default();
        let mut obs = AxisObservations::default();
        for &v in values {
            obs.record(q.key(v));
        }
        obs
    }

    #[test]
    fn uniform_axis_passes() {
        let stats = validate(
            Axis::Azimuth,
            &observed(&[0.0, 90.0, 180.0, -90.0]),
            Quantizer::default(),
        )
        .unwrap();
        assert_eq!(
            stats,
            GridStatistics {
                min: -90.0,
                max: 180.0,
                step: 90.0
            }
        );
    }

    #[test]
    fn repeats_are_deduplicated() {
        let obs = observed(&[30.0, 30.000001, 29.999999, 40.0]);
        assert_eq!(obs.len(), 2);
    }

    #[test]
    fn non_uniform_axis_fails() {
        // Deltas 10 then 30.
        let err = validate(
            Axis::Elevation,
            &observed(&[-90.0, -80.0, -50.0]),
            Quantizer::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NonUniformGrid { axis: Axis::Elevation, .. }));
    }

    #[test]
    fn mismatch_in_final_pair_is_caught() {
        let err = validate(
            Axis::Radius,
            &observed(&[0.0, 10.0, 20.0, 35.0]),
            Quantizer::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NonUniformGrid { axis: Axis::Radius, .. }));
    }

    #[test]
    fn single_value_axis_is_a_trivial_grid() {
        let stats = validate(Axis::Radius, &observed(&[1.0]), Quantizer::default()).unwrap();
        assert_eq!(
            stats,
            GridStatistics {
                min: 1.0,
                max: 1.0,
                step: 0.0
            }
        );
    }

    #[test]
    fn two_value_axis_takes_the_pairwise_difference() {
        let stats =
            validate(Axis::Elevation, &observed(&[10.0, -20.0]), Quantizer::default()).unwrap();
        assert_eq!(
            stats,
            GridStatistics {
                min: -20.0,
                max: 10.0,
                step: 30.0
            }
        );
    }

    #[test]
    fn no_observations_is_an_error() {
        let err = validate(
            Axis::Azimuth,
            &AxisObservations::default(),
            Quantizer::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::EmptyAxis(Axis::Azimuth)));
    }
}
