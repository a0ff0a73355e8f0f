//! The spatial measurement index.
//!
//! One flat hash map from a quantized `(radius, elevation, azimuth)` key to a measurement
//! index.  A three-level nesting (radius plane, elevation row, azimuth column) would buy
//! nothing here: the public contract never enumerates planes or rows, and a composite key
//! gives the same constant-time query with less machinery.

use ahash::{HashMap, HashMapExt};

use crate::error::{Error, Result};
use crate::grid::AxisObservations;
use crate::quantizer::Quantizer;

/// Key order is (radius, elevation, azimuth), all in quantizer ticks.
type DirectionKey = (i64, i64, i64);

/// Constant-time map from a quantized spherical direction to a measurement index.
#[derive(Debug, Default)]
pub(crate) struct SpatialIndex {
    quantizer: Quantizer,
    map: HashMap<DirectionKey, usize>,
}

/// Everything produced by one pass over the coordinate buffer: the index itself plus the
/// distinct quantized values seen on each axis, which the grid validator consumes.
#[derive(Debug)]
pub(crate) struct IndexBuild {
    pub index: SpatialIndex,
    pub radii: AxisObservations,
    pub elevations: AxisObservations,
    pub azimuths: AxisObservations,
}

impl SpatialIndex {
    /// Build the index from a resolved coordinate buffer.
    ///
    /// Field order within each triplet is (azimuth, elevation, radius).  Duplicate
    /// quantized triples resolve last-write-wins: a well-formed dataset has one
    /// measurement per direction, and when it doesn't, the later measurement silently
    /// replaces the earlier one.
    ///
    /// Fails on an empty buffer, a length that does not divide into triplets, or a
    /// measurement at negative radius.
    pub fn build(coordinates: &[f64], width: usize, quantizer: Quantizer) -> Result<IndexBuild> {
        debug_assert!(width >= 2, "triplet width validated by the loader");
        if coordinates.is_empty() || coordinates.len() % width != 0 {
            return Err(Error::MalformedCoordinates {
                len: coordinates.len(),
                width,
            });
        }

        let mut build = IndexBuild {
            index: SpatialIndex {
                quantizer,
                map: HashMap::new(),
            },
            radii: AxisObservations::default(),
            elevations: AxisObservations::default(),
            azimuths: AxisObservations::default(),
        };

        for (measurement, triplet) in coordinates.chunks_exact(width).enumerate() {
            let radius = quantizer.key(triplet[width - 1]);
            if radius < 0 {
                return Err(Error::NegativeRadius {
                    measurement,
                    radius: quantizer.value_of(radius),
                });
            }
            let elevation = quantizer.key(triplet[width - 2]);
            let azimuth = quantizer.azimuth_key(triplet[0]);

            build.radii.record(radius);
            build.elevations.record(elevation);
            build.azimuths.record(azimuth);
            build.index.map.insert((radius, elevation, azimuth), measurement);
        }

        Ok(build)
    }

    /// Measurement index at the given direction, if one was measured there.
    ///
    /// A single hash probe; expected O(1) regardless of measurement count.
    pub fn lookup(&self, azimuth: f64, elevation: f64, radius: f64) -> Option<usize> {
        let key = (
            self.quantizer.key(radius),
            self.quantizer.key(elevation),
            self.quantizer.azimuth_key(azimuth),
        );
        self.map.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
}
