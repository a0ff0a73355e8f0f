//! The aggregate: load orchestration, queries, reset.

use crate::container::{names, ContainerReader};
use crate::error::{Error, Result};
use crate::grid::{self, Axis, GridStatistics};
use crate::onset;
use crate::position;
use crate::quantizer::Quantizer;
use crate::spatial_index::SpatialIndex;

/// Coordinate triplet width fixed by the convention: (azimuth, elevation, radius).
const TRIPLET_WIDTH: usize = 3;

/// An in-memory HRIR dataset with a constant-time direction index.
///
/// A dataset starts empty, is populated by one successful [SofaDataset::load], and is
/// explicitly cleared by [SofaDataset::reset].  A failed load rolls everything back
/// first; there is no observable partially loaded state.  All accessors read as
/// zero/default while nothing is loaded, and [SofaDataset::hrir] answers `None` rather
/// than panicking for any query that cannot be satisfied.
///
/// Loading and resetting take `&mut self`; queries take `&self`.  An already loaded
/// instance can therefore be queried from many threads at once, and the borrow checker
/// keeps any returned sample slice from outliving a reset or reload.
#[derive(Debug, Default)]
pub struct SofaDataset {
    quantizer: Quantizer,
    measurements: usize,
    samples_per_measurement: usize,
    receivers: usize,
    coordinate_width: usize,
    sampling_rate: f64,
    impulse_responses: Vec<f64>,
    index: SpatialIndex,
    radius_grid: GridStatistics,
    elevation_grid: GridStatistics,
    azimuth_grid: GridStatistics,
    min_onset_delay: usize,
    loaded: bool,
}

impl SofaDataset {
    pub fn new() -> Self {
        Default::default()
    }

    /// A dataset whose coordinates quantize with the given tolerance instead of the
    /// default 0.1.  The tolerance survives resets; it is configuration, not data.
    ///
    /// # Panics
    ///
    /// Panics unless `epsilon` is positive, as [Quantizer::new] does.
    pub fn with_tolerance(epsilon: f64) -> Self {
        Self {
            quantizer: Quantizer::new(epsilon),
            ..Default::default()
        }
    }

    /// Load a dataset from a container.
    ///
    /// On success the dataset is fully populated and `true` is returned.  On any failure
    /// the cause is logged, the dataset is rolled back to its freshly constructed state,
    /// and `false` is returned.
    pub fn load<R: ContainerReader + ?Sized>(&mut self, reader: &R) -> bool {
        self.reset();
        match self.try_load(reader) {
            Ok(()) => {
                self.loaded = true;
                log::debug!(
                    "loaded HRIR dataset: {} measurements x {} receivers x {} samples at {} Hz",
                    self.measurements,
                    self.receivers,
                    self.samples_per_measurement,
                    self.sampling_rate
                );
                true
            }
            Err(error) => {
                log::warn!("HRIR dataset load failed: {error}");
                self.reset();
                false
            }
        }
    }

    fn try_load<R: ContainerReader + ?Sized>(&mut self, reader: &R) -> Result<()> {
        self.measurements = dimension(reader, names::MEASUREMENTS)?;
        self.samples_per_measurement = dimension(reader, names::SAMPLES)?;
        self.receivers = dimension(reader, names::RECEIVERS)?;
        self.coordinate_width = dimension(reader, names::COORDINATE_WIDTH)?;
        if self.coordinate_width != TRIPLET_WIDTH {
            return Err(Error::UnsupportedTripletWidth(self.coordinate_width));
        }

        let mut rate = [0.0];
        reader.read_dataset(names::SAMPLING_RATE, &mut rate)?;
        if rate[0] == 0.0 {
            return Err(Error::ZeroSamplingRate);
        }
        self.sampling_rate = rate[0];

        let expected = [
            self.measurements,
            self.receivers,
            self.samples_per_measurement,
        ];
        let found = reader
            .dataset_shape(names::IMPULSE_RESPONSES)
            .ok_or(Error::MissingDataset(names::IMPULSE_RESPONSES))?;
        if found != expected {
            return Err(Error::ImpulseShapeMismatch {
                found,
                measurements: self.measurements,
                receivers: self.receivers,
                samples: self.samples_per_measurement,
            });
        }
        self.impulse_responses = vec![0.0; expected.iter().product()];
        reader.read_dataset(names::IMPULSE_RESPONSES, &mut self.impulse_responses)?;

        let coordinates =
            position::resolve_coordinates(reader, self.measurements, self.coordinate_width)?;
        let build = SpatialIndex::build(&coordinates, self.coordinate_width, self.quantizer)?;
        self.index = build.index;
        self.radius_grid = grid::validate(Axis::Radius, &build.radii, self.quantizer)?;
        self.elevation_grid = grid::validate(Axis::Elevation, &build.elevations, self.quantizer)?;
        self.azimuth_grid = grid::validate(Axis::Azimuth, &build.azimuths, self.quantizer)?;

        self.min_onset_delay = onset::min_onset_delay(
            &self.impulse_responses,
            self.measurements,
            self.receivers,
            self.samples_per_measurement,
        )?;

        Ok(())
    }

    /// The impulse response measured at the given direction, for one receiver channel.
    ///
    /// Coordinates quantize exactly the way the index was built, so anything within half
    /// a tolerance of a measured point hits.  `None` when nothing is loaded, the channel
    /// is out of range, or no measurement sits at that direction.
    pub fn hrir(&self, channel: usize, azimuth: f64, elevation: f64, radius: f64) -> Option<&[f64]> {
        if !self.loaded || channel >= self.receivers {
            return None;
        }
        let measurement = self.index.lookup(azimuth, elevation, radius)?;
        let start = (measurement * self.receivers + channel) * self.samples_per_measurement;
        Some(&self.impulse_responses[start..start + self.samples_per_measurement])
    }

    /// Return to the freshly constructed state.  Idempotent; a subsequent load starts
    /// from scratch.
    pub fn reset(&mut self) {
        self.measurements = 0;
        self.samples_per_measurement = 0;
        self.receivers = 0;
        self.coordinate_width = 0;
        self.sampling_rate = 0.0;
        self.impulse_responses = Vec::new();
        self.index = SpatialIndex::default();
        self.radius_grid = GridStatistics::default();
        self.elevation_grid = GridStatistics::default();
        self.azimuth_grid = GridStatistics::default();
        self.min_onset_delay = 0;
        self.loaded = false;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    /// `M`: the number of measured directions.
    pub fn measurements(&self) -> usize {
        self.measurements
    }

    /// `N`: samples per impulse response.
    pub fn samples_per_measurement(&self) -> usize {
        self.samples_per_measurement
    }

    /// `R`: receiver channels per measurement.
    pub fn receivers(&self) -> usize {
        self.receivers
    }

    /// `C`: values per coordinate triplet, always 3 once loaded.
    pub fn coordinate_width(&self) -> usize {
        self.coordinate_width
    }

    pub fn radius_grid(&self) -> GridStatistics {
        self.radius_grid
    }

    pub fn elevation_grid(&self) -> GridStatistics {
        self.elevation_grid
    }

    pub fn azimuth_grid(&self) -> GridStatistics {
        self.azimuth_grid
    }

    /// Earliest peak-magnitude sample index over all stored responses; a truncation hint.
    pub fn min_onset_delay(&self) -> usize {
        self.min_onset_delay
    }
}

fn dimension<R: ContainerReader + ?Sized>(reader: &R, name: &'static str) -> Result<usize> {
    let shape = reader
        .dataset_shape(name)
        .ok_or(Error::MissingDataset(name))?;
    match shape.first().copied() {
        None | Some(0) => Err(Error::ZeroDimension(name)),
        Some(extent) => Ok(extent),
    }
}
