use crate::container::ContainerError;
use crate::grid::Axis;

/// Everything that can go wrong while loading a dataset.
///
/// None of these cross the public boundary: [crate::SofaDataset::load] logs the error,
/// rolls the dataset back to its freshly constructed state, and returns `false`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("container has no dataset named {0:?}")]
    MissingDataset(&'static str),

    #[error("dimension marker {0:?} must have a positive extent")]
    ZeroDimension(&'static str),

    #[error("coordinate triplet width is {0}, the convention requires 3")]
    UnsupportedTripletWidth(usize),

    #[error("sampling rate must be nonzero")]
    ZeroSamplingRate,

    #[error(
        "impulse response tensor has shape {found:?}, expected [{measurements}, {receivers}, {samples}]"
    )]
    ImpulseShapeMismatch {
        found: Vec<usize>,
        measurements: usize,
        receivers: usize,
        samples: usize,
    },

    #[error("both source and listener positions carry one triplet per measurement")]
    AmbiguousPositions,

    #[error("neither source nor listener position carries one triplet per measurement")]
    NoPositionData,

    #[error(
        "position dataset shape {shape:?} does not hold {measurements} triplets of width {width}"
    )]
    PositionShapeMismatch {
        shape: Vec<usize>,
        measurements: usize,
        width: usize,
    },

    #[error("coordinate buffer of length {len} cannot be split into triplets of width {width}")]
    MalformedCoordinates { len: usize, width: usize },

    #[error("measurement {measurement} sits at negative radius {radius}")]
    NegativeRadius { measurement: usize, radius: f64 },

    #[error("non-uniform {axis} grid: spacing {found} where {expected} was established")]
    NonUniformGrid {
        axis: Axis,
        expected: f64,
        found: f64,
    },

    /// Internal contract of the grid validator: it refuses to summarize an axis with no
    /// observations.  Not reachable through a load — the index build fails on an empty
    /// coordinate buffer first, and a non-empty build records at least one value per
    /// axis.
    #[error("no {0} values were observed")]
    EmptyAxis(Axis),

    #[error("no measurements to scan for an onset delay")]
    EmptyMeasurementSet,

    #[error(transparent)]
    Container(#[from] ContainerError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
