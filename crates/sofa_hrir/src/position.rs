//! Picks the coordinate buffer out of the container's two position datasets.

use crate::container::{names, ContainerReader};
use crate::error::{Error, Result};

/// Decide which position dataset carries the per-measurement coordinates and read it.
///
/// The convention stores both `SourcePosition` and `ListenerPosition` with a leading
/// dimension of either `M` (one triplet per measurement) or 1 (a fixed position).  In the
/// profile supported here exactly one of the two may vary per measurement: both matching
/// `M` is ambiguous (moving source *and* listener) and neither matching means there is no
/// spatial data at all.  Either way the load fails.
///
/// The returned buffer is flat and holds exactly `measurements * width` values.  A
/// selected dataset whose declared shape holds anything else fails the load here: the
/// index builder trusts this count, and every measurement index it produces must stay
/// below `M` or later queries would slice past the impulse response buffer.
pub(crate) fn resolve_coordinates<R: ContainerReader + ?Sized>(
    reader: &R,
    measurements: usize,
    width: usize,
) -> Result<Vec<f64>> {
    let per_measurement = |shape: &Vec<usize>| shape.first() == Some(&measurements);

    let source = reader
        .dataset_shape(names::SOURCE_POSITION)
        .filter(per_measurement);
    let listener = reader
        .dataset_shape(names::LISTENER_POSITION)
        .filter(per_measurement);

    let (name, shape) = match (source, listener) {
        (Some(_), Some(_)) => return Err(Error::AmbiguousPositions),
        (Some(shape), None) => (names::SOURCE_POSITION, shape),
        (None, Some(shape)) => (names::LISTENER_POSITION, shape),
        (None, None) => return Err(Error::NoPositionData),
    };

    if shape.iter().product::<usize>() != measurements * width {
        return Err(Error::PositionShapeMismatch {
            shape,
            measurements,
            width,
        });
    }

    let mut coordinates = vec![0.0; measurements * width];
    reader.read_dataset(name, &mut coordinates)?;
    Ok(coordinates)
}
