//! The boundary to the hierarchical container holding the dataset.
//!
//! The core never parses the container's binary layout.  Whatever actually owns the file
//! (an HDF5 binding, a network fetch, a test fixture) implements [ContainerReader]; the
//! loader only ever asks for a named dataset's declared shape and its values.

use ahash::HashMap;

/// Dataset names fixed by the convention.
pub mod names {
    /// The impulse response tensor, shape `[M, R, N]`.
    pub const IMPULSE_RESPONSES: &str = "Data.IR";
    pub const SAMPLING_RATE: &str = "Data.SamplingRate";
    /// Dimension markers; their declared extents carry the dataset's dimensions.
    pub const MEASUREMENTS: &str = "M";
    pub const SAMPLES: &str = "N";
    pub const RECEIVERS: &str = "R";
    pub const COORDINATE_WIDTH: &str = "C";
    pub const SOURCE_POSITION: &str = "SourcePosition";
    pub const LISTENER_POSITION: &str = "ListenerPosition";
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ContainerError {
    #[error("container has no dataset named {0:?}")]
    NoSuchDataset(String),

    #[error("dataset {name:?} holds {have} values but the destination wants {want}")]
    LengthMismatch {
        name: String,
        have: usize,
        want: usize,
    },
}

/// Read-only access to named numeric datasets.
///
/// Shapes are row-major and reads fill a caller-sized flat buffer; a reader fails a read
/// when the name is absent or the dataset cannot fill the destination exactly.
pub trait ContainerReader {
    /// The declared shape of `name`, or `None` if the container has no such dataset.
    fn dataset_shape(&self, name: &str) -> Option<Vec<usize>>;

    /// Fill `destination` with the dataset's values in row-major order.
    fn read_dataset(&self, name: &str, destination: &mut [f64]) -> Result<(), ContainerError>;
}

/// A [ContainerReader] over in-memory arrays.
///
/// Useful for feeding synthetic datasets to [crate::SofaDataset] without touching a real
/// file; every load test in this crate runs against one of these.
#[derive(Debug, Default)]
pub struct MemoryContainer {
    datasets: HashMap<String, ShapedArray>,
}

#[derive(Debug)]
struct ShapedArray {
    shape: Vec<usize>,
    values: Vec<f64>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add a dataset.  `values.len()` must equal the product of `shape`.
    pub fn dataset(mut self, name: &str, shape: &[usize], values: Vec<f64>) -> Self {
        assert_eq!(
            shape.iter().product::<usize>(),
            values.len(),
            "shape of {name:?} does not match its value count"
        );
        self.datasets.insert(
            name.to_string(),
            ShapedArray {
                shape: shape.to_vec(),
                values,
            },
        );
        self
    }

    /// Add a single-value dataset.
    pub fn scalar(self, name: &str, value: f64) -> Self {
        self.dataset(name, &[1], vec![value])
    }

    /// Add a dimension marker whose declared extent is `extent`; the values are never
    /// read, only the shape matters.
    pub fn dimension(self, name: &str, extent: usize) -> Self {
        self.dataset(name, &[extent], vec![0.0; extent])
    }
}

impl ContainerReader for MemoryContainer {
    fn dataset_shape(&self, name: &str) -> Option<Vec<usize>> {
        self.datasets.get(name).map(|d| d.shape.clone())
    }

    fn read_dataset(&self, name: &str, destination: &mut [f64]) -> Result<(), ContainerError> {
        let dataset = self
            .datasets
            .get(name)
            .ok_or_else(|| ContainerError::NoSuchDataset(name.to_string()))?;
        if dataset.values.len() != destination.len() {
            return Err(ContainerError::LengthMismatch {
                name: name.to_string(),
                have: dataset.values.len(),
                want: destination.len(),
            });
        }
        destination.copy_from_slice(&dataset.values);
        Ok(())
    }
}
