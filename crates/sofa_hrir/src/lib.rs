//! Loader and spatial index for SOFA (AES69) HRIR datasets.
//!
//! A SOFA file stores head-related impulse responses measured on a grid of spherical
//! directions around a listener.  This crate takes such a dataset from any
//! [ContainerReader] (the file format itself lives behind that trait), validates its
//! structure against the convention, and builds a constant-time index from a direction
//! `(azimuth, elevation, radius)` to the stored response for each receiver channel.
//!
//! What this crate deliberately does not do: resample, filter, interpolate between
//! measured directions, or truncate responses.  [SofaDataset::min_onset_delay] reports
//! where the energy-dominant onset occurs so that callers can truncate themselves.

pub mod container;
mod dataset;
mod error;
mod grid;
mod onset;
mod position;
mod quantizer;
mod spatial_index;

pub use container::{ContainerError, ContainerReader, MemoryContainer};
pub use dataset::SofaDataset;
pub use error::{Error, Result};
pub use grid::{Axis, GridStatistics};
pub use quantizer::Quantizer;
