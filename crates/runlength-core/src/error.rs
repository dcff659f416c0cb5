//! Error types for runlength-core
//!
//! Provides a unified error type for image construction, indexing and
//! region arithmetic. Each variant captures enough context for diagnostics
//! without exposing internal layout details.

use thiserror::Error;

/// runlength-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Image or region has no axes, or an axis of extent zero
    #[error("invalid dimensions: {0:?}")]
    InvalidDimension(Vec<usize>),

    /// Two geometries (size vectors) disagree
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Spacing vector is malformed (wrong length, non-positive or non-finite)
    #[error("invalid spacing: {0:?}")]
    InvalidSpacing(Vec<f64>),

    /// Index out of bounds
    #[error("index out of bounds: {index:?} not inside {size:?}")]
    IndexOutOfBounds { index: Vec<usize>, size: Vec<usize> },

    /// Raw data length does not match the product of the size vector
    #[error("data length {actual} does not match {expected} voxels")]
    DataLength { expected: usize, actual: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for runlength-core operations
pub type Result<T> = std::result::Result<T, Error>;
