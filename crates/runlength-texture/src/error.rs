//! Error types for runlength-texture
//!
//! Configuration problems are reported before any parallel work starts;
//! degenerate numeric states (no runs in a window) are not errors.

use thiserror::Error;

/// Errors that can occur while configuring or running the texture filter
#[derive(Debug, Error)]
pub enum TextureError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] runlength_core::Error),

    /// Lower bound of a range above its upper bound
    #[error("invalid {name} range: min {min} > max {max}")]
    InvalidRange {
        /// Which range was rejected
        name: &'static str,
        /// Requested lower bound
        min: f64,
        /// Requested upper bound
        max: f64,
    },

    /// Offset with every component equal to zero
    #[error("offset must not be the zero vector: {0:?}")]
    ZeroOffset(Vec<isize>),

    /// Parameter dimensionality does not match the image
    #[error("{what} has {actual} axes, image has {expected}")]
    DimensionMismatch {
        /// Which parameter disagrees
        what: &'static str,
        /// Image dimensionality
        expected: usize,
        /// Parameter dimensionality
        actual: usize,
    },

    /// Mask size or spacing differs from the input image
    #[error("mask geometry {mask:?} does not match image geometry {image:?}")]
    MaskGeometry {
        /// Input image size
        image: Vec<usize>,
        /// Mask image size
        mask: Vec<usize>,
    },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Worker pool could not be created
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Index arithmetic left the expected bounds
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for texture operations
pub type TextureResult<T> = Result<T, TextureError>;
