//! runlength-texture - Gray-level run-length texture feature images
//!
//! This crate computes, for every voxel of an N-dimensional integer image,
//! the gray-level run-length matrix (GLRLM) of a local window and reduces
//! it to ten texture features:
//!
//! - Intensity digitization into a fixed number of bins
//! - Direction sets (single offsets, lists, unit neighborhoods)
//! - Per-window run detection with physical distance filtering
//! - Ten run-length features averaged over directions
//! - Multi-threaded evaluation over disjoint output slabs
//!
//! The entry point is [`RunLengthTextureFilter`].

pub mod average;
pub mod digitize;
mod error;
pub mod features;
pub mod filter;
pub mod histogram;
pub mod neighborhood;
pub mod offset;
pub mod scheduler;

pub use error::{TextureError, TextureResult};

// Re-export commonly used items
pub use average::DirectionAverager;
pub use digitize::{Digitizer, EXCLUDED};
pub use features::{
    FeatureScalar, FeatureVector, NUMBER_OF_FEATURES, RunLengthFeature, compute_features,
};
pub use filter::{
    DEFAULT_BINS_PER_AXIS, DEFAULT_RADIUS, NeighborhoodRadius, RunLengthTextureFilter,
};
pub use histogram::{DistanceRange, RunLengthHistogram, accumulate_runs};
pub use neighborhood::NeighborhoodWindow;
pub use offset::{Direction, Offset, OffsetSet};
