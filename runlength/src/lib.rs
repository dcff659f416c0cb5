//! runlength - Gray-level run-length texture features for N-dimensional images
//!
//! # Overview
//!
//! For every voxel of an integer image, the texture engine builds the
//! gray-level run-length matrix of a window around the voxel and reduces
//! it to ten features:
//!
//! - Short/long run emphasis
//! - Grey-level and run-length nonuniformity
//! - Low/high grey-level run emphasis and their short/long run variants
//!
//! Features are averaged over a set of directions and written to an image
//! of the input's geometry. An optional mask restricts which voxels take
//! part.
//!
//! # Example
//!
//! ```
//! use runlength::NdImage;
//! use runlength::texture::{RunLengthFeature, RunLengthTextureFilter};
//!
//! let img = NdImage::from_data(&[4, 4], vec![
//!     0u8, 0, 1, 1,
//!     0, 0, 1, 1,
//!     2, 2, 3, 3,
//!     2, 2, 3, 3,
//! ]).unwrap();
//!
//! let mut filter = RunLengthTextureFilter::<u8>::new();
//! filter.set_uniform_radius(1);
//! filter.set_number_of_bins_per_axis(4).unwrap();
//! filter.set_pixel_value_min_max(0, 3).unwrap();
//!
//! let features = filter.compute::<f32>(&img, None).unwrap();
//! assert_eq!(features.size(), img.size());
//! assert!(features.get(&[1, 1]).unwrap()[RunLengthFeature::LongRunEmphasis] >= 1.0);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use runlength_core::*;

// Re-export the texture crate as a module to avoid name conflicts
pub use runlength_texture as texture;
