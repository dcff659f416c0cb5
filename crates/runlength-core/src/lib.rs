//! runlength-core - Basic data structures for N-dimensional texture analysis
//!
//! This crate provides the fundamental data structures used by the
//! run-length texture engine:
//!
//! - [`NdImage`] - Dense N-dimensional image with per-axis spacing
//! - [`Region`] - Hyperrectangular index range (windows, slabs, extents)
//! - [`IntegerPixel`] - Integer intensity types accepted as scalar input

pub mod error;
pub mod image;
pub mod pixel;
pub mod region;

pub use error::{Error, Result};
pub use image::NdImage;
pub use pixel::IntegerPixel;
pub use region::{Region, RegionIter};
