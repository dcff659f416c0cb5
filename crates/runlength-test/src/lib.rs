//! runlength-test - Regression test framework for the runlength libraries
//!
//! This crate provides the regression test framework used by the texture
//! crates' `tests/*_reg.rs` files, plus small synthetic images with known
//! run structure:
//!
//! - **Compare**: check results and report failures (default)
//! - **Display**: additionally print every checked value
//!
//! # Usage
//!
//! ```ignore
//! use runlength_test::RegParams;
//!
//! let mut rp = RegParams::new("glrlm_example");
//! rp.compare_values(17.0 / 3.0, lre, 1e-12);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod params;

pub use params::{RegParams, RegTestMode};

use runlength_core::{NdImage, Result};

/// Image whose value is the sum of the voxel's indices.
pub fn ramp(size: &[usize]) -> Result<NdImage<u16>> {
    let mut img = NdImage::new(size, 0u16)?;
    let region = img.region();
    for (pos, dst) in region.iter().zip(img.data_mut()) {
        *dst = pos.iter().sum::<usize>() as u16;
    }
    Ok(img)
}

/// Binary stripes of `width` voxels across `axis`.
pub fn stripes(size: &[usize], axis: usize, width: usize) -> Result<NdImage<u8>> {
    let mut img = NdImage::new(size, 0u8)?;
    let width = width.max(1);
    let region = img.region();
    for (pos, dst) in region.iter().zip(img.data_mut()) {
        *dst = ((pos.get(axis).copied().unwrap_or(0) / width) % 2) as u8;
    }
    Ok(img)
}

/// Alternating 0/1 voxels; no two face neighbors share a value.
pub fn checkerboard(size: &[usize]) -> Result<NdImage<u8>> {
    let mut img = NdImage::new(size, 0u8)?;
    let region = img.region();
    for (pos, dst) in region.iter().zip(img.data_mut()) {
        *dst = (pos.iter().sum::<usize>() % 2) as u8;
    }
    Ok(img)
}

/// Reproducible pseudo-random values in `[0, levels)`.
///
/// Uses a 32-bit linear congruential generator so the same seed gives the
/// same image on every platform.
pub fn lcg_noise(size: &[usize], levels: u16, seed: u32) -> Result<NdImage<u16>> {
    let mut img = NdImage::new(size, 0u16)?;
    let levels = u32::from(levels.max(1));
    let mut state = seed;
    for dst in img.data_mut() {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
        *dst = ((state >> 16) % levels) as u16;
    }
    Ok(img)
}

/// 2D image from rows as written in source: `rows[y][x]`, axis 0 is `x`.
pub fn from_rows(rows: &[&[u8]]) -> Result<NdImage<u8>> {
    let height = rows.len();
    let width = rows.first().map_or(0, |r| r.len());
    let data: Vec<u8> = rows.iter().flat_map(|r| r.iter().copied()).collect();
    NdImage::from_data(&[width, height], data)
}
