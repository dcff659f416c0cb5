//! NdImage - N-dimensional image container
//!
//! `NdImage<T>` is a dense grid of `T` with a per-axis physical spacing,
//! generic over both the element type and the number of axes.
//!
//! # Memory Layout
//!
//! Data is stored with axis 0 varying fastest and no padding. The voxel at
//! `(i0, i1, ..., in)` is at `i0 + i1*s0 + i2*s0*s1 + ...` where `sk` is the
//! extent of axis `k`.
//!
//! # Examples
//!
//! ```
//! use runlength_core::NdImage;
//!
//! let mut img = NdImage::new(&[4, 3], 0u8).unwrap();
//! img.set(&[2, 1], 7).unwrap();
//! assert_eq!(img.get(&[2, 1]), Some(&7));
//! assert_eq!(img.linear_index(&[2, 1]), Some(6));
//! ```

use crate::error::{Error, Result};
use crate::region::Region;

/// N-dimensional image
#[derive(Debug, Clone, PartialEq)]
pub struct NdImage<T> {
    /// Extent per axis (all >= 1)
    size: Vec<usize>,
    /// Physical distance per index step, per axis
    spacing: Vec<f64>,
    /// Linear stride per axis
    strides: Vec<usize>,
    /// Voxel data (axis 0 fastest)
    data: Vec<T>,
}

fn validate_size(size: &[usize]) -> Result<usize> {
    if size.is_empty() || size.contains(&0) {
        return Err(Error::InvalidDimension(size.to_vec()));
    }
    size.iter()
        .try_fold(1usize, |acc, &s| acc.checked_mul(s))
        .ok_or_else(|| Error::InvalidParameter(format!("image size {:?} overflows", size)))
}

fn strides_for(size: &[usize]) -> Vec<usize> {
    let mut strides = Vec::with_capacity(size.len());
    let mut acc = 1;
    for &s in size {
        strides.push(acc);
        acc *= s;
    }
    strides
}

impl<T: Clone> NdImage<T> {
    /// Create a new image with every voxel set to `value` and unit spacing.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if `size` is empty or contains 0.
    pub fn new(size: &[usize], value: T) -> Result<Self> {
        let len = validate_size(size)?;
        Ok(NdImage {
            size: size.to_vec(),
            spacing: vec![1.0; size.len()],
            strides: strides_for(size),
            data: vec![value; len],
        })
    }

    /// Create an image with the same size and spacing as `self`, every
    /// voxel set to `value`.
    pub fn new_like<U: Clone>(&self, value: U) -> NdImage<U> {
        NdImage {
            size: self.size.clone(),
            spacing: self.spacing.clone(),
            strides: self.strides.clone(),
            data: vec![value; self.data.len()],
        }
    }
}

impl<T> NdImage<T> {
    /// Create an image from raw data in axis-0-fastest order.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is invalid or `data.len()` differs from
    /// the voxel count.
    pub fn from_data(size: &[usize], data: Vec<T>) -> Result<Self> {
        let len = validate_size(size)?;
        if data.len() != len {
            return Err(Error::DataLength {
                expected: len,
                actual: data.len(),
            });
        }
        Ok(NdImage {
            size: size.to_vec(),
            spacing: vec![1.0; size.len()],
            strides: strides_for(size),
            data,
        })
    }

    /// Replace the spacing, consuming and returning the image.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSpacing` unless there is one finite, strictly
    /// positive value per axis.
    pub fn with_spacing(mut self, spacing: &[f64]) -> Result<Self> {
        self.set_spacing(spacing)?;
        Ok(self)
    }

    /// Set the spacing.
    pub fn set_spacing(&mut self, spacing: &[f64]) -> Result<()> {
        if spacing.len() != self.size.len() || spacing.iter().any(|s| !s.is_finite() || *s <= 0.0)
        {
            return Err(Error::InvalidSpacing(spacing.to_vec()));
        }
        self.spacing = spacing.to_vec();
        Ok(())
    }

    /// Number of axes
    #[inline]
    pub fn dimension(&self) -> usize {
        self.size.len()
    }

    /// Extent per axis
    #[inline]
    pub fn size(&self) -> &[usize] {
        &self.size
    }

    /// Physical spacing per axis
    #[inline]
    pub fn spacing(&self) -> &[f64] {
        &self.spacing
    }

    /// Linear stride per axis
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Total number of voxels
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: images have at least one voxel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The region covering the whole image.
    pub fn region(&self) -> Region {
        Region::covering(&self.size)
    }

    /// Check whether `other` has the same size and spacing.
    pub fn same_geometry<U>(&self, other: &NdImage<U>) -> bool {
        self.size == other.size && self.spacing == other.spacing
    }

    /// Linear offset of `position`, or `None` if it lies outside.
    pub fn linear_index(&self, position: &[usize]) -> Option<usize> {
        if position.len() != self.size.len() {
            return None;
        }
        let mut linear = 0;
        for (k, &p) in position.iter().enumerate() {
            if p >= self.size[k] {
                return None;
            }
            linear += p * self.strides[k];
        }
        Some(linear)
    }

    /// Get a reference to the voxel at `position`.
    pub fn get(&self, position: &[usize]) -> Option<&T> {
        self.linear_index(position).map(|i| &self.data[i])
    }

    /// Set the voxel at `position`.
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if `position` lies outside.
    pub fn set(&mut self, position: &[usize], value: T) -> Result<()> {
        let i = self
            .linear_index(position)
            .ok_or_else(|| Error::IndexOutOfBounds {
                index: position.to_vec(),
                size: self.size.clone(),
            })?;
        self.data[i] = value;
        Ok(())
    }

    /// Raw voxel data (axis 0 fastest)
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable raw voxel data (axis 0 fastest)
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Apply `f` to every voxel, keeping size and spacing.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> NdImage<U> {
        NdImage {
            size: self.size.clone(),
            spacing: self.spacing.clone(),
            strides: self.strides.clone(),
            data: self.data.iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_extent() {
        assert!(NdImage::new(&[4, 0], 0u8).is_err());
        assert!(NdImage::new(&[], 0u8).is_err());
    }

    #[test]
    fn test_from_data_length_check() {
        assert!(NdImage::from_data(&[2, 3], vec![0u8; 5]).is_err());
        let img = NdImage::from_data(&[2, 3], (0..6u8).collect()).unwrap();
        assert_eq!(img.get(&[1, 2]), Some(&5));
        assert_eq!(img.get(&[2, 0]), None);
    }

    #[test]
    fn test_strides_and_positions() {
        let img = NdImage::new(&[3, 4, 5], 0i16).unwrap();
        assert_eq!(img.strides(), &[1, 3, 12]);
        assert_eq!(img.linear_index(&[2, 1, 3]), Some(2 + 3 + 36));
        assert_eq!(img.linear_index(&[3, 0, 0]), None);
    }

    #[test]
    fn test_spacing_validation() {
        let img = NdImage::new(&[2, 2], 0u8).unwrap();
        assert!(img.clone().with_spacing(&[1.0]).is_err());
        assert!(img.clone().with_spacing(&[1.0, 0.0]).is_err());
        assert!(img.clone().with_spacing(&[1.0, f64::NAN]).is_err());
        let img = img.with_spacing(&[0.5, 2.0]).unwrap();
        assert_eq!(img.spacing(), &[0.5, 2.0]);
    }

    #[test]
    fn test_new_like_keeps_geometry() {
        let img = NdImage::new(&[3, 2], 1u8)
            .unwrap()
            .with_spacing(&[0.5, 0.25])
            .unwrap();
        let out = img.new_like(0.0f64);
        assert!(img.same_geometry(&out));
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut img = NdImage::new(&[2, 2], 0u8).unwrap();
        assert!(img.set(&[2, 0], 1).is_err());
        assert!(img.set(&[1, 1], 1).is_ok());
        assert_eq!(img.data()[3], 1);
    }
}
