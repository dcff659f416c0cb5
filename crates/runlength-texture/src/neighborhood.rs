//! Neighborhood windows
//!
//! The window around a voxel is the box `[index - radius, index + radius]`
//! clipped to the image. Iterating a window yields the linear indices of
//! its voxels that take part in runs; mask-outside and out-of-range voxels
//! are already [`EXCLUDED`] in the digitized image and are skipped.

use crate::digitize::EXCLUDED;
use crate::{TextureError, TextureResult};
use runlength_core::{NdImage, Region};

/// The clipped window around one voxel of a digitized image.
#[derive(Debug, Clone)]
pub struct NeighborhoodWindow<'a> {
    image: &'a NdImage<u32>,
    region: Region,
}

impl<'a> NeighborhoodWindow<'a> {
    /// Window of `radius` around `center`.
    ///
    /// # Errors
    ///
    /// Returns `TextureError::Internal` if `center` lies outside the image
    /// or `radius` has the wrong length. The filter rules both out before
    /// dispatching workers, so either indicates a logic defect.
    pub fn new(image: &'a NdImage<u32>, center: &[usize], radius: &[usize]) -> TextureResult<Self> {
        let size = image.size();
        if center.len() != size.len() || radius.len() != size.len() {
            return Err(TextureError::Internal(format!(
                "window center {:?} / radius {:?} for image {:?}",
                center, radius, size
            )));
        }
        if center.iter().zip(size).any(|(c, s)| c >= s) {
            return Err(TextureError::Internal(format!(
                "window center {:?} outside image {:?}",
                center, size
            )));
        }
        let index: Vec<usize> = center
            .iter()
            .zip(radius)
            .map(|(c, r)| c.saturating_sub(*r))
            .collect();
        let extent: Vec<usize> = center
            .iter()
            .zip(radius)
            .zip(&index)
            .map(|((c, r), lo)| (c.saturating_add(*r) - lo).saturating_add(1))
            .collect();
        let region = Region::new(index, extent)?
            .intersect(&image.region())
            .ok_or_else(|| {
                TextureError::Internal(format!("window at {:?} misses the image", center))
            })?;
        Ok(NeighborhoodWindow { image, region })
    }

    /// The clipped index box
    #[inline]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// The digitized image the window reads from
    #[inline]
    pub fn image(&self) -> &'a NdImage<u32> {
        self.image
    }

    /// Check whether a signed position lies inside the window box.
    #[inline]
    pub fn contains(&self, position: &[isize]) -> bool {
        self.region.contains_signed(position)
    }

    /// Bin stored at a linear index of the digitized image.
    #[inline]
    pub fn bin_at(&self, linear: usize) -> u32 {
        self.image.data()[linear]
    }

    /// Iterate the voxels of the window that take part in runs.
    ///
    /// The iterator is lazy and cheap to clone; calling `iter` again
    /// restarts the scan.
    pub fn iter(&self) -> WindowIter<'_, 'a> {
        WindowIter {
            window: self,
            position: self.region.index().to_vec(),
            started: false,
            done: false,
        }
    }
}

/// Iterator over the valid voxels of a [`NeighborhoodWindow`].
///
/// Yields linear indices into the digitized image, in axis-0-fastest
/// order. [`position`](Self::position) gives the multi-index of the item
/// most recently returned.
#[derive(Debug, Clone)]
pub struct WindowIter<'w, 'a> {
    window: &'w NeighborhoodWindow<'a>,
    position: Vec<usize>,
    started: bool,
    done: bool,
}

impl WindowIter<'_, '_> {
    /// Multi-index of the last yielded voxel.
    #[inline]
    pub fn position(&self) -> &[usize] {
        &self.position
    }
}

impl Iterator for WindowIter<'_, '_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let region = &self.window.region;
        let strides = self.window.image.strides();
        loop {
            if self.done {
                return None;
            }
            if self.started {
                if !region.step(&mut self.position) {
                    self.done = true;
                    return None;
                }
            } else {
                self.started = true;
            }
            let linear: usize = self
                .position
                .iter()
                .zip(strides)
                .map(|(&p, &s)| p * s)
                .sum();
            if self.window.image.data()[linear] != EXCLUDED {
                return Some(linear);
            }
        }
    }
}
