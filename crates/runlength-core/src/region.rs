//! Region - Hyperrectangular index ranges
//!
//! A [`Region`] is a start index plus a size per axis. Regions are used to
//! describe the whole extent of an image, the neighborhood window around a
//! voxel and the slabs handed to parallel workers.
//!
//! Traversal order is always axis 0 fastest, matching the memory layout
//! of [`NdImage`](crate::NdImage).

use crate::error::{Error, Result};

/// An N-dimensional hyperrectangle of voxel indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region {
    /// First index on every axis
    index: Vec<usize>,
    /// Number of indices on every axis (all >= 1)
    size: Vec<usize>,
}

impl Region {
    /// Create a region from a start index and a size.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if `size` is empty or has a zero
    /// extent, and `Error::DimensionMismatch` if `index` and `size` have
    /// different lengths.
    pub fn new(index: Vec<usize>, size: Vec<usize>) -> Result<Self> {
        if size.is_empty() || size.contains(&0) {
            return Err(Error::InvalidDimension(size));
        }
        if index.len() != size.len() {
            return Err(Error::DimensionMismatch {
                expected: size,
                actual: index,
            });
        }
        Ok(Region { index, size })
    }

    /// Create the region starting at the origin with the given size.
    pub fn from_size(size: &[usize]) -> Result<Self> {
        Self::new(vec![0; size.len()], size.to_vec())
    }

    /// Region at the origin for a size already validated by the caller.
    pub(crate) fn covering(size: &[usize]) -> Self {
        Region {
            index: vec![0; size.len()],
            size: size.to_vec(),
        }
    }

    /// Number of axes
    #[inline]
    pub fn dimension(&self) -> usize {
        self.size.len()
    }

    /// Start index on every axis
    #[inline]
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Extent on every axis
    #[inline]
    pub fn size(&self) -> &[usize] {
        &self.size
    }

    /// Last index (inclusive) on `axis`.
    #[inline]
    pub fn last(&self, axis: usize) -> usize {
        self.index[axis] + self.size[axis] - 1
    }

    /// Total number of voxels covered
    pub fn num_voxels(&self) -> usize {
        self.size.iter().product()
    }

    /// Check whether a signed position lies inside the region.
    ///
    /// Used when stepping along an offset that may leave the index space.
    pub fn contains_signed(&self, position: &[isize]) -> bool {
        position.len() == self.dimension()
            && position.iter().enumerate().all(|(k, &p)| {
                p >= self.index[k] as isize && p <= self.last(k) as isize
            })
    }

    /// Intersection with another region, or `None` if they do not overlap.
    pub fn intersect(&self, other: &Region) -> Option<Region> {
        if other.dimension() != self.dimension() {
            return None;
        }
        let mut index = Vec::with_capacity(self.dimension());
        let mut size = Vec::with_capacity(self.dimension());
        for k in 0..self.dimension() {
            let lo = self.index[k].max(other.index[k]);
            let hi = self.last(k).min(other.last(k));
            if lo > hi {
                return None;
            }
            index.push(lo);
            size.push(hi - lo + 1);
        }
        Some(Region { index, size })
    }

    /// The axis a split would cut along: the slowest axis with extent > 1.
    ///
    /// All axes above it have extent 1, so every slab cut along it is a
    /// contiguous run of memory in an axis-0-fastest layout.
    pub fn split_axis(&self) -> Option<usize> {
        (0..self.dimension()).rev().find(|&k| self.size[k] > 1)
    }

    /// Split into at most `pieces` disjoint slabs covering the region.
    ///
    /// Slabs are cut along [`split_axis`](Self::split_axis) and are as
    /// balanced as possible; the first `extent % pieces` slabs are one
    /// index thicker. Fewer slabs are returned when the axis is shorter
    /// than `pieces`.
    pub fn split(&self, pieces: usize) -> Vec<Region> {
        let Some(axis) = self.split_axis() else {
            return vec![self.clone()];
        };
        let extent = self.size[axis];
        let n = pieces.clamp(1, extent);
        let base = extent / n;
        let extra = extent % n;

        let mut start = self.index[axis];
        (0..n)
            .map(|p| {
                let len = base + usize::from(p < extra);
                let mut slab = self.clone();
                slab.index[axis] = start;
                slab.size[axis] = len;
                start += len;
                slab
            })
            .collect()
    }

    /// Advance `position` to the next index in axis-0-fastest order.
    ///
    /// Returns `false` once the last index has been passed; `position`
    /// is then back at the region start.
    pub fn step(&self, position: &mut [usize]) -> bool {
        for k in 0..self.dimension() {
            if position[k] < self.last(k) {
                position[k] += 1;
                return true;
            }
            position[k] = self.index[k];
        }
        false
    }

    /// Iterate all indices of the region, axis 0 fastest.
    pub fn iter(&self) -> RegionIter<'_> {
        RegionIter {
            region: self,
            current: Some(self.index.clone()),
        }
    }
}

/// Iterator over the indices of a [`Region`].
#[derive(Debug, Clone)]
pub struct RegionIter<'a> {
    region: &'a Region,
    current: Option<Vec<usize>>,
}

impl Iterator for RegionIter<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.current.take()?;
        let mut next = current.clone();
        if self.region.step(&mut next) {
            self.current = Some(next);
        }
        Some(current)
    }
}
