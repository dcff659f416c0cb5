//! Averaging features over directions

use crate::features::{FeatureScalar, FeatureVector, NUMBER_OF_FEATURES};

/// Elementwise running sum of per-direction feature values.
#[derive(Debug, Clone, Default)]
pub struct DirectionAverager {
    sums: [f64; NUMBER_OF_FEATURES],
    directions: usize,
}

impl DirectionAverager {
    /// Start a new average.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the features of one direction.
    pub fn add(&mut self, features: &[f64; NUMBER_OF_FEATURES]) {
        for (sum, v) in self.sums.iter_mut().zip(features) {
            *sum += v;
        }
        self.directions += 1;
    }

    /// Number of directions added so far
    #[inline]
    pub fn directions(&self) -> usize {
        self.directions
    }

    /// Mean over the added directions (zero if none were added).
    pub fn finish<R: FeatureScalar>(&self) -> FeatureVector<R> {
        if self.directions == 0 {
            return FeatureVector::zero();
        }
        let n = self.directions as f64;
        FeatureVector::from_f64(self.sums.map(|s| s / n))
    }

    /// Clear the sums for the next voxel.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
