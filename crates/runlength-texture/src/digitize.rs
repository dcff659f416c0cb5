//! Intensity digitization
//!
//! Maps every input intensity to one of `bins` equally wide bins over the
//! inclusive range `[min, max]`. Voxels outside the range, and voxels
//! outside the mask when one is given, are marked [`EXCLUDED`]: they never
//! start or extend a run.
//!
//! The digitized image is built once per run and shared read-only by all
//! workers.

use runlength_core::{IntegerPixel, NdImage};

/// Sentinel bin for voxels that take no part in any run.
pub const EXCLUDED: u32 = u32::MAX;

/// Parameters of the intensity-to-bin mapping.
#[derive(Debug, Clone, Copy)]
pub struct Digitizer<P> {
    min: P,
    max: P,
    bins: u32,
}

impl<P: IntegerPixel> Digitizer<P> {
    /// Create a digitizer. Callers have already checked `min <= max` and
    /// `bins >= 1`.
    pub fn new(min: P, max: P, bins: u32) -> Self {
        Digitizer { min, max, bins }
    }

    /// Bin of one intensity, or [`EXCLUDED`] if outside `[min, max]`.
    ///
    /// `bin = floor((v - min) / (max - min) * bins)`, with `max` itself
    /// folded into the last bin.
    #[inline]
    pub fn bin(&self, value: P) -> u32 {
        if value < self.min || value > self.max {
            return EXCLUDED;
        }
        let lo = self.min.to_f64();
        let range = self.max.to_f64() - lo;
        if range <= 0.0 {
            return 0;
        }
        let scaled = ((value.to_f64() - lo) / range * self.bins as f64).floor();
        (scaled as u32).min(self.bins - 1)
    }

    /// Digitize a whole image, excluding voxels whose mask value is not
    /// `inside`. The mask must have the image's geometry.
    pub fn digitize(
        &self,
        image: &NdImage<P>,
        mask: Option<(&NdImage<P>, P)>,
    ) -> NdImage<u32> {
        match mask {
            None => image.map(|&v| self.bin(v)),
            Some((mask, inside)) => {
                let mut out = image.new_like(EXCLUDED);
                for ((dst, &v), &m) in out
                    .data_mut()
                    .iter_mut()
                    .zip(image.data())
                    .zip(mask.data())
                {
                    if m == inside {
                        *dst = self.bin(v);
                    }
                }
                out
            }
        }
    }
}
