//! Run-length texture feature images
//!
//! [`RunLengthTextureFilter`] computes, for every voxel of an integer
//! N-dimensional image, the ten run-length features of the window around
//! it, averaged over a set of directions. An optional mask restricts the
//! voxels that take part in runs.
//!
//! The pipeline per run is:
//!
//! 1. validate the configuration against the image (nothing runs on error)
//! 2. digitize the image once into shared, read-only bins
//! 3. split the output into slabs, one per worker
//! 4. per voxel and direction: window, histogram, features, average
//!
//! # Examples
//!
//! ```
//! use runlength_core::NdImage;
//! use runlength_texture::{FeatureVector, RunLengthFeature, RunLengthTextureFilter};
//!
//! let img = NdImage::from_data(&[7], vec![0u8, 0, 0, 1, 1, 0, 0]).unwrap();
//! let mut filter = RunLengthTextureFilter::<u8>::new();
//! filter.set_uniform_radius(3);
//! filter.set_number_of_bins_per_axis(2).unwrap();
//! filter.set_pixel_value_min_max(0, 1).unwrap();
//! filter.set_offset(vec![1]).unwrap();
//!
//! let out = filter.compute::<f64>(&img, None).unwrap();
//! let center: &FeatureVector<f64> = out.get(&[3]).unwrap();
//! assert!((center[RunLengthFeature::LongRunEmphasis] - 17.0 / 3.0).abs() < 1e-12);
//! ```

use crate::average::DirectionAverager;
use crate::digitize::Digitizer;
use crate::features::{FeatureScalar, FeatureVector, compute_features};
use crate::histogram::{DistanceRange, RunLengthHistogram, accumulate_runs};
use crate::neighborhood::NeighborhoodWindow;
use crate::offset::{Direction, Offset, OffsetSet};
use crate::scheduler::{for_each_slab, worker_count};
use crate::{TextureError, TextureResult};
use runlength_core::{IntegerPixel, NdImage, Region};
use std::fmt;

/// Default number of intensity bins
pub const DEFAULT_BINS_PER_AXIS: usize = 256;

/// Default neighborhood radius on every axis
pub const DEFAULT_RADIUS: usize = 2;

/// Per-axis half-width of the window around each voxel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NeighborhoodRadius {
    /// Same radius on every axis
    Uniform(usize),
    /// One radius per axis
    PerAxis(Vec<usize>),
}

impl NeighborhoodRadius {
    /// Radius for each of `dimension` axes.
    ///
    /// # Errors
    ///
    /// Returns `TextureError::DimensionMismatch` if a per-axis radius has
    /// the wrong length.
    pub fn resolve(&self, dimension: usize) -> TextureResult<Vec<usize>> {
        match self {
            NeighborhoodRadius::Uniform(r) => Ok(vec![*r; dimension]),
            NeighborhoodRadius::PerAxis(v) if v.len() == dimension => Ok(v.clone()),
            NeighborhoodRadius::PerAxis(v) => Err(TextureError::DimensionMismatch {
                what: "neighborhood radius",
                expected: dimension,
                actual: v.len(),
            }),
        }
    }
}

impl Default for NeighborhoodRadius {
    fn default() -> Self {
        NeighborhoodRadius::Uniform(DEFAULT_RADIUS)
    }
}

/// Configuration and entry point of the run-length texture computation.
///
/// Every setter validates its input; [`compute`](Self::compute) checks the
/// configuration against the image before any work is dispatched.
#[derive(Debug, Clone)]
pub struct RunLengthTextureFilter<P> {
    radius: NeighborhoodRadius,
    /// `None` selects the half unit neighborhood of the image's dimension
    offsets: Option<OffsetSet>,
    bins: usize,
    min: P,
    max: P,
    distance: DistanceRange,
    inside: P,
    workers: Option<usize>,
}

impl<P: IntegerPixel> Default for RunLengthTextureFilter<P> {
    fn default() -> Self {
        RunLengthTextureFilter {
            radius: NeighborhoodRadius::default(),
            offsets: None,
            bins: DEFAULT_BINS_PER_AXIS,
            min: P::MIN_VALUE,
            max: P::MAX_VALUE,
            distance: DistanceRange::default(),
            inside: P::ONE,
            workers: None,
        }
    }
}

impl<P: IntegerPixel> RunLengthTextureFilter<P> {
    /// Create a filter with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one radius per axis.
    pub fn set_neighborhood_radius(&mut self, radius: &[usize]) {
        self.radius = NeighborhoodRadius::PerAxis(radius.to_vec());
    }

    /// Set the same radius on every axis.
    pub fn set_uniform_radius(&mut self, radius: usize) {
        self.radius = NeighborhoodRadius::Uniform(radius);
    }

    /// Neighborhood radius
    pub fn neighborhood_radius(&self) -> &NeighborhoodRadius {
        &self.radius
    }

    /// Use a single direction, replacing any previous offsets.
    ///
    /// # Errors
    ///
    /// Returns `TextureError::ZeroOffset` for the zero vector and
    /// `TextureError::InvalidParameters` for a component of `isize::MIN`;
    /// the previous offsets are kept in both cases.
    pub fn set_offset(&mut self, offset: Vec<isize>) -> TextureResult<()> {
        self.offsets = Some(OffsetSet::single(offset)?);
        Ok(())
    }

    /// Use a list of directions, replacing any previous offsets.
    ///
    /// Directions that are negations of each other count once.
    pub fn set_offsets<I>(&mut self, offsets: I) -> TextureResult<()>
    where
        I: IntoIterator<Item = Vec<isize>>,
    {
        self.offsets = Some(OffsetSet::from_vectors(offsets)?);
        Ok(())
    }

    /// Configured offsets, or `None` for the per-dimension default.
    pub fn offsets(&self) -> Option<&OffsetSet> {
        self.offsets.as_ref()
    }

    /// Set the number of intensity bins.
    ///
    /// # Errors
    ///
    /// Returns an error if `bins` is 0 or does not fit a bin index.
    pub fn set_number_of_bins_per_axis(&mut self, bins: usize) -> TextureResult<()> {
        if bins == 0 || bins >= u32::MAX as usize {
            return Err(TextureError::InvalidParameters(format!(
                "number of bins per axis must be in [1, {}), got {}",
                u32::MAX,
                bins
            )));
        }
        self.bins = bins;
        Ok(())
    }

    /// Number of intensity bins
    pub fn number_of_bins_per_axis(&self) -> usize {
        self.bins
    }

    /// Set the inclusive intensity range that is digitized.
    pub fn set_pixel_value_min_max(&mut self, min: P, max: P) -> TextureResult<()> {
        if min > max {
            return Err(TextureError::InvalidRange {
                name: "pixel value",
                min: min.to_f64(),
                max: max.to_f64(),
            });
        }
        self.min = min;
        self.max = max;
        Ok(())
    }

    /// Lowest digitized intensity
    pub fn min(&self) -> P {
        self.min
    }

    /// Highest digitized intensity
    pub fn max(&self) -> P {
        self.max
    }

    /// Set the inclusive range of accepted physical run lengths.
    pub fn set_distance_value_min_max(&mut self, min: f64, max: f64) -> TextureResult<()> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(TextureError::InvalidRange {
                name: "distance",
                min,
                max,
            });
        }
        self.distance = DistanceRange { min, max };
        Ok(())
    }

    /// Shortest accepted run distance
    pub fn min_distance(&self) -> f64 {
        self.distance.min
    }

    /// Longest accepted run distance
    pub fn max_distance(&self) -> f64 {
        self.distance.max
    }

    /// Set the mask value that marks voxels as inside.
    pub fn set_inside_pixel_value(&mut self, inside: P) {
        self.inside = inside;
    }

    /// Mask value that marks voxels as inside
    pub fn inside_pixel_value(&self) -> P {
        self.inside
    }

    /// Fix the number of worker threads.
    ///
    /// # Errors
    ///
    /// Returns an error if `workers` is 0.
    pub fn set_number_of_workers(&mut self, workers: usize) -> TextureResult<()> {
        if workers == 0 {
            return Err(TextureError::InvalidParameters(
                "number of workers must be >= 1".into(),
            ));
        }
        self.workers = Some(workers);
        Ok(())
    }

    /// Configured worker count, `None` for the available parallelism.
    pub fn number_of_workers(&self) -> Option<usize> {
        self.workers
    }

    /// Compute the feature image of `image`, optionally restricted to the
    /// voxels of `mask` equal to the inside value.
    ///
    /// The output has the size and spacing of `image`. Voxels outside the
    /// mask, and voxels whose windows contain no accepted run, hold the
    /// zero vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the offsets or radius do not match the image
    /// dimensionality, if the mask geometry differs from the image, or if
    /// the worker pool cannot be created. No output is produced on error.
    pub fn compute<R: FeatureScalar>(
        &self,
        image: &NdImage<P>,
        mask: Option<&NdImage<P>>,
    ) -> TextureResult<NdImage<FeatureVector<R>>> {
        let dimension = image.dimension();
        let radius = self.radius.resolve(dimension)?;
        let offsets = match &self.offsets {
            Some(set) => set.clone(),
            None => OffsetSet::half_neighborhood(dimension)?,
        };
        if offsets.dimension() != dimension {
            return Err(TextureError::DimensionMismatch {
                what: "offset",
                expected: dimension,
                actual: offsets.dimension(),
            });
        }
        if let Some(mask) = mask {
            if !image.same_geometry(mask) {
                return Err(TextureError::MaskGeometry {
                    image: image.size().to_vec(),
                    mask: mask.size().to_vec(),
                });
            }
        }
        let workers = worker_count(self.workers);

        log::info!(
            "run-length features: {} voxels {:?}, {} directions, {} workers",
            image.len(),
            image.size(),
            offsets.len(),
            workers
        );
        log::debug!("{}", self);

        let digitizer = Digitizer::new(self.min, self.max, self.bins as u32);
        let digitized = digitizer.digitize(image, mask.map(|m| (m, self.inside)));

        let directions = offsets
            .iter()
            .map(|o| Direction::resolve(o, image.strides(), image.spacing()))
            .collect::<TextureResult<Vec<_>>>()?;
        let length_bins = radius
            .iter()
            .zip(image.size())
            .map(|(r, s)| r.saturating_mul(2).saturating_add(1).min(*s))
            .max()
            .unwrap_or(1);

        let kernel = VoxelKernel {
            digitized: &digitized,
            mask,
            inside: self.inside,
            radius: &radius,
            directions: &directions,
            distance: self.distance,
            bins: self.bins,
            length_bins,
        };

        let mut output = image.new_like(FeatureVector::<R>::zero());
        for_each_slab(&mut output, workers, |slab, block| kernel.slab(slab, block))?;

        log::info!("run-length features completed");
        Ok(output)
    }
}

impl<P: IntegerPixel> fmt::Display for RunLengthTextureFilter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RunLengthTextureFilter")?;
        writeln!(f, "  NeighborhoodRadius: {:?}", self.radius)?;
        match &self.offsets {
            Some(set) => {
                let list: Vec<&[isize]> = set.iter().map(Offset::components).collect();
                writeln!(f, "  Offsets: {:?}", list)?;
            }
            None => writeln!(f, "  Offsets: half unit neighborhood")?,
        }
        writeln!(f, "  NumberOfBinsPerAxis: {}", self.bins)?;
        writeln!(f, "  Min: {:?}", self.min)?;
        writeln!(f, "  Max: {:?}", self.max)?;
        writeln!(f, "  MinDistance: {}", self.distance.min)?;
        writeln!(f, "  MaxDistance: {}", self.distance.max)?;
        writeln!(f, "  InsidePixelValue: {:?}", self.inside)?;
        match self.workers {
            Some(n) => write!(f, "  NumberOfWorkers: {}", n),
            None => write!(f, "  NumberOfWorkers: auto"),
        }
    }
}

/// Shared read-only state of one run, used by every worker.
struct VoxelKernel<'a, P> {
    digitized: &'a NdImage<u32>,
    mask: Option<&'a NdImage<P>>,
    inside: P,
    radius: &'a [usize],
    directions: &'a [Direction],
    distance: DistanceRange,
    bins: usize,
    length_bins: usize,
}

impl<P: IntegerPixel> VoxelKernel<'_, P> {
    /// Fill the output block of one slab. The histogram and averager are
    /// reused across the slab's voxels.
    fn slab<R: FeatureScalar>(
        &self,
        slab: &Region,
        block: &mut [FeatureVector<R>],
    ) -> TextureResult<()> {
        let mut hist = RunLengthHistogram::new(self.bins, self.length_bins);
        let mut average = DirectionAverager::new();
        for (center, dst) in slab.iter().zip(block.iter_mut()) {
            *dst = self.voxel(&center, &mut hist, &mut average)?;
        }
        Ok(())
    }

    fn voxel<R: FeatureScalar>(
        &self,
        center: &[usize],
        hist: &mut RunLengthHistogram,
        average: &mut DirectionAverager,
    ) -> TextureResult<FeatureVector<R>> {
        if let Some(mask) = self.mask {
            let inside = mask.get(center).ok_or_else(|| {
                TextureError::Internal(format!("voxel {:?} outside mask", center))
            })?;
            if *inside != self.inside {
                return Ok(FeatureVector::zero());
            }
        }

        let window = NeighborhoodWindow::new(self.digitized, center, self.radius)?;
        average.reset();
        for direction in self.directions {
            hist.clear();
            accumulate_runs(&window, direction, self.distance, hist);
            average.add(&compute_features(hist));
        }
        Ok(average.finish())
    }
}
