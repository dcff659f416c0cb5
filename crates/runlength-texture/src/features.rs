//! Run-length texture features
//!
//! Ten closed-form reductions of a [`RunLengthHistogram`], after Galloway
//! (1975), Chu et al. (1990) and Dasarathy & Holder (1991). With `H(i, j)`
//! the count of runs of gray bin `i` and length bin `j` (both 1-based),
//! `p_i = Σ_j H(i, j)`, `p_j = Σ_i H(i, j)` and `Nr` the number of runs:
//!
//! | Feature | Value |
//! |---|---|
//! | ShortRunEmphasis | Σ H / j² / Nr |
//! | LongRunEmphasis | Σ H · j² / Nr |
//! | GreyLevelNonuniformity | Σ p_i² / Nr |
//! | RunLengthNonuniformity | Σ p_j² / Nr |
//! | LowGreyLevelRunEmphasis | Σ H / i² / Nr |
//! | HighGreyLevelRunEmphasis | Σ H · i² / Nr |
//! | ShortRunLowGreyLevelEmphasis | Σ H / (i² j²) / Nr |
//! | ShortRunHighGreyLevelEmphasis | Σ H · i² / j² / Nr |
//! | LongRunLowGreyLevelEmphasis | Σ H · j² / i² / Nr |
//! | LongRunHighGreyLevelEmphasis | Σ H · i² · j² / Nr |
//!
//! A histogram without runs yields all zeros.

use crate::histogram::RunLengthHistogram;
use std::fmt;
use std::ops::Index;

/// Number of values in a [`FeatureVector`]
pub const NUMBER_OF_FEATURES: usize = 10;

/// The run-length features, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunLengthFeature {
    ShortRunEmphasis,
    LongRunEmphasis,
    GreyLevelNonuniformity,
    RunLengthNonuniformity,
    LowGreyLevelRunEmphasis,
    HighGreyLevelRunEmphasis,
    ShortRunLowGreyLevelEmphasis,
    ShortRunHighGreyLevelEmphasis,
    LongRunLowGreyLevelEmphasis,
    LongRunHighGreyLevelEmphasis,
}

impl RunLengthFeature {
    /// Every feature, in output order
    pub const ALL: [RunLengthFeature; NUMBER_OF_FEATURES] = [
        RunLengthFeature::ShortRunEmphasis,
        RunLengthFeature::LongRunEmphasis,
        RunLengthFeature::GreyLevelNonuniformity,
        RunLengthFeature::RunLengthNonuniformity,
        RunLengthFeature::LowGreyLevelRunEmphasis,
        RunLengthFeature::HighGreyLevelRunEmphasis,
        RunLengthFeature::ShortRunLowGreyLevelEmphasis,
        RunLengthFeature::ShortRunHighGreyLevelEmphasis,
        RunLengthFeature::LongRunLowGreyLevelEmphasis,
        RunLengthFeature::LongRunHighGreyLevelEmphasis,
    ];

    /// Position in a [`FeatureVector`]
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable name
    pub fn name(self) -> &'static str {
        match self {
            RunLengthFeature::ShortRunEmphasis => "ShortRunEmphasis",
            RunLengthFeature::LongRunEmphasis => "LongRunEmphasis",
            RunLengthFeature::GreyLevelNonuniformity => "GreyLevelNonuniformity",
            RunLengthFeature::RunLengthNonuniformity => "RunLengthNonuniformity",
            RunLengthFeature::LowGreyLevelRunEmphasis => "LowGreyLevelRunEmphasis",
            RunLengthFeature::HighGreyLevelRunEmphasis => "HighGreyLevelRunEmphasis",
            RunLengthFeature::ShortRunLowGreyLevelEmphasis => "ShortRunLowGreyLevelEmphasis",
            RunLengthFeature::ShortRunHighGreyLevelEmphasis => "ShortRunHighGreyLevelEmphasis",
            RunLengthFeature::LongRunLowGreyLevelEmphasis => "LongRunLowGreyLevelEmphasis",
            RunLengthFeature::LongRunHighGreyLevelEmphasis => "LongRunHighGreyLevelEmphasis",
        }
    }
}

impl fmt::Display for RunLengthFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Floating-point element type of the output image.
pub trait FeatureScalar: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Narrow (or pass through) an `f64` feature value.
    fn from_f64(value: f64) -> Self;
    /// Widen to `f64`.
    fn to_f64(self) -> f64;
}

impl FeatureScalar for f32 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl FeatureScalar for f64 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

/// The ten run-length features of one voxel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeatureVector<R> {
    values: [R; NUMBER_OF_FEATURES],
}

impl<R: FeatureScalar> FeatureVector<R> {
    /// All features zero.
    pub fn zero() -> Self {
        FeatureVector {
            values: [R::default(); NUMBER_OF_FEATURES],
        }
    }

    /// Convert `f64` values given in output order.
    pub fn from_f64(values: [f64; NUMBER_OF_FEATURES]) -> Self {
        FeatureVector {
            values: values.map(R::from_f64),
        }
    }

    /// Value of one feature
    #[inline]
    pub fn get(&self, feature: RunLengthFeature) -> R {
        self.values[feature.index()]
    }

    /// Values in output order
    #[inline]
    pub fn as_slice(&self) -> &[R] {
        &self.values
    }

    /// Check whether every feature is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == R::default())
    }
}

impl<R> Index<RunLengthFeature> for FeatureVector<R> {
    type Output = R;

    fn index(&self, feature: RunLengthFeature) -> &R {
        &self.values[feature as usize]
    }
}

/// Reduce one histogram to its ten features, in output order.
pub fn compute_features(hist: &RunLengthHistogram) -> [f64; NUMBER_OF_FEATURES] {
    let mut out = [0.0f64; NUMBER_OF_FEATURES];
    let total = hist.total_runs();
    if total == 0 {
        return out;
    }

    for a in 0..hist.intensity_bins() {
        let i = (a + 1) as f64;
        let i2 = i * i;
        for (b, &count) in hist.row(a).iter().enumerate() {
            if count == 0 {
                continue;
            }
            let h = count as f64;
            let j = (b + 1) as f64;
            let j2 = j * j;

            out[0] += h / j2;
            out[1] += h * j2;
            out[4] += h / i2;
            out[5] += h * i2;
            out[6] += h / (i2 * j2);
            out[7] += h * i2 / j2;
            out[8] += h * j2 / i2;
            out[9] += h * i2 * j2;
        }
    }
    out[2] = sum_of_squares(hist.intensity_marginal());
    out[3] = sum_of_squares(hist.length_marginal());

    let total = total as f64;
    for v in &mut out {
        *v /= total;
    }
    out
}

fn sum_of_squares(marginal: &[u32]) -> f64 {
    marginal
        .iter()
        .map(|&p| {
            let p = p as f64;
            p * p
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_histogram() -> RunLengthHistogram {
        // Runs of [0,0,0,1,1,0,0]: (bin0, len3), (bin1, len2), (bin0, len2)
        let mut hist = RunLengthHistogram::new(2, 7);
        hist.add_run(0, 3);
        hist.add_run(1, 2);
        hist.add_run(0, 2);
        hist
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_zero_runs_yield_zero() {
        let hist = RunLengthHistogram::new(4, 5);
        let f = compute_features(&hist);
        assert!(f.iter().all(|v| *v == 0.0));
        assert!(FeatureVector::<f64>::from_f64(f).is_zero());
    }

    #[test]
    fn test_example_values() {
        let f = compute_features(&example_histogram());
        assert_close(f[0], (1.0 / 9.0 + 0.25 + 0.25) / 3.0);
        assert_close(f[1], 17.0 / 3.0);
        assert_close(f[2], 5.0 / 3.0);
        assert_close(f[3], 5.0 / 3.0);
        assert_close(f[4], 2.25 / 3.0);
        assert_close(f[5], 2.0);
        assert_close(f[6], (1.0 / 9.0 + 0.25 + 1.0 / 16.0) / 3.0);
        assert_close(f[7], (1.0 / 9.0 + 0.25 + 1.0) / 3.0);
        assert_close(f[8], 14.0 / 3.0);
        assert_close(f[9], 29.0 / 3.0);
    }

    #[test]
    fn test_single_run() {
        let mut hist = RunLengthHistogram::new(3, 3);
        hist.add_run(2, 1);
        let f = FeatureVector::<f64>::from_f64(compute_features(&hist));
        assert_close(f[RunLengthFeature::ShortRunEmphasis], 1.0);
        assert_close(f[RunLengthFeature::HighGreyLevelRunEmphasis], 9.0);
        assert_close(f[RunLengthFeature::LowGreyLevelRunEmphasis], 1.0 / 9.0);
        assert_close(f.get(RunLengthFeature::GreyLevelNonuniformity), 1.0);
    }

    #[test]
    fn test_feature_order_and_names() {
        for (k, feature) in RunLengthFeature::ALL.iter().enumerate() {
            assert_eq!(feature.index(), k);
        }
        assert_eq!(RunLengthFeature::ALL[3].name(), "RunLengthNonuniformity");
        assert_eq!(
            RunLengthFeature::LongRunHighGreyLevelEmphasis.to_string(),
            "LongRunHighGreyLevelEmphasis"
        );
    }

    #[test]
    fn test_f32_conversion() {
        let v = FeatureVector::<f32>::from_f64(compute_features(&example_histogram()));
        assert_eq!(v[RunLengthFeature::HighGreyLevelRunEmphasis], 2.0f32);
        assert_eq!(v.as_slice().len(), NUMBER_OF_FEATURES);
    }
}
