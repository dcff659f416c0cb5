//! Integer intensity types
//!
//! Run-length statistics are only defined over discrete intensities, so
//! scalar images handed to the texture engine are restricted to the
//! primitive integer types through [`IntegerPixel`].

use std::fmt::Debug;

/// A primitive integer intensity usable as a scalar image element.
pub trait IntegerPixel: Copy + PartialOrd + Debug + Send + Sync + 'static {
    /// Lowest representable intensity
    const MIN_VALUE: Self;
    /// Highest representable intensity
    const MAX_VALUE: Self;
    /// The value `1`, the conventional "inside" label of a mask
    const ONE: Self;

    /// Widen to `f64` for digitization arithmetic.
    ///
    /// 64-bit values beyond 2^53 lose precision; bin boundaries are still
    /// monotonic in the input.
    fn to_f64(self) -> f64;
}

macro_rules! impl_integer_pixel {
    ($($t:ty),*) => {
        $(
            impl IntegerPixel for $t {
                const MIN_VALUE: Self = <$t>::MIN;
                const MAX_VALUE: Self = <$t>::MAX;
                const ONE: Self = 1;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_integer_pixel!(u8, i8, u16, i16, u32, i32, u64, i64);
