//! Run directions
//!
//! A run is walked along an integer [`Offset`]. An offset and its negation
//! describe the same set of runs, so every offset is stored in canonical
//! form: the highest-axis non-zero component is positive. With offsets in
//! canonical form a run is always entered at its lowest voxel in
//! axis-0-fastest scan order, and configuring both `(1, 0)` and `(-1, 0)`
//! yields a single direction.

use crate::{TextureError, TextureResult};

/// A canonical, non-zero direction vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Offset(Vec<isize>);

impl Offset {
    /// Canonicalize `components` into an offset.
    ///
    /// # Errors
    ///
    /// Returns `TextureError::ZeroOffset` if every component is zero
    /// (including the empty vector), and `TextureError::InvalidParameters`
    /// if a component has no negation (`isize::MIN`).
    pub fn new(components: Vec<isize>) -> TextureResult<Self> {
        if components.contains(&isize::MIN) {
            return Err(TextureError::InvalidParameters(format!(
                "offset component out of range: {:?}",
                components
            )));
        }
        let mut components = components;
        match components.iter().rposition(|&c| c != 0) {
            None => Err(TextureError::ZeroOffset(components)),
            Some(k) => {
                if components[k] < 0 {
                    components.iter_mut().for_each(|c| *c = -*c);
                }
                Ok(Offset(components))
            }
        }
    }

    /// Components, one per axis
    #[inline]
    pub fn components(&self) -> &[isize] {
        &self.0
    }

    /// Number of axes
    #[inline]
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    /// Physical length of one step: `‖offset ⊙ spacing‖₂`.
    pub fn step_length(&self, spacing: &[f64]) -> f64 {
        self.0
            .iter()
            .zip(spacing)
            .map(|(&c, &s)| {
                let d = c as f64 * s;
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Signed linear displacement of one step for the given strides, or
    /// `None` if it (or its negation) does not fit an `isize`.
    pub fn linear_delta(&self, strides: &[usize]) -> Option<isize> {
        let delta = self.0.iter().zip(strides).try_fold(0isize, |acc, (&c, &s)| {
            let s = isize::try_from(s).ok()?;
            acc.checked_add(c.checked_mul(s)?)
        })?;
        delta.checked_neg().map(|_| delta)
    }
}

/// An [`Offset`] resolved against one image's layout and spacing.
///
/// Built once per run, before any worker starts, so that a direction
/// whose linear step does not fit the index space is reported as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Direction {
    offset: Offset,
    linear_delta: isize,
    step_length: f64,
}

impl Direction {
    /// Resolve `offset` for an image with the given strides and spacing.
    ///
    /// # Errors
    ///
    /// Returns `TextureError::DimensionMismatch` if the offset has the
    /// wrong number of axes, and `TextureError::InvalidParameters` if its
    /// linear step overflows.
    pub fn resolve(offset: &Offset, strides: &[usize], spacing: &[f64]) -> TextureResult<Self> {
        if offset.dimension() != strides.len() {
            return Err(TextureError::DimensionMismatch {
                what: "offset",
                expected: strides.len(),
                actual: offset.dimension(),
            });
        }
        let linear_delta = offset.linear_delta(strides).ok_or_else(|| {
            TextureError::InvalidParameters(format!(
                "offset {:?} overflows the image index space",
                offset.components()
            ))
        })?;
        Ok(Direction {
            offset: offset.clone(),
            linear_delta,
            step_length: offset.step_length(spacing),
        })
    }

    /// The canonical offset
    #[inline]
    pub fn offset(&self) -> &Offset {
        &self.offset
    }

    /// Offset components, one per axis
    #[inline]
    pub fn components(&self) -> &[isize] {
        self.offset.components()
    }

    /// Linear displacement of one step
    #[inline]
    pub fn linear_delta(&self) -> isize {
        self.linear_delta
    }

    /// Physical length of one step
    #[inline]
    pub fn step_length(&self) -> f64 {
        self.step_length
    }
}

/// Ordered set of distinct canonical offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetSet {
    offsets: Vec<Offset>,
}

impl OffsetSet {
    /// Build a set from raw direction vectors.
    ///
    /// Every vector is canonicalized; vectors that collapse onto an earlier
    /// one are dropped, keeping the first occurrence's position.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, contains a zero vector, or
    /// mixes dimensionalities.
    pub fn from_vectors<I>(vectors: I) -> TextureResult<Self>
    where
        I: IntoIterator<Item = Vec<isize>>,
    {
        let mut offsets: Vec<Offset> = Vec::new();
        for raw in vectors {
            let offset = Offset::new(raw)?;
            if let Some(first) = offsets.first() {
                if first.dimension() != offset.dimension() {
                    return Err(TextureError::DimensionMismatch {
                        what: "offset",
                        expected: first.dimension(),
                        actual: offset.dimension(),
                    });
                }
            }
            if offsets.contains(&offset) {
                log::debug!("dropping duplicate direction {:?}", offset.components());
                continue;
            }
            offsets.push(offset);
        }
        if offsets.is_empty() {
            return Err(TextureError::InvalidParameters(
                "at least one offset is required".into(),
            ));
        }
        Ok(OffsetSet { offsets })
    }

    /// A set holding a single direction.
    pub fn single(components: Vec<isize>) -> TextureResult<Self> {
        Ok(OffsetSet {
            offsets: vec![Offset::new(components)?],
        })
    }

    /// The first half of the 3^N unit neighborhood, canonicalized.
    ///
    /// These are the vectors of {-1, 0, 1}^N that precede the center in
    /// axis-0-fastest order: in 2D `(1,1), (0,1), (-1,1), (1,0)`, and 13
    /// directions in 3D. Every line through a voxel and one of its
    /// neighbors is covered exactly once.
    pub fn half_neighborhood(dimension: usize) -> TextureResult<Self> {
        if dimension == 0 {
            return Err(TextureError::InvalidParameters(
                "offsets need at least one axis".into(),
            ));
        }
        let count = 3usize
            .checked_pow(dimension as u32)
            .ok_or_else(|| TextureError::InvalidParameters(format!("{dimension} axes")))?;
        let vectors = (0..count / 2).map(|mut code| {
            (0..dimension)
                .map(|_| {
                    let c = (code % 3) as isize - 1;
                    code /= 3;
                    c
                })
                .collect::<Vec<isize>>()
        });
        Self::from_vectors(vectors)
    }

    /// The N unit vectors along the image axes.
    pub fn axis_aligned(dimension: usize) -> TextureResult<Self> {
        Self::from_vectors((0..dimension).map(|k| {
            let mut v = vec![0isize; dimension];
            v[k] = 1;
            v
        }))
    }

    /// Number of directions
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Always false: a set holds at least one direction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Number of axes of every offset
    pub fn dimension(&self) -> usize {
        self.offsets.first().map_or(0, Offset::dimension)
    }

    /// Iterate the directions in configuration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Offset> {
        self.offsets.iter()
    }
}

impl<'a> IntoIterator for &'a OffsetSet {
    type Item = &'a Offset;
    type IntoIter = std::slice::Iter<'a, Offset>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_sign() {
        assert_eq!(Offset::new(vec![-1, 0]).unwrap().components(), &[1, 0]);
        assert_eq!(Offset::new(vec![1, -1]).unwrap().components(), &[-1, 1]);
        assert_eq!(Offset::new(vec![-2, 3]).unwrap().components(), &[-2, 3]);
        assert_eq!(Offset::new(vec![0, 0, -1]).unwrap().components(), &[0, 0, 1]);
    }

    #[test]
    fn test_negation_is_same_direction() {
        for v in [vec![1, 2, -3], vec![-1, 0, 0], vec![0, -4, 1]] {
            let neg: Vec<isize> = v.iter().map(|c| -c).collect();
            assert_eq!(Offset::new(v).unwrap(), Offset::new(neg).unwrap());
        }
    }

    #[test]
    fn test_canonicalization_idempotent() {
        let once = Offset::new(vec![3, -1]).unwrap();
        let twice = Offset::new(once.components().to_vec()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_zero_offset_rejected() {
        assert!(matches!(
            Offset::new(vec![0, 0]),
            Err(TextureError::ZeroOffset(_))
        ));
        assert!(Offset::new(vec![]).is_err());
        assert!(OffsetSet::from_vectors([vec![1, 0], vec![0, 0]]).is_err());
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = OffsetSet::from_vectors([vec![1, 0], vec![-1, 0], vec![0, 1]]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().next().unwrap().components(), &[1, 0]);
    }

    #[test]
    fn test_mixed_dimensions_rejected() {
        assert!(matches!(
            OffsetSet::from_vectors([vec![1, 0], vec![1, 0, 0]]),
            Err(TextureError::DimensionMismatch { .. })
        ));
        assert!(OffsetSet::from_vectors(Vec::<Vec<isize>>::new()).is_err());
    }

    #[test]
    fn test_half_neighborhood_2d() {
        let set = OffsetSet::half_neighborhood(2).unwrap();
        let comps: Vec<&[isize]> = set.iter().map(Offset::components).collect();
        assert_eq!(comps, vec![&[1, 1][..], &[0, 1], &[-1, 1], &[1, 0]]);
    }

    #[test]
    fn test_half_neighborhood_sizes() {
        assert_eq!(OffsetSet::half_neighborhood(1).unwrap().len(), 1);
        assert_eq!(OffsetSet::half_neighborhood(3).unwrap().len(), 13);
        assert_eq!(OffsetSet::half_neighborhood(3).unwrap().dimension(), 3);
    }

    #[test]
    fn test_axis_aligned() {
        let set = OffsetSet::axis_aligned(3).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().nth(2).unwrap().components(), &[0, 0, 1]);
    }

    #[test]
    fn test_step_length_and_delta() {
        let o = Offset::new(vec![1, 1]).unwrap();
        assert!((o.step_length(&[3.0, 4.0]) - 5.0).abs() < 1e-12);
        assert_eq!(o.linear_delta(&[1, 10]), Some(11));
        let o = Offset::new(vec![-1, 1]).unwrap();
        assert_eq!(o.linear_delta(&[1, 10]), Some(9));
    }

    #[test]
    fn test_extreme_components_rejected() {
        assert!(matches!(
            Offset::new(vec![isize::MIN]),
            Err(TextureError::InvalidParameters(_))
        ));
        assert!(Offset::new(vec![isize::MAX]).is_ok());

        let o = Offset::new(vec![1, isize::MAX / 2]).unwrap();
        assert_eq!(o.linear_delta(&[1, 4]), None);
        assert!(matches!(
            Direction::resolve(&o, &[1, 4], &[1.0, 1.0]),
            Err(TextureError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_direction_resolve() {
        let o = Offset::new(vec![-1, 1]).unwrap();
        let d = Direction::resolve(&o, &[1, 5], &[2.0, 1.0]).unwrap();
        assert_eq!(d.linear_delta(), 4);
        assert!((d.step_length() - 5f64.sqrt()).abs() < 1e-12);
        assert_eq!(d.components(), &[-1, 1]);
        assert!(Direction::resolve(&o, &[1, 5, 25], &[1.0; 3]).is_err());
    }
}
