//! Axis-aligned query ranges.

use geo_traits::{CoordTrait, RectTrait};

use crate::error::{KdIndexError, Result};
use crate::point::Point;

/// An axis-aligned range in k-dimensional space, stored as one `(min, max)` pair per dimension.
///
/// Bounds are inclusive. No ordering between `min` and `max` is enforced: a pair with
/// `min > max` simply matches nothing along that axis.
#[derive(Debug, Clone, PartialEq)]
pub struct KdRange {
    bounds: Vec<(f64, f64)>,
}

impl KdRange {
    /// Create a new range from a sequence of min/max limits.
    ///
    /// For example a 2-dimensional rectangle of width 2 and height 3 starting at `(1, 2)`:
    ///
    /// ```
    /// use kd_index::KdRange;
    ///
    /// // x (dim 0): 1 <= x <= 3
    /// // y (dim 1): 2 <= y <= 5
    /// let range = KdRange::new(&[1., 3., 2., 5.]).unwrap();
    /// assert_eq!(range.bounds(), &[(1., 3.), (2., 5.)]);
    /// ```
    ///
    /// Returns [`KdIndexError::InvalidRange`] if `limits` is empty or has an odd length.
    pub fn new(limits: &[f64]) -> Result<Self> {
        if limits.is_empty() || limits.len() % 2 != 0 {
            return Err(KdIndexError::InvalidRange(limits.len()));
        }
        let bounds = limits.chunks_exact(2).map(|c| (c[0], c[1])).collect();
        Ok(Self { bounds })
    }

    /// Create a new range from explicit `(min, max)` pairs.
    pub fn from_bounds(bounds: Vec<(f64, f64)>) -> Self {
        Self { bounds }
    }

    /// Create a 2-dimensional range covering the given rectangle.
    pub fn from_rect(rect: &impl RectTrait<T = f64>) -> Self {
        let min = rect.min();
        let max = rect.max();
        Self {
            bounds: vec![(min.x(), max.x()), (min.y(), max.y())],
        }
    }

    /// The number of dimensions covered by this range.
    pub fn dimensions(&self) -> usize {
        self.bounds.len()
    }

    /// The `(min, max)` pairs of this range, one per dimension.
    pub fn bounds(&self) -> &[(f64, f64)] {
        &self.bounds
    }

    /// The lower bound along `axis`.
    #[inline]
    pub fn min(&self, axis: usize) -> f64 {
        self.bounds[axis].0
    }

    /// The upper bound along `axis`.
    #[inline]
    pub fn max(&self, axis: usize) -> f64 {
        self.bounds[axis].1
    }

    /// Returns `true` if `point` lies inside this range on every dimension.
    ///
    /// Points of another dimensionality are never contained.
    pub fn contains<P: Point + ?Sized>(&self, point: &P) -> bool {
        point.dimensions() == self.dimensions()
            && self.bounds.iter().enumerate().all(|(i, &(min, max))| {
                let v = point.dimension(i);
                min <= v && v <= max
            })
    }
}

#[cfg(test)]
mod test {
    use geo_0_31::{coord, Rect};

    use super::*;

    #[test]
    fn new_pairs_limits() {
        let range = KdRange::new(&[1., 3., 2., 5.]).unwrap();
        assert_eq!(range.dimensions(), 2);
        assert_eq!(range.min(0), 1.);
        assert_eq!(range.max(0), 3.);
        assert_eq!(range.min(1), 2.);
        assert_eq!(range.max(1), 5.);
    }

    #[test]
    fn new_rejects_odd_and_empty_limits() {
        assert_eq!(KdRange::new(&[]), Err(KdIndexError::InvalidRange(0)));
        assert_eq!(
            KdRange::new(&[1., 2., 3.]),
            Err(KdIndexError::InvalidRange(3))
        );
    }

    #[test]
    fn contains_is_inclusive() {
        let range = KdRange::new(&[0., 1., 0., 1.]).unwrap();
        assert!(range.contains(&[0., 0.]));
        assert!(range.contains(&[1., 1.]));
        assert!(range.contains(&[0.5, 0.25]));
        assert!(!range.contains(&[1.5, 0.5]));
        assert!(!range.contains(&[0.5, 0.5, 0.5]));
    }

    #[test]
    fn inverted_bounds_match_nothing() {
        let range = KdRange::from_bounds(vec![(2., 1.), (0., 10.)]);
        assert!(!range.contains(&[1.5, 5.]));
    }

    #[test]
    fn from_rect() {
        let rect = Rect::new(coord! { x: 1., y: 2. }, coord! { x: 3., y: 5. });
        let range = KdRange::from_rect(&rect);
        assert_eq!(range, KdRange::new(&[1., 3., 2., 5.]).unwrap());
    }
}
