//! The point abstraction stored in and queried against a [`KDTree`][crate::kdtree::KDTree].

use std::fmt;

use num_traits::ToPrimitive;

use crate::error::{KdIndexError, Result};

/// A value with a fixed number of numeric coordinates.
///
/// All points stored in one tree must report the same [`dimensions`][Point::dimensions]. The tree
/// only ever reads coordinates through these two methods and never mutates a point.
pub trait Point {
    /// The total number of dimensions.
    fn dimensions(&self) -> usize;

    /// The value of the `i`-th dimension, for `0 <= i < self.dimensions()`.
    fn dimension(&self, i: usize) -> f64;

    /// Returns `true` if both points have the same dimensionality and are equal on every axis.
    ///
    /// Equality is exact floating point equality, so `NaN` coordinates never coincide.
    fn coincides<Q: Point + ?Sized>(&self, other: &Q) -> bool {
        self.dimensions() == other.dimensions()
            && (0..self.dimensions()).all(|i| self.dimension(i) == other.dimension(i))
    }

    /// Copy the coordinates of this point out into a vector.
    fn coordinates(&self) -> Vec<f64> {
        (0..self.dimensions()).map(|i| self.dimension(i)).collect()
    }
}

impl<T: Point + ?Sized> Point for &T {
    #[inline]
    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    #[inline]
    fn dimension(&self, i: usize) -> f64 {
        (**self).dimension(i)
    }
}

impl<T: Point + ?Sized> Point for Box<T> {
    #[inline]
    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    #[inline]
    fn dimension(&self, i: usize) -> f64 {
        (**self).dimension(i)
    }
}

// Coordinates that cannot be represented as f64 read as NaN, which never matches a query.
impl<N: ToPrimitive + Copy, const D: usize> Point for [N; D] {
    #[inline]
    fn dimensions(&self) -> usize {
        D
    }

    #[inline]
    fn dimension(&self, i: usize) -> f64 {
        self[i].to_f64().unwrap_or(f64::NAN)
    }
}

impl Point for [f64] {
    #[inline]
    fn dimensions(&self) -> usize {
        self.len()
    }

    #[inline]
    fn dimension(&self, i: usize) -> f64 {
        self[i]
    }
}

impl Point for Vec<f64> {
    #[inline]
    fn dimensions(&self) -> usize {
        self.len()
    }

    #[inline]
    fn dimension(&self, i: usize) -> f64 {
        self[i]
    }
}

/// A point carrying an arbitrary payload next to its coordinates.
///
/// Only the coordinates take part in the index; the payload is handed back untouched by queries.
///
/// ```
/// use kd_index::DataPoint;
/// use kd_index::kdtree::KDTree;
///
/// let tree = KDTree::new(vec![
///     DataPoint::new(vec![0., 0.], "origin"),
///     DataPoint::new(vec![5., 5.], "far"),
/// ])
/// .unwrap();
/// let nearest = tree.nearest(&[1., 1.]).unwrap();
/// assert_eq!(nearest.data, "origin");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint<T> {
    /// The coordinates of this point, one per dimension.
    pub coordinates: Vec<f64>,
    /// The payload attached to this point.
    pub data: T,
}

impl<T> DataPoint<T> {
    /// Create a new point at the given coordinates holding the given data.
    pub fn new(coordinates: Vec<f64>, data: T) -> Self {
        Self { coordinates, data }
    }
}

impl<T> Point for DataPoint<T> {
    #[inline]
    fn dimensions(&self) -> usize {
        self.coordinates.len()
    }

    #[inline]
    fn dimension(&self, i: usize) -> f64 {
        self.coordinates[i]
    }
}

impl<T: fmt::Debug> fmt::Display for DataPoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{:?} {:?}}}", self.coordinates, self.data)
    }
}

/// Check that `point` can live in a tree whose points have `expected` dimensions.
pub(crate) fn check_dimensions<P: Point + ?Sized>(point: &P, expected: usize) -> Result<()> {
    let found = point.dimensions();
    if found == 0 {
        return Err(KdIndexError::ZeroDimensions);
    }
    if found != expected {
        return Err(KdIndexError::DimensionMismatch { expected, found });
    }
    Ok(())
}

/// Euclidean distance between two points over their first `dims` axes.
#[inline]
pub(crate) fn distance<A: Point + ?Sized, B: Point + ?Sized>(a: &A, b: &B, dims: usize) -> f64 {
    (0..dims)
        .map(|i| {
            let d = a.dimension(i) - b.dimension(i);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}
