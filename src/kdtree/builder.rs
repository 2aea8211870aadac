use tracing::debug;

use crate::error::{KdIndexError, Result};
use crate::kdtree::node::{Link, Node};
use crate::kdtree::KDTree;
use crate::point::{check_dimensions, Point};

/// A builder to create a balanced [`KDTree`] from a batch of points.
///
/// ```
/// use kd_index::kdtree::KDTreeBuilder;
///
/// let mut builder = KDTreeBuilder::new(3);
/// builder.add([1., 2.]);
/// builder.add([3., 4.]);
/// builder.add([5., 6.]);
/// let tree = builder.finish().unwrap();
/// assert_eq!(tree.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct KDTreeBuilder<P> {
    points: Vec<P>,
}

impl<P> Default for KDTreeBuilder<P> {
    fn default() -> Self {
        Self { points: Vec::new() }
    }
}

impl<P: Point> KDTreeBuilder<P> {
    /// Create a new builder with room for the provided number of items.
    pub fn new(num_items: usize) -> Self {
        Self {
            points: Vec::with_capacity(num_items),
        }
    }

    /// Add a point to the index, returning its insertion index.
    pub fn add(&mut self, point: P) -> usize {
        let index = self.points.len();
        self.points.push(point);
        index
    }

    /// The number of points added so far.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no points were added yet.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consume this builder, performing the median partition and generating a balanced KDTree.
    ///
    /// Fails if the points do not all share the same, non-zero dimensionality.
    pub fn finish(self) -> Result<KDTree<P>> {
        let dims = validate(&self.points)?;
        let num_items = self.points.len();
        let root = build(self.points, 0, dims);
        debug!(num_items, dims, "built balanced k-d tree");
        Ok(KDTree {
            root,
            len: num_items,
        })
    }
}

/// The shared dimensionality of `points`, or `0` when there are none.
pub(crate) fn validate<P: Point>(points: &[P]) -> Result<usize> {
    let Some(first) = points.first() else {
        return Ok(0);
    };
    let dims = first.dimensions();
    if dims == 0 {
        return Err(KdIndexError::ZeroDimensions);
    }
    for point in points.iter().skip(1) {
        check_dimensions(point, dims)?;
    }
    Ok(dims)
}

/// Recursively build a balanced subtree whose root splits on `axis`.
///
/// The points are stable-sorted along `axis` and the element at `len / 2` becomes the node; the
/// halves on either side become its subtrees, split on the next axis.
pub(crate) fn build<P: Point>(mut points: Vec<P>, axis: usize, dims: usize) -> Link<P> {
    match points.len() {
        0 => return None,
        1 => return points.pop().map(|point| Box::new(Node::leaf(point))),
        _ => {}
    }

    points.sort_by(|a, b| a.dimension(axis).total_cmp(&b.dimension(axis)));

    let mid = points.len() / 2;
    let right = points.split_off(mid + 1);
    let point = points.pop()?;
    let next = (axis + 1) % dims;

    Some(Box::new(Node {
        point,
        left: build(points, next, dims),
        right: build(right, next, dims),
    }))
}
