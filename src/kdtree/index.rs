use std::fmt;

use tracing::{debug, trace};

use crate::error::{KdIndexError, Result};
use crate::kdtree::builder::{build, validate};
use crate::kdtree::node::{Link, Node};
use crate::kdtree::KDTreeBuilder;
use crate::point::{check_dimensions, Point};

/// A mutable k-d tree over points of any fixed dimensionality.
///
/// Construction via [`KDTree::new`] or [`KDTreeBuilder`] produces a balanced tree. Insertions
/// and removals keep the k-d ordering but do not rebalance; call [`KDTree::balance`] after many
/// mutations to restore `O(log n)` depth.
///
/// ```
/// use kd_index::kdtree::KDTree;
/// use kd_index::KdRange;
///
/// let mut tree = KDTree::new(vec![[1., 3.], [5., 4.], [9., 9.]]).unwrap();
/// tree.insert([8., 5.]).unwrap();
///
/// assert_eq!(tree.knn(&[9., 4.], 2), vec![&[8., 5.], &[5., 4.]]);
///
/// let range = KdRange::new(&[0., 6., 0., 6.]).unwrap();
/// assert_eq!(tree.range_search(&range).len(), 2);
///
/// assert_eq!(tree.remove(&[5., 4.]), Some([5., 4.]));
/// assert_eq!(tree.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct KDTree<P> {
    pub(crate) root: Link<P>,
    pub(crate) len: usize,
}

impl<P> Default for KDTree<P> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<P> KDTree<P> {
    /// The root node of the tree for manual traversal, or `None` if the tree is empty.
    pub fn root(&self) -> Option<&Node<P>> {
        self.root.as_deref()
    }

    /// The number of points in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// All points in the tree, traversed in-order (left, self, right).
    pub fn points(&self) -> Vec<&P> {
        let mut points = Vec::with_capacity(self.len);
        if let Some(root) = self.root.as_deref() {
            root.collect_in_order(&mut points);
        }
        points
    }

    /// Consume the tree, returning its points in the same order as [`KDTree::points`].
    pub fn into_points(mut self) -> Vec<P> {
        let mut points = Vec::with_capacity(self.len);
        if let Some(root) = self.root.take() {
            (*root).drain_in_order(&mut points);
        }
        points
    }
}

// Unbalanced trees can be as deep as they are long, so nodes are freed through an explicit stack.
impl<P> Drop for KDTree<P> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<P>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<P: Point> KDTree<P> {
    /// Create a balanced tree from the given points.
    ///
    /// Fails if the points do not all share the same, non-zero dimensionality.
    pub fn new(points: Vec<P>) -> Result<Self> {
        let mut builder = KDTreeBuilder::new(points.len());
        for point in points {
            builder.add(point);
        }
        builder.finish()
    }

    /// The dimensionality of the stored points, or `0` if the tree is empty.
    pub fn dimensions(&self) -> usize {
        self.root
            .as_deref()
            .map_or(0, |root| root.point.dimensions())
    }

    /// Add a point to the tree.
    ///
    /// The point descends from the root, going left when strictly smaller along the current
    /// axis and right otherwise, and becomes a new leaf. No rebalancing is performed.
    ///
    /// Fails without modifying the tree if the point's dimensionality differs from the tree's.
    pub fn insert(&mut self, point: P) -> Result<()> {
        match self.root.as_deref_mut() {
            None => {
                if point.dimensions() == 0 {
                    return Err(KdIndexError::ZeroDimensions);
                }
                self.root = Some(Box::new(Node::leaf(point)));
            }
            Some(root) => {
                let dims = root.point.dimensions();
                check_dimensions(&point, dims)?;
                root.insert(point, 0, dims);
            }
        }
        self.len += 1;
        trace!(len = self.len, "inserted point");
        Ok(())
    }

    /// Remove and return the first point that equals `point` in all dimensions.
    ///
    /// Returns `None` if the tree is empty, no such point exists, or `point` has another
    /// dimensionality than the tree.
    pub fn remove<Q: Point + ?Sized>(&mut self, point: &Q) -> Option<P> {
        let dims = self.dimensions();
        if dims == 0 || point.dimensions() != dims {
            return None;
        }
        let removed = Node::remove(&mut self.root, point, 0, dims);
        if removed.is_some() {
            self.len -= 1;
            trace!(len = self.len, "removed point");
        } else {
            trace!("point to remove not found");
        }
        removed
    }

    /// Rebalance the tree by rebuilding it from all of its points.
    pub fn balance(&mut self) {
        let dims = self.dimensions();
        let points = std::mem::take(self).into_points();
        let len = points.len();
        debug_assert_eq!(validate(&points), Ok(dims));
        self.root = build(points, 0, dims);
        self.len = len;
        debug!(len, dims, "rebalanced k-d tree");
    }
}

impl<P: fmt::Display> fmt::Display for KDTree<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        Node::fmt_link(self.root(), f)?;
        write!(f, "]")
    }
}
