//! Read-only queries over a [`KDTree`].

use tinyvec::TinyVec;

use crate::kdtree::node::Node;
use crate::kdtree::KDTree;
use crate::point::{distance, Point};
use crate::queue::{BoundedPriorityQueue, SizeLimit};
use crate::range::KdRange;

impl<P: Point> KDTree<P> {
    /// The `k` nearest neighbors of `point`, sorted by Euclidean distance, nearest first.
    ///
    /// Returns fewer than `k` points if the tree holds fewer, and none at all if the tree is
    /// empty, `k == 0`, or `point` has another dimensionality than the tree.
    ///
    /// Points whose distance to `point` is `NaN`, because either has a `NaN` coordinate, are
    /// never returned.
    pub fn knn<Q: Point + ?Sized>(&self, point: &Q, k: usize) -> Vec<&P> {
        let dims = self.dimensions();
        let k = k.min(self.len);
        if k == 0 || dims == 0 || point.dimensions() != dims {
            return vec![];
        }

        let mut nearest = BoundedPriorityQueue::with_limit(SizeLimit::KeepLowest(k));
        knn_from(self.root(), 0, point, k, dims, &mut nearest);

        let mut points = Vec::with_capacity(nearest.len());
        while let Some(node) = nearest.pop_lowest() {
            points.push(&node.point);
        }
        points
    }

    /// The point nearest to `point`, or `None` under the same conditions as [`KDTree::knn`].
    pub fn nearest<Q: Point + ?Sized>(&self, point: &Q) -> Option<&P> {
        self.knn(point, 1).into_iter().next()
    }

    /// All points lying inside `range`, bounds inclusive, in no particular order.
    ///
    /// Returns an empty vector if the tree is empty or the range's dimensionality differs from
    /// the tree's.
    pub fn range_search(&self, range: &KdRange) -> Vec<&P> {
        let dims = self.dimensions();
        if dims == 0 || range.dimensions() != dims {
            return vec![];
        }

        let mut stack: TinyVec<[(Option<&Node<P>>, usize); 32]> = TinyVec::new();
        stack.push((self.root(), 0));

        let mut result = vec![];

        while let Some((Some(node), axis)) = stack.pop() {
            if range.contains(&node.point) {
                result.push(&node.point);
            }

            // only descend into halves that can intersect the range along this axis
            let value = node.point.dimension(axis);
            let next = (axis + 1) % dims;
            if let Some(right) = node.right() {
                if value <= range.max(axis) {
                    stack.push((Some(right), next));
                }
            }
            if let Some(left) = node.left() {
                if value >= range.min(axis) {
                    stack.push((Some(left), next));
                }
            }
        }

        result
    }

    /// All points within Euclidean distance `radius` of `point`, in no particular order.
    ///
    /// Returns an empty vector if the tree is empty, `point` has another dimensionality than the
    /// tree, or `radius` is negative or `NaN`.
    pub fn within<Q: Point + ?Sized>(&self, point: &Q, radius: f64) -> Vec<&P> {
        let dims = self.dimensions();
        if dims == 0 || point.dimensions() != dims || !(radius >= 0.) {
            return vec![];
        }

        let mut stack: TinyVec<[(Option<&Node<P>>, usize); 32]> = TinyVec::new();
        stack.push((self.root(), 0));

        let mut result = vec![];

        while let Some((Some(node), axis)) = stack.pop() {
            if distance(&node.point, point, dims) <= radius {
                result.push(&node.point);
            }

            let value = node.point.dimension(axis);
            let q = point.dimension(axis);
            let next = (axis + 1) % dims;
            if let Some(right) = node.right() {
                if q + radius >= value {
                    stack.push((Some(right), next));
                }
            }
            if let Some(left) = node.left() {
                if q - radius <= value {
                    stack.push((Some(left), next));
                }
            }
        }

        result
    }
}

/// The distance of the `k`-th nearest point found so far, if `k` points were found.
#[inline]
fn kth_distance<T>(nearest: &BoundedPriorityQueue<T>, k: usize) -> Option<f64> {
    nearest.get(k - 1).map(|(_, priority)| priority)
}

/// Search the subtree rooted at `start`, whose split axis is `axis`, feeding candidates into
/// the shared `nearest` queue.
fn knn_from<'a, P: Point, Q: Point + ?Sized>(
    start: Option<&'a Node<P>>,
    mut axis: usize,
    point: &Q,
    k: usize,
    dims: usize,
    nearest: &mut BoundedPriorityQueue<&'a Node<P>>,
) {
    // 1. move down to a leaf, recording the path
    let mut path: TinyVec<[Option<&'a Node<P>>; 32]> = TinyVec::new();
    let mut current = start;
    while let Some(node) = current {
        path.push(Some(node));
        current = if point.dimension(axis) < node.point.dimension(axis) {
            node.left()
        } else {
            node.right()
        };
        axis = (axis + 1) % dims;
    }

    // 2. move back up, checking each node and the far side of its splitting plane
    while let Some(Some(node)) = path.pop() {
        axis = (axis + dims - 1) % dims;

        let node_distance = distance(&node.point, point, dims);
        let closer = match kth_distance(nearest, k) {
            Some(worst) => node_distance < worst,
            None => !node_distance.is_nan(),
        };
        if closer {
            nearest.insert(node, node_distance);
        }

        // a NaN split value gives no bound on the far side, so it is always searched
        let value = node.point.dimension(axis);
        let plane_distance = (value - point.dimension(axis)).abs();
        let crosses = match kth_distance(nearest, k) {
            Some(worst) => !(plane_distance >= worst),
            None => true,
        };
        if crosses {
            let other = if point.dimension(axis) < value {
                node.right()
            } else {
                node.left()
            };
            knn_from(other, (axis + 1) % dims, point, k, dims, nearest);
        }
    }
}
