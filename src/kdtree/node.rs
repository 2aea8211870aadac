//! Owned tree nodes and the recursive algorithms that mutate them.

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::point::Point;

/// An owned child slot: either empty or holding a boxed subtree.
pub(crate) type Link<P> = Option<Box<Node<P>>>;

/// A node in the [`KDTree`][crate::kdtree::KDTree], owning one point and up to two subtrees.
///
/// For a node at depth `d` in a tree of `D`-dimensional points, the split axis is `d % D`: every
/// point in the left subtree is `<=` this node's point along that axis, and every point in the
/// right subtree is `>=`.
#[derive(Debug, Clone)]
pub struct Node<P> {
    pub(crate) point: P,
    pub(crate) left: Link<P>,
    pub(crate) right: Link<P>,
}

/// Which extreme of a subtree to look for along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extreme {
    Min,
    Max,
}

impl<P> Node<P> {
    pub(crate) fn leaf(point: P) -> Self {
        Self {
            point,
            left: None,
            right: None,
        }
    }

    /// The point stored at this node.
    pub fn point(&self) -> &P {
        &self.point
    }

    /// The subtree holding points that sort before this one along the split axis.
    pub fn left(&self) -> Option<&Node<P>> {
        self.left.as_deref()
    }

    /// The subtree holding points that sort at or after this one along the split axis.
    pub fn right(&self) -> Option<&Node<P>> {
        self.right.as_deref()
    }

    /// Returns `true` if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Push references to all points of this subtree, in order, onto `out`.
    pub(crate) fn collect_in_order<'a>(&'a self, out: &mut Vec<&'a P>) {
        let mut stack = vec![];
        let mut current = Some(self);
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left();
            }
            match stack.pop() {
                Some(node) => {
                    out.push(&node.point);
                    current = node.right();
                }
                None => return,
            }
        }
    }

    /// Move all points of this subtree, in order, into `out`.
    pub(crate) fn drain_in_order(self, out: &mut Vec<P>) {
        let mut stack = vec![];
        let mut current = Some(self);
        loop {
            while let Some(mut node) = current {
                current = node.left.take().map(|left| *left);
                stack.push(node);
            }
            match stack.pop() {
                Some(Self { point, right, .. }) => {
                    out.push(point);
                    current = right.map(|right| *right);
                }
                None => return,
            }
        }
    }

    /// Render this subtree as `[left self right]`, a bare point for leaves.
    pub(crate) fn fmt_link(link: Option<&Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        P: fmt::Display,
    {
        match link {
            None => write!(f, "<nil>"),
            Some(node) if node.is_leaf() => write!(f, "{}", node.point),
            Some(node) => {
                write!(f, "[")?;
                Self::fmt_link(node.left(), f)?;
                write!(f, " {} ", node.point)?;
                Self::fmt_link(node.right(), f)?;
                write!(f, "]")
            }
        }
    }
}

impl<P: Point> Node<P> {
    /// Insert `point` below this node, whose split axis is `axis`.
    ///
    /// Strictly smaller values go left, equal or greater values go right.
    pub(crate) fn insert(&mut self, point: P, axis: usize, dims: usize) {
        let mut node = self;
        let mut axis = axis;
        loop {
            let slot = if point.dimension(axis) < node.point.dimension(axis) {
                &mut node.left
            } else {
                &mut node.right
            };
            axis = (axis + 1) % dims;
            match slot {
                Some(child) => node = &mut **child,
                None => {
                    *slot = Some(Box::new(Node::leaf(point)));
                    return;
                }
            }
        }
    }

    /// Remove the first point coinciding with `target` from the subtree in `slot`.
    ///
    /// `axis` is the split axis of the node held by `slot`. It is passed explicitly through every
    /// call, including the search for a replacement, so a node promoted out of a deeper subtree
    /// is always removed under the axis of the level it was found on.
    pub(crate) fn remove<Q: Point + ?Sized>(
        slot: &mut Link<P>,
        target: &Q,
        axis: usize,
        dims: usize,
    ) -> Option<P> {
        let node = slot.as_deref_mut()?;
        let next = (axis + 1) % dims;

        if !node.point.coincides(target) {
            return match target
                .dimension(axis)
                .partial_cmp(&node.point.dimension(axis))
            {
                Some(Ordering::Less) => Self::remove(&mut node.left, target, next, dims),
                Some(Ordering::Greater) => Self::remove(&mut node.right, target, next, dims),
                // equal values may sit on either side after a replacement
                _ => Self::remove(&mut node.left, target, next, dims)
                    .or_else(|| Self::remove(&mut node.right, target, next, dims)),
            };
        }

        if node.is_leaf() {
            return slot.take().map(|node| node.point);
        }

        let replacement = if let Some(left) = node.left.as_deref() {
            let victim = left.extreme(axis, Extreme::Max).point.coordinates();
            Self::remove(&mut node.left, &victim, next, dims)
        } else if let Some(right) = node.right.as_deref() {
            let victim = right.extreme(axis, Extreme::Min).point.coordinates();
            Self::remove(&mut node.right, &victim, next, dims)
        } else {
            None
        };
        debug_assert!(replacement.is_some(), "replacement must exist in subtree");

        replacement.map(|point| mem::replace(&mut node.point, point))
    }

    /// The node holding the minimum or maximum value along `axis` in this subtree.
    ///
    /// Ties resolve to the first such node in pre-order (self, left, right).
    fn extreme(&self, axis: usize, which: Extreme) -> &Node<P> {
        let mut best = self;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            let value = node.point.dimension(axis);
            let better = match which {
                Extreme::Min => value < best.point.dimension(axis),
                Extreme::Max => value > best.point.dimension(axis),
            };
            if better {
                best = node;
            }
            // right first so that left is visited first
            if let Some(right) = node.right.as_deref() {
                stack.push(right);
            }
            if let Some(left) = node.left.as_deref() {
                stack.push(left);
            }
        }
        best
    }
}
