//! A priority queue over `f64` priorities that can be capped to its lowest or highest items.

use std::collections::VecDeque;

/// Limits how many items a [`BoundedPriorityQueue`] retains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeLimit {
    /// Keep every inserted item.
    #[default]
    Unbounded,
    /// Keep at most this many items, retaining those with the lowest priorities.
    KeepLowest(usize),
    /// Keep at most this many items, retaining those with the highest priorities.
    KeepHighest(usize),
}

/// Bounded queues never reserve room for more than this many items up front.
const MAX_PREALLOCATED: usize = 1024;

#[derive(Debug, Clone)]
struct Item<T> {
    value: T,
    priority: f64,
}

/// A priority queue that keeps its items sorted ascending by priority at all times.
///
/// Items with equal priorities keep their insertion order. Priorities are compared with
/// [`f64::total_cmp`], so `NaN` sorts above every other priority.
///
/// ```
/// use kd_index::queue::{BoundedPriorityQueue, SizeLimit};
///
/// let mut queue = BoundedPriorityQueue::with_limit(SizeLimit::KeepLowest(2));
/// queue.insert("c", 3.);
/// queue.insert("a", 1.);
/// queue.insert("b", 2.);
/// assert_eq!(queue.len(), 2);
/// assert_eq!(queue.pop_lowest(), Some("a"));
/// assert_eq!(queue.pop_highest(), Some("b"));
/// assert_eq!(queue.pop_lowest(), None);
/// ```
#[derive(Debug, Clone)]
pub struct BoundedPriorityQueue<T> {
    items: VecDeque<Item<T>>,
    limit: SizeLimit,
}

impl<T> Default for BoundedPriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BoundedPriorityQueue<T> {
    /// Create a new, unbounded queue.
    pub fn new() -> Self {
        Self::with_limit(SizeLimit::Unbounded)
    }

    /// Create a new queue retaining items according to `limit`.
    pub fn with_limit(limit: SizeLimit) -> Self {
        // the limit is an upper bound, not a size hint
        let capacity = match limit {
            SizeLimit::Unbounded => 0,
            SizeLimit::KeepLowest(size) | SizeLimit::KeepHighest(size) => {
                size.min(MAX_PREALLOCATED).saturating_add(1)
            }
        };
        Self {
            items: VecDeque::with_capacity(capacity),
            limit,
        }
    }

    /// The size limit of this queue.
    pub fn limit(&self) -> SizeLimit {
        self.limit
    }

    /// The number of items in the queue.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert a new item, then drop whatever falls outside the size limit.
    pub fn insert(&mut self, value: T, priority: f64) {
        let index = self
            .items
            .partition_point(|item| item.priority.total_cmp(&priority).is_le());
        self.items.insert(index, Item { value, priority });

        match self.limit {
            SizeLimit::Unbounded => {}
            SizeLimit::KeepLowest(size) => self.items.truncate(size),
            SizeLimit::KeepHighest(size) => {
                let excess = self.items.len().saturating_sub(size);
                self.items.drain(..excess);
            }
        }
    }

    /// Remove and return the item with the lowest priority.
    pub fn pop_lowest(&mut self) -> Option<T> {
        self.items.pop_front().map(|item| item.value)
    }

    /// Remove and return the item with the highest priority.
    pub fn pop_highest(&mut self) -> Option<T> {
        self.items.pop_back().map(|item| item.value)
    }

    /// The item with the lowest priority and its priority.
    pub fn peek_lowest(&self) -> Option<(&T, f64)> {
        self.get(0)
    }

    /// The item with the highest priority and its priority.
    pub fn peek_highest(&self) -> Option<(&T, f64)> {
        self.items.back().map(|item| (&item.value, item.priority))
    }

    /// The item with the `i`-th lowest priority and its priority.
    ///
    /// Index `0` holds the lowest priority and `self.len() - 1` the highest.
    pub fn get(&self, i: usize) -> Option<(&T, f64)> {
        self.items.get(i).map(|item| (&item.value, item.priority))
    }

    /// Iterate over the items and their priorities from lowest to highest priority.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> + '_ {
        self.items.iter().map(|item| (&item.value, item.priority))
    }

    /// Consume the queue, returning its values from lowest to highest priority.
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.items.into_iter().map(|item| item.value).collect()
    }
}
