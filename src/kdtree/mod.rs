//! An implementation of a mutable, balanced K-D Tree.

#![warn(missing_docs)]

mod builder;
mod index;
mod node;
mod search;

pub use builder::KDTreeBuilder;
pub use index::KDTree;
pub use node::Node;
