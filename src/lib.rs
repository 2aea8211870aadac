#![doc = include_str!("../README.md")]

mod error;
pub mod kdtree;
mod point;
pub mod queue;
mod range;

pub use error::{KdIndexError, Result};
pub use point::{DataPoint, Point};
pub use range::KdRange;
