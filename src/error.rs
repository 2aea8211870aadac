use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KdIndexError {
    /// A point's dimensionality differs from the points already in the tree.
    #[error("Dimension mismatch: expected {expected} dimensions, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Points without any dimension cannot be split along an axis.
    #[error("Points must have at least one dimension")]
    ZeroDimensions,

    /// A range was built from a number of limits that does not form min/max pairs.
    #[error("Invalid range: expected a non-empty, even number of limits, got {0}")]
    InvalidRange(usize),
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, KdIndexError>;
