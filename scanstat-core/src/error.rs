//! Error types for scanstat-core.

use thiserror::Error;

/// Result type alias for scanstat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for scanstat domain types.
#[derive(Error, Debug)]
pub enum Error {
    /// A point set with zero points was passed to an operation that requires at least one.
    #[error("point set is empty")]
    EmptyPointSet,

    /// A search radius of zero or less was supplied.
    #[error("search radius must be positive, got {0}")]
    InvalidRadius(f64),

    /// A coordinate was not finite (NaN or infinite).
    #[error("non-finite coordinate at index {index}: ({x}, {y})")]
    NonFiniteCoordinate { index: usize, x: f64, y: f64 },

    /// A configuration value is out of its valid domain.
    #[error("invalid configuration: {0}")]
    Config(String),
}
