//! I/O error types.

use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A row failed to parse as two comma-separated floating-point fields.
    #[error("malformed input row {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    /// Core library error.
    #[error("core error: {0}")]
    Core(#[from] scanstat_core::Error),

    /// A CSV reader/writer error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
