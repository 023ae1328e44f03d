//! The shared error type of the fit/transform contract.

use braid_matrix::MatrixError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Result type for fit/transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

/// Errors that can occur while fitting or transforming.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Transform was called before fit
    #[error("transform called before fit on {0}")]
    NotFitted(&'static str),

    /// Input has too few rows for the operation
    #[error("insufficient rows: need at least {required}, got {actual}")]
    InsufficientRows {
        /// Required number of rows
        required: usize,
        /// Actual number of rows
        actual: usize,
    },

    /// Concatenated output width disagrees with the width learned at fit time
    #[error(
        "concatenated output width {actual} does not match fitted width {expected}; \
         a member's output width depends on the number of input rows"
    )]
    ProbeWidthMismatch {
        /// Total width recorded during fit
        expected: usize,
        /// Width observed during transform
        actual: usize,
    },

    /// Matrix column count disagrees with the fitted state
    #[error("column count mismatch: expected {expected}, got {actual}")]
    ColumnCountMismatch {
        /// Column count recorded during fit
        expected: usize,
        /// Column count observed during transform
        actual: usize,
    },

    /// A category value not seen during fit
    #[error("unknown category '{value}' in column '{column}'")]
    UnknownCategory {
        /// Column holding the value
        column: String,
        /// The unseen category value
        value: String,
    },

    /// A date value failed to parse
    #[error("date parse error in column '{column}': {message}")]
    DateParse {
        /// Column holding the value
        column: String,
        /// Parser message
        message: String,
    },

    /// Invalid configuration or input
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Cross-product over fewer than two feature blocks
    #[error("cross-product requires at least two feature blocks, got {0}")]
    CrossProductArity(usize),

    /// Matrix operation error
    #[error("matrix error: {0}")]
    Matrix(#[from] MatrixError),

    /// Polars error
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}
