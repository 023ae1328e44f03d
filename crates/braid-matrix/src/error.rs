//! Error types for matrix operations.

use thiserror::Error;

/// Errors that can occur during feature-matrix operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    /// Row index outside the matrix
    #[error("row index {index} out of bounds for matrix with {nrows} rows")]
    RowOutOfBounds {
        /// Offending row index
        index: usize,
        /// Number of rows in the matrix
        nrows: usize,
    },

    /// Column index outside the matrix
    #[error("column index {index} out of bounds for matrix with {ncols} columns")]
    ColumnOutOfBounds {
        /// Offending column index
        index: usize,
        /// Number of columns in the matrix
        ncols: usize,
    },

    /// Column range outside the matrix
    #[error("column range {start}..{end} out of bounds for matrix with {ncols} columns")]
    ColumnRangeOutOfBounds {
        /// Range start (inclusive)
        start: usize,
        /// Range end (exclusive)
        end: usize,
        /// Number of columns in the matrix
        ncols: usize,
    },

    /// Broadcast weight vector does not match the row count
    #[error("weight vector length {actual} does not match row count {expected}")]
    WeightLengthMismatch {
        /// Expected length (the matrix row count)
        expected: usize,
        /// Actual weight vector length
        actual: usize,
    },

    /// Column scale vector does not match the column count
    #[error("scale vector length {actual} does not match column count {expected}")]
    ScaleLengthMismatch {
        /// Expected length (the matrix column count)
        expected: usize,
        /// Actual scale vector length
        actual: usize,
    },

    /// Concatenated blocks disagree on row count
    #[error("row count mismatch during concatenation: expected {expected}, got {actual}")]
    RowCountMismatch {
        /// Row count of the first block
        expected: usize,
        /// Row count of the offending block
        actual: usize,
    },

    /// Concatenation of an empty block list
    #[error("cannot concatenate an empty list of matrices")]
    EmptyConcat,

    /// Concatenation failure reported by the dense backend
    #[error("concatenation failed: {0}")]
    Concat(String),
}
