//! The dense/sparse feature-matrix value.
//!
//! Every pipeline stage produces and consumes a [`FeatureMatrix`]. The two
//! representations expose one set of block operations with identical
//! semantics, so callers never branch on sparsity; the representation of
//! the input is preserved by every operation, and concatenation promotes
//! to sparse as soon as one block is sparse.

use std::ops::Range;

use ndarray::{Array1, Array2, ArrayView2, Axis, concatenate, s};

use crate::csc::CscMatrix;
use crate::error::MatrixError;

/// A two-dimensional `f64` feature matrix, dense or compressed-sparse-column.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureMatrix {
    /// Dense row-major storage
    Dense(Array2<f64>),
    /// Compressed-sparse-column storage
    Sparse(CscMatrix),
}

impl From<Array2<f64>> for FeatureMatrix {
    fn from(dense: Array2<f64>) -> Self {
        Self::Dense(dense)
    }
}

impl From<CscMatrix> for FeatureMatrix {
    fn from(sparse: CscMatrix) -> Self {
        Self::Sparse(sparse)
    }
}

impl FeatureMatrix {
    /// Number of rows.
    pub fn nrows(&self) -> usize {
        match self {
            Self::Dense(m) => m.nrows(),
            Self::Sparse(m) => m.nrows(),
        }
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        match self {
            Self::Dense(m) => m.ncols(),
            Self::Sparse(m) => m.ncols(),
        }
    }

    /// Whether this matrix is stored sparsely.
    pub const fn is_sparse(&self) -> bool {
        matches!(self, Self::Sparse(_))
    }

    /// Materialize as a dense array, regardless of representation.
    pub fn to_dense(&self) -> Array2<f64> {
        match self {
            Self::Dense(m) => m.clone(),
            Self::Sparse(m) => m.to_dense(),
        }
    }

    /// Convert into compressed-sparse-column storage.
    pub fn into_csc(self) -> CscMatrix {
        match self {
            Self::Dense(m) => CscMatrix::from_dense(&m),
            Self::Sparse(m) => m,
        }
    }

    /// Extract a contiguous column block, preserving representation.
    ///
    /// # Errors
    /// Returns an error if the range does not lie within `0..ncols`.
    pub fn slice_columns(&self, range: Range<usize>) -> Result<Self, MatrixError> {
        match self {
            Self::Dense(m) => {
                if range.start > range.end || range.end > m.ncols() {
                    return Err(MatrixError::ColumnRangeOutOfBounds {
                        start: range.start,
                        end: range.end,
                        ncols: m.ncols(),
                    });
                }
                Ok(Self::Dense(m.slice(s![.., range]).to_owned()))
            }
            Self::Sparse(m) => m.slice_columns(range).map(Self::Sparse),
        }
    }

    /// Materialize one column as a dense vector.
    ///
    /// # Errors
    /// Returns an error if `col` is out of bounds.
    pub fn column(&self, col: usize) -> Result<Vec<f64>, MatrixError> {
        match self {
            Self::Dense(m) => {
                if col >= m.ncols() {
                    return Err(MatrixError::ColumnOutOfBounds {
                        index: col,
                        ncols: m.ncols(),
                    });
                }
                Ok(m.column(col).to_vec())
            }
            Self::Sparse(m) => m.col_dense(col),
        }
    }

    /// Broadcast-multiply the whole block by a column vector:
    /// `out[r, c] = self[r, c] * weights[r]`.
    ///
    /// # Errors
    /// Returns an error if `weights` does not have one entry per row.
    pub fn scale_rows(&self, weights: &[f64]) -> Result<Self, MatrixError> {
        match self {
            Self::Dense(m) => {
                if weights.len() != m.nrows() {
                    return Err(MatrixError::WeightLengthMismatch {
                        expected: m.nrows(),
                        actual: weights.len(),
                    });
                }
                let w = Array1::from_vec(weights.to_vec()).insert_axis(Axis(1));
                Ok(Self::Dense(m * &w))
            }
            Self::Sparse(m) => m.scale_rows(weights).map(Self::Sparse),
        }
    }

    /// Broadcast-multiply every column by a factor:
    /// `out[r, c] = self[r, c] * factors[c]`.
    ///
    /// # Errors
    /// Returns an error if `factors` does not have one entry per column.
    pub fn scale_columns(&self, factors: &[f64]) -> Result<Self, MatrixError> {
        match self {
            Self::Dense(m) => {
                if factors.len() != m.ncols() {
                    return Err(MatrixError::ScaleLengthMismatch {
                        expected: m.ncols(),
                        actual: factors.len(),
                    });
                }
                let f = Array1::from_vec(factors.to_vec()).insert_axis(Axis(0));
                Ok(Self::Dense(m * &f))
            }
            Self::Sparse(m) => m.scale_columns(factors).map(Self::Sparse),
        }
    }

    /// Concatenate blocks side by side.
    ///
    /// All-dense input yields a dense result; if any block is sparse the
    /// result is sparse.
    ///
    /// # Errors
    /// Returns an error on an empty block list or mismatched row counts.
    pub fn hstack(parts: &[Self]) -> Result<Self, MatrixError> {
        let first = parts.first().ok_or(MatrixError::EmptyConcat)?;
        let nrows = first.nrows();
        for part in parts {
            if part.nrows() != nrows {
                return Err(MatrixError::RowCountMismatch {
                    expected: nrows,
                    actual: part.nrows(),
                });
            }
        }

        let dense_views: Option<Vec<ArrayView2<'_, f64>>> = parts
            .iter()
            .map(|part| match part {
                Self::Dense(m) => Some(m.view()),
                Self::Sparse(_) => None,
            })
            .collect();

        match dense_views {
            Some(views) => concatenate(Axis(1), &views)
                .map(Self::Dense)
                .map_err(|e| MatrixError::Concat(e.to_string())),
            None => {
                let csc: Vec<CscMatrix> = parts.iter().map(|p| p.clone().into_csc()).collect();
                CscMatrix::hstack(&csc).map(Self::Sparse)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn reference() -> Array2<f64> {
        array![
            [1.0, 0.0, 2.0, 0.0],
            [0.0, 3.0, 0.0, 1.0],
            [4.0, 0.0, 5.0, 0.0]
        ]
    }

    /// Both representations of the same data, for the shared contract tests.
    fn both() -> [FeatureMatrix; 2] {
        let dense = reference();
        let sparse = CscMatrix::from_dense(&dense);
        [FeatureMatrix::Dense(dense), FeatureMatrix::Sparse(sparse)]
    }

    #[test]
    fn test_contract_shape() {
        for m in both() {
            assert_eq!(m.nrows(), 3);
            assert_eq!(m.ncols(), 4);
            assert_eq!(m.to_dense(), reference());
        }
    }

    #[test]
    fn test_contract_slice_columns() {
        for m in both() {
            let block = m.slice_columns(1..3).unwrap();
            assert_eq!(block.is_sparse(), m.is_sparse());
            assert_eq!(block.to_dense(), reference().slice(s![.., 1..3]).to_owned());
            assert!(m.slice_columns(3..5).is_err());
        }
    }

    #[test]
    fn test_contract_column() {
        for m in both() {
            assert_eq!(m.column(0).unwrap(), vec![1.0, 0.0, 4.0]);
            assert_eq!(m.column(3).unwrap(), vec![0.0, 1.0, 0.0]);
            assert!(m.column(4).is_err());
        }
    }

    #[test]
    fn test_contract_scale_rows() {
        let weights = [2.0, -1.0, 0.5];
        let expected = array![
            [2.0, 0.0, 4.0, 0.0],
            [0.0, -3.0, 0.0, -1.0],
            [2.0, 0.0, 2.5, 0.0]
        ];
        for m in both() {
            let scaled = m.scale_rows(&weights).unwrap();
            assert_eq!(scaled.is_sparse(), m.is_sparse());
            assert_eq!(scaled.to_dense(), expected);
            assert!(m.scale_rows(&[1.0]).is_err());
        }
    }

    #[test]
    fn test_contract_scale_columns() {
        let factors = [1.0, 0.0, 2.0, -1.0];
        let expected = array![
            [1.0, 0.0, 4.0, 0.0],
            [0.0, 0.0, 0.0, -1.0],
            [4.0, 0.0, 10.0, 0.0]
        ];
        for m in both() {
            let scaled = m.scale_columns(&factors).unwrap();
            assert_eq!(scaled.is_sparse(), m.is_sparse());
            assert_eq!(scaled.to_dense(), expected);
            assert!(m.scale_columns(&[1.0]).is_err());
        }
    }

    #[test]
    fn test_contract_hstack_preserves_representation() {
        for m in both() {
            let stacked = FeatureMatrix::hstack(&[m.clone(), m.clone()]).unwrap();
            assert_eq!(stacked.is_sparse(), m.is_sparse());
            assert_eq!(stacked.ncols(), 8);
            assert_eq!(stacked.nrows(), 3);
        }
    }

    #[test]
    fn test_hstack_mixed_promotes_to_sparse() {
        let [dense, sparse] = both();
        let stacked = FeatureMatrix::hstack(&[dense, sparse]).unwrap();
        assert!(stacked.is_sparse());
        let expected = concatenate(Axis(1), &[reference().view(), reference().view()]).unwrap();
        assert_eq!(stacked.to_dense(), expected);
    }

    #[test]
    fn test_hstack_errors() {
        assert_eq!(
            FeatureMatrix::hstack(&[]).unwrap_err(),
            MatrixError::EmptyConcat
        );
        let a = FeatureMatrix::Dense(Array2::zeros((3, 2)));
        let b = FeatureMatrix::Dense(Array2::zeros((2, 2)));
        assert_eq!(
            FeatureMatrix::hstack(&[a, b]).unwrap_err(),
            MatrixError::RowCountMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_zero_width_blocks() {
        for m in both() {
            let empty = m.slice_columns(2..2).unwrap();
            assert_eq!(empty.ncols(), 0);
            let stacked = FeatureMatrix::hstack(&[empty, m.clone()]).unwrap();
            assert_eq!(stacked.ncols(), 4);
        }
    }
}
