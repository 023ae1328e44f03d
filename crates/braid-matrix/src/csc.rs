//! Compressed-sparse-column matrix storage.
//!
//! Column-oriented storage is what the pipeline layer slices: a feature
//! block is a contiguous column range, so extracting one is a cheap copy of
//! two vector subslices. Values are `f64`; explicit zeros are never stored.

use std::ops::Range;

use ndarray::Array2;

use crate::error::MatrixError;

/// A sparse matrix in compressed-sparse-column form.
///
/// Invariants: `indptr` has length `ncols + 1` with `indptr[0] == 0`, row
/// indices are strictly increasing within each column, and every stored
/// value is nonzero. Constructors uphold these; triplet input may be in any
/// order and may contain duplicates (summed) or zeros (dropped).
#[derive(Debug, Clone, PartialEq)]
pub struct CscMatrix {
    nrows: usize,
    ncols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl CscMatrix {
    /// Build a matrix from `(row, column, value)` triplets.
    ///
    /// Triplets may arrive in any order; duplicate coordinates are summed
    /// and entries that end up exactly zero are dropped.
    ///
    /// # Errors
    /// Returns an error if any coordinate lies outside `nrows` x `ncols`.
    pub fn from_triplets(
        nrows: usize,
        ncols: usize,
        triplets: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Result<Self, MatrixError> {
        let mut cols: Vec<Vec<(usize, f64)>> = vec![Vec::new(); ncols];
        for (row, col, value) in triplets {
            if row >= nrows {
                return Err(MatrixError::RowOutOfBounds { index: row, nrows });
            }
            if col >= ncols {
                return Err(MatrixError::ColumnOutOfBounds { index: col, ncols });
            }
            cols[col].push((row, value));
        }

        let mut indptr = Vec::with_capacity(ncols + 1);
        indptr.push(0);
        let mut indices = Vec::new();
        let mut values = Vec::new();
        for entries in &mut cols {
            entries.sort_by_key(|&(row, _)| row);
            let mut pending: Option<(usize, f64)> = None;
            for &(row, value) in entries.iter() {
                match pending {
                    Some((prev, acc)) if prev == row => pending = Some((row, acc + value)),
                    Some((prev, acc)) => {
                        if acc != 0.0 {
                            indices.push(prev);
                            values.push(acc);
                        }
                        pending = Some((row, value));
                    }
                    None => pending = Some((row, value)),
                }
            }
            if let Some((row, acc)) = pending {
                if acc != 0.0 {
                    indices.push(row);
                    values.push(acc);
                }
            }
            indptr.push(indices.len());
        }

        Ok(Self {
            nrows,
            ncols,
            indptr,
            indices,
            values,
        })
    }

    /// Build a sparse copy of a dense matrix, dropping zeros.
    pub fn from_dense(dense: &Array2<f64>) -> Self {
        let (nrows, ncols) = dense.dim();
        let mut indptr = Vec::with_capacity(ncols + 1);
        indptr.push(0);
        let mut indices = Vec::new();
        let mut values = Vec::new();
        for col in 0..ncols {
            for row in 0..nrows {
                let value = dense[[row, col]];
                if value != 0.0 {
                    indices.push(row);
                    values.push(value);
                }
            }
            indptr.push(indices.len());
        }
        Self {
            nrows,
            ncols,
            indptr,
            indices,
            values,
        }
    }

    /// Materialize as a dense matrix.
    pub fn to_dense(&self) -> Array2<f64> {
        let mut out = Array2::zeros((self.nrows, self.ncols));
        for col in 0..self.ncols {
            for k in self.indptr[col]..self.indptr[col + 1] {
                out[[self.indices[k], col]] = self.values[k];
            }
        }
        out
    }

    /// Number of rows.
    pub const fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    pub const fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of stored (nonzero) entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Materialize one column as a dense vector.
    ///
    /// # Errors
    /// Returns an error if `col` is out of bounds.
    pub fn col_dense(&self, col: usize) -> Result<Vec<f64>, MatrixError> {
        if col >= self.ncols {
            return Err(MatrixError::ColumnOutOfBounds {
                index: col,
                ncols: self.ncols,
            });
        }
        let mut out = vec![0.0; self.nrows];
        for k in self.indptr[col]..self.indptr[col + 1] {
            out[self.indices[k]] = self.values[k];
        }
        Ok(out)
    }

    /// Extract a contiguous column block.
    ///
    /// # Errors
    /// Returns an error if the range does not lie within `0..ncols`.
    pub fn slice_columns(&self, range: Range<usize>) -> Result<Self, MatrixError> {
        if range.start > range.end || range.end > self.ncols {
            return Err(MatrixError::ColumnRangeOutOfBounds {
                start: range.start,
                end: range.end,
                ncols: self.ncols,
            });
        }
        let lo = self.indptr[range.start];
        let hi = self.indptr[range.end];
        let indptr = self.indptr[range.start..=range.end]
            .iter()
            .map(|p| p - lo)
            .collect();
        Ok(Self {
            nrows: self.nrows,
            ncols: range.end - range.start,
            indptr,
            indices: self.indices[lo..hi].to_vec(),
            values: self.values[lo..hi].to_vec(),
        })
    }

    /// Multiply every row by a weight: `out[r, c] = self[r, c] * weights[r]`.
    ///
    /// Entries whose product is zero are dropped, so the result stays
    /// canonical.
    ///
    /// # Errors
    /// Returns an error if `weights` does not have one entry per row.
    pub fn scale_rows(&self, weights: &[f64]) -> Result<Self, MatrixError> {
        if weights.len() != self.nrows {
            return Err(MatrixError::WeightLengthMismatch {
                expected: self.nrows,
                actual: weights.len(),
            });
        }
        let mut indptr = Vec::with_capacity(self.ncols + 1);
        indptr.push(0);
        let mut indices = Vec::new();
        let mut values = Vec::new();
        for col in 0..self.ncols {
            for k in self.indptr[col]..self.indptr[col + 1] {
                let row = self.indices[k];
                let value = self.values[k] * weights[row];
                if value != 0.0 {
                    indices.push(row);
                    values.push(value);
                }
            }
            indptr.push(indices.len());
        }
        Ok(Self {
            nrows: self.nrows,
            ncols: self.ncols,
            indptr,
            indices,
            values,
        })
    }

    /// Multiply every column by a factor: `out[r, c] = self[r, c] * factors[c]`.
    ///
    /// Entries whose product is zero are dropped, so the result stays
    /// canonical.
    ///
    /// # Errors
    /// Returns an error if `factors` does not have one entry per column.
    pub fn scale_columns(&self, factors: &[f64]) -> Result<Self, MatrixError> {
        if factors.len() != self.ncols {
            return Err(MatrixError::ScaleLengthMismatch {
                expected: self.ncols,
                actual: factors.len(),
            });
        }
        let mut indptr = Vec::with_capacity(self.ncols + 1);
        indptr.push(0);
        let mut indices = Vec::new();
        let mut values = Vec::new();
        for col in 0..self.ncols {
            for k in self.indptr[col]..self.indptr[col + 1] {
                let value = self.values[k] * factors[col];
                if value != 0.0 {
                    indices.push(self.indices[k]);
                    values.push(value);
                }
            }
            indptr.push(indices.len());
        }
        Ok(Self {
            nrows: self.nrows,
            ncols: self.ncols,
            indptr,
            indices,
            values,
        })
    }

    /// Concatenate matrices side by side.
    ///
    /// # Errors
    /// Returns an error on an empty input list or mismatched row counts.
    pub fn hstack(parts: &[Self]) -> Result<Self, MatrixError> {
        let first = parts.first().ok_or(MatrixError::EmptyConcat)?;
        let nrows = first.nrows;
        let mut indptr = vec![0usize];
        let mut indices = Vec::new();
        let mut values = Vec::new();
        let mut ncols = 0;
        for part in parts {
            if part.nrows != nrows {
                return Err(MatrixError::RowCountMismatch {
                    expected: nrows,
                    actual: part.nrows,
                });
            }
            let offset = indices.len();
            indices.extend_from_slice(&part.indices);
            values.extend_from_slice(&part.values);
            indptr.extend(part.indptr[1..].iter().map(|p| p + offset));
            ncols += part.ncols;
        }
        Ok(Self {
            nrows,
            ncols,
            indptr,
            indices,
            values,
        })
    }
}
