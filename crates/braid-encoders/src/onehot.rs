//! One-hot categorical encoding.

use std::collections::BTreeSet;

use braid_matrix::{CscMatrix, FeatureMatrix};
use braid_traits::{Result, TransformError, Transformer};
use polars::prelude::{DataFrame, DataType};
use serde::{Deserialize, Serialize};

/// Encodes categorical columns as sparse 0/1 indicator columns.
///
/// `fit` learns the distinct values of each column in lexicographic order;
/// `transform` emits one indicator column per (column, category) pair, so
/// the output width is the sum of the per-column category counts. Values
/// unseen during fit are an error, as are nulls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    columns: Vec<String>,
    categories: Option<Vec<Vec<String>>>,
}

impl OneHotEncoder {
    /// Encode the given columns, in order.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            categories: None,
        }
    }

    /// The fitted categories per column, in output order.
    pub fn categories(&self) -> Option<&[Vec<String>]> {
        self.categories.as_deref()
    }

    /// Read a column as strings, rejecting nulls. Non-string columns are
    /// cast, so integer category columns work as-is.
    fn column_strings(df: &DataFrame, name: &str) -> Result<Vec<String>> {
        let series = df.column(name)?.as_materialized_series();
        let cast = series.cast(&DataType::String)?;
        let ca = cast.str()?;
        let mut out = Vec::with_capacity(ca.len());
        for value in ca {
            let Some(v) = value else {
                return Err(TransformError::InvalidParameter(format!(
                    "null value in column '{name}'"
                )));
            };
            out.push(v.to_string());
        }
        Ok(out)
    }
}

impl Transformer for OneHotEncoder {
    fn fit(&mut self, df: &DataFrame) -> Result<()> {
        if self.columns.is_empty() {
            return Err(TransformError::InvalidParameter(
                "no columns selected".to_string(),
            ));
        }
        let mut categories = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            let values = Self::column_strings(df, name)?;
            let distinct: BTreeSet<String> = values.into_iter().collect();
            categories.push(distinct.into_iter().collect::<Vec<_>>());
        }
        self.categories = Some(categories);
        Ok(())
    }

    fn transform(&self, df: &DataFrame) -> Result<FeatureMatrix> {
        let categories = self
            .categories
            .as_ref()
            .ok_or(TransformError::NotFitted("OneHotEncoder"))?;
        let nrows = df.height();
        let width: usize = categories.iter().map(Vec::len).sum();
        let mut triplets = Vec::with_capacity(nrows * self.columns.len());
        let mut offset = 0;
        for (name, cats) in self.columns.iter().zip(categories) {
            let values = Self::column_strings(df, name)?;
            for (row, value) in values.iter().enumerate() {
                let idx = cats
                    .binary_search_by(|c| c.as_str().cmp(value))
                    .map_err(|_| TransformError::UnknownCategory {
                        column: name.clone(),
                        value: value.clone(),
                    })?;
                triplets.push((row, offset + idx, 1.0));
            }
            offset += cats.len();
        }
        let matrix = CscMatrix::from_triplets(nrows, width, triplets)?;
        Ok(FeatureMatrix::Sparse(matrix))
    }

    fn fresh(&self) -> Box<dyn Transformer> {
        Box::new(Self {
            columns: self.columns.clone(),
            categories: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;
    use polars::df;

    use super::*;

    #[test]
    fn test_onehot_single_column() {
        let frame = df!("color" => ["red", "blue", "red", "green"]).unwrap();
        let mut enc = OneHotEncoder::new(["color"]);
        let out = enc.fit_transform(&frame).unwrap();
        assert!(out.is_sparse());
        // Categories sort lexicographically: blue, green, red.
        assert_eq!(
            out.to_dense(),
            array![
                [0.0, 0.0, 1.0],
                [1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0]
            ]
        );
        assert_eq!(
            enc.categories().unwrap()[0],
            vec!["blue".to_string(), "green".to_string(), "red".to_string()]
        );
    }

    #[test]
    fn test_onehot_multiple_columns_width() {
        let frame = df!(
            "a" => ["x", "y", "x"],
            "b" => [1i64, 2, 3],
        )
        .unwrap();
        let mut enc = OneHotEncoder::new(["a", "b"]);
        let out = enc.fit_transform(&frame).unwrap();
        // 2 categories for "a" plus 3 for "b".
        assert_eq!(out.ncols(), 5);
        assert_eq!(out.nrows(), 3);
    }

    #[test]
    fn test_onehot_unknown_category() {
        let train = df!("color" => ["red", "blue"]).unwrap();
        let test = df!("color" => ["green"]).unwrap();
        let mut enc = OneHotEncoder::new(["color"]);
        enc.fit(&train).unwrap();
        let err = enc.transform(&test).unwrap_err();
        assert!(matches!(err, TransformError::UnknownCategory { .. }));
    }

    #[test]
    fn test_onehot_requires_fit() {
        let frame = df!("color" => ["red"]).unwrap();
        let enc = OneHotEncoder::new(["color"]);
        assert!(matches!(
            enc.transform(&frame).unwrap_err(),
            TransformError::NotFitted(_)
        ));
    }

    #[test]
    fn test_onehot_row_sums_are_column_count() {
        let frame = df!("a" => ["x", "y"], "b" => ["u", "v"]).unwrap();
        let mut enc = OneHotEncoder::new(["a", "b"]);
        let out = enc.fit_transform(&frame).unwrap().to_dense();
        for row in out.rows() {
            assert_eq!(row.sum(), 2.0);
        }
    }
}
