//! Raw column selection.

use braid_matrix::FeatureMatrix;
use braid_traits::{Result, TransformError, Transformer};
use ndarray::Array2;
use polars::prelude::{DataFrame, DataType};
use serde::{Deserialize, Serialize};

/// Passes named numeric columns through unchanged, as one dense block.
///
/// Stateless: `fit` only validates that the columns exist. Output width
/// equals the number of selected columns for any row count. Values are
/// cast to `f64`; null values are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectColumns {
    columns: Vec<String>,
}

impl SelectColumns {
    /// Select the given columns, in order.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// The selected column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Transformer for SelectColumns {
    fn fit(&mut self, df: &DataFrame) -> Result<()> {
        if self.columns.is_empty() {
            return Err(TransformError::InvalidParameter(
                "no columns selected".to_string(),
            ));
        }
        for name in &self.columns {
            df.column(name)?;
        }
        Ok(())
    }

    fn transform(&self, df: &DataFrame) -> Result<FeatureMatrix> {
        let nrows = df.height();
        let mut out = Array2::zeros((nrows, self.columns.len()));
        for (c, name) in self.columns.iter().enumerate() {
            let series = df.column(name)?.as_materialized_series();
            let cast = series.cast(&DataType::Float64)?;
            let ca = cast.f64()?;
            for (r, value) in ca.into_iter().enumerate() {
                let Some(v) = value else {
                    return Err(TransformError::InvalidParameter(format!(
                        "null value in column '{name}'"
                    )));
                };
                out[[r, c]] = v;
            }
        }
        Ok(FeatureMatrix::Dense(out))
    }

    fn fresh(&self) -> Box<dyn Transformer> {
        Box::new(self.clone())
    }
}
