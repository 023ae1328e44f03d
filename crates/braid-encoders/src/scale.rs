//! Matrix standardization.

use braid_matrix::FeatureMatrix;
use braid_traits::{MatrixTransformer, Result, TransformError};
use ndarray::{Array1, Axis};
use serde::{Deserialize, Serialize};

/// Standardizes a feature matrix column by column.
///
/// Dense input is centered to zero mean and scaled to unit variance.
/// Sparse input is scaled only: centering would turn every implicit zero
/// into a stored value. Zero-variance columns pass through unscaled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardScaler {
    moments: Option<Moments>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Moments {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    /// Create an unfitted scaler.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fitted per-column means.
    pub fn means(&self) -> Option<&[f64]> {
        self.moments.as_ref().map(|m| m.means.as_slice())
    }

    /// The fitted per-column scales (standard deviations, with
    /// zero-variance columns clamped to 1).
    pub fn scales(&self) -> Option<&[f64]> {
        self.moments.as_ref().map(|m| m.scales.as_slice())
    }
}

impl MatrixTransformer for StandardScaler {
    fn fit(&mut self, matrix: &FeatureMatrix) -> Result<()> {
        let nrows = matrix.nrows();
        if nrows == 0 {
            return Err(TransformError::InsufficientRows {
                required: 1,
                actual: 0,
            });
        }
        let ncols = matrix.ncols();
        let n = nrows as f64;
        let mut means = Vec::with_capacity(ncols);
        let mut scales = Vec::with_capacity(ncols);
        for c in 0..ncols {
            let col = matrix.column(c)?;
            let mean = col.iter().sum::<f64>() / n;
            let var = col
                .iter()
                .map(|v| {
                    let d = v - mean;
                    d * d
                })
                .sum::<f64>()
                / n;
            means.push(mean);
            scales.push(if var > 0.0 { var.sqrt() } else { 1.0 });
        }
        self.moments = Some(Moments { means, scales });
        Ok(())
    }

    fn transform(&self, matrix: &FeatureMatrix) -> Result<FeatureMatrix> {
        let moments = self
            .moments
            .as_ref()
            .ok_or(TransformError::NotFitted("StandardScaler"))?;
        if matrix.ncols() != moments.means.len() {
            return Err(TransformError::ColumnCountMismatch {
                expected: moments.means.len(),
                actual: matrix.ncols(),
            });
        }
        match matrix {
            FeatureMatrix::Dense(m) => {
                let means = Array1::from_vec(moments.means.clone()).insert_axis(Axis(0));
                let scales = Array1::from_vec(moments.scales.clone()).insert_axis(Axis(0));
                Ok(FeatureMatrix::Dense((m - &means) / &scales))
            }
            FeatureMatrix::Sparse(_) => {
                let factors: Vec<f64> = moments.scales.iter().map(|s| 1.0 / s).collect();
                Ok(matrix.scale_columns(&factors)?)
            }
        }
    }

    fn fresh(&self) -> Box<dyn MatrixTransformer> {
        Box::new(Self::new())
    }
}
