//! Seasonal date features.

use braid_matrix::FeatureMatrix;
use braid_traits::{Result, TransformError, Transformer};
use ndarray::Array2;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use crate::datetime::ordinal_days;
use crate::spline::PeriodicSplineBasis;

/// Default knot count, roughly one knot per month.
pub const DEFAULT_SEASONAL_KNOTS: usize = 12;

/// Encodes a `%Y-%m-%d` date column as a yearly seasonal feature.
///
/// Dates are parsed to their ordinal day of year, then expanded into a
/// periodic cubic spline basis whose knots span the day-of-year range seen
/// at fit time. The periodic extension makes late December and early
/// January neighbors, as a seasonal signal should. Output is dense with
/// width `n_knots - 1` for any row count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalEncoder {
    column: String,
    n_knots: usize,
    basis: Option<PeriodicSplineBasis>,
}

impl SeasonalEncoder {
    /// Encode the given date column with `n_knots` uniform knots.
    pub fn new(column: impl Into<String>, n_knots: usize) -> Self {
        Self {
            column: column.into(),
            n_knots,
            basis: None,
        }
    }

    /// The encoded column name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The configured knot count.
    pub const fn n_knots(&self) -> usize {
        self.n_knots
    }
}

impl Transformer for SeasonalEncoder {
    fn fit(&mut self, df: &DataFrame) -> Result<()> {
        let days = ordinal_days(df, &self.column)?;
        if days.is_empty() {
            return Err(TransformError::InsufficientRows {
                required: 1,
                actual: 0,
            });
        }
        let min = days.iter().copied().fold(f64::INFINITY, f64::min);
        let max = days.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        self.basis = Some(PeriodicSplineBasis::fit(min, max, self.n_knots)?);
        Ok(())
    }

    fn transform(&self, df: &DataFrame) -> Result<FeatureMatrix> {
        let basis = self
            .basis
            .as_ref()
            .ok_or(TransformError::NotFitted("SeasonalEncoder"))?;
        let days = ordinal_days(df, &self.column)?;
        let mut out = Array2::zeros((days.len(), basis.n_basis()));
        for (r, &day) in days.iter().enumerate() {
            for (c, value) in basis.evaluate(day).into_iter().enumerate() {
                out[[r, c]] = value;
            }
        }
        Ok(FeatureMatrix::Dense(out))
    }

    fn fresh(&self) -> Box<dyn Transformer> {
        Box::new(Self {
            column: self.column.clone(),
            n_knots: self.n_knots,
            basis: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use polars::df;

    use super::*;

    fn year_frame() -> DataFrame {
        df!(
            "date" => [
                "2024-01-05", "2024-02-20", "2024-04-01", "2024-06-15",
                "2024-08-30", "2024-10-10", "2024-12-28",
            ]
        )
        .unwrap()
    }

    #[test]
    fn test_seasonal_width() {
        let mut enc = SeasonalEncoder::new("date", DEFAULT_SEASONAL_KNOTS);
        let out = enc.fit_transform(&year_frame()).unwrap();
        assert!(!out.is_sparse());
        assert_eq!(out.nrows(), 7);
        assert_eq!(out.ncols(), DEFAULT_SEASONAL_KNOTS - 1);
    }

    #[test]
    fn test_seasonal_rows_sum_to_one() {
        let mut enc = SeasonalEncoder::new("date", 6);
        let out = enc.fit_transform(&year_frame()).unwrap().to_dense();
        for row in out.rows() {
            assert_relative_eq!(row.sum(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_seasonal_requires_fit() {
        let enc = SeasonalEncoder::new("date", 6);
        assert!(matches!(
            enc.transform(&year_frame()).unwrap_err(),
            TransformError::NotFitted(_)
        ));
    }

    #[test]
    fn test_seasonal_single_date_is_degenerate() {
        let frame = df!("date" => ["2024-06-15", "2024-06-15"]).unwrap();
        let mut enc = SeasonalEncoder::new("date", 6);
        assert!(enc.fit(&frame).is_err());
    }

    #[test]
    fn test_seasonal_width_is_row_count_independent() {
        let mut enc = SeasonalEncoder::new("date", 8);
        let frame = year_frame();
        enc.fit(&frame).unwrap();
        let probe = enc.transform(&frame.slice(0, 2)).unwrap();
        let full = enc.transform(&frame).unwrap();
        assert_eq!(probe.ncols(), full.ncols());
    }
}
