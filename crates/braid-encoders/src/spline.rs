//! Periodic B-spline basis.
//!
//! A cubic B-spline basis on uniformly spaced knots over a fitted span,
//! with periodic extension: values outside the span wrap around, and the
//! basis functions that straddle the boundary are folded together so the
//! encoding is continuous across the wrap point. With `n_knots` knots the
//! basis has `n_knots - 1` functions.

use braid_traits::{Result, TransformError};
use serde::{Deserialize, Serialize};

/// Spline degree (cubic).
const DEGREE: usize = 3;

/// A fitted periodic cubic B-spline basis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodicSplineBasis {
    /// Extended knot vector: the uniform base knots plus `DEGREE` periodic
    /// continuation knots on each side.
    knots: Vec<f64>,
    t_min: f64,
    t_max: f64,
    n_basis: usize,
}

impl PeriodicSplineBasis {
    /// Fit a basis with `n_knots` uniform knots over `[min, max]`.
    ///
    /// # Errors
    /// Returns an error if `n_knots <= 3` or the span is degenerate.
    pub fn fit(min: f64, max: f64, n_knots: usize) -> Result<Self> {
        if n_knots <= DEGREE {
            return Err(TransformError::InvalidParameter(format!(
                "periodic splines need more than {DEGREE} knots, got {n_knots}"
            )));
        }
        if max <= min {
            return Err(TransformError::InvalidParameter(format!(
                "degenerate knot span [{min}, {max}]"
            )));
        }
        let period = max - min;
        let base: Vec<f64> = (0..n_knots)
            .map(|i| min + period * i as f64 / (n_knots - 1) as f64)
            .collect();
        let mut knots = Vec::with_capacity(n_knots + 2 * DEGREE);
        for k in &base[n_knots - DEGREE - 1..n_knots - 1] {
            knots.push(k - period);
        }
        knots.extend_from_slice(&base);
        for k in &base[1..=DEGREE] {
            knots.push(k + period);
        }
        Ok(Self {
            knots,
            t_min: min,
            t_max: max,
            n_basis: n_knots - 1,
        })
    }

    /// Number of basis functions (`n_knots - 1`).
    pub const fn n_basis(&self) -> usize {
        self.n_basis
    }

    /// Evaluate every basis function at `x`.
    ///
    /// `x` is wrapped into the fitted span first, so any real input is
    /// valid and `evaluate(x) == evaluate(x + period)`.
    pub fn evaluate(&self, x: f64) -> Vec<f64> {
        let period = self.t_max - self.t_min;
        let xv = self.t_min + (x - self.t_min).rem_euclid(period);

        // Cox-de Boor, computed in place level by level. After level p the
        // first `knots.len() - p - 1` entries hold the degree-p functions.
        let mut b = vec![0.0; self.knots.len() - 1];
        for (i, value) in b.iter_mut().enumerate() {
            if self.knots[i] <= xv && xv < self.knots[i + 1] {
                *value = 1.0;
            }
        }
        for p in 1..=DEGREE {
            for i in 0..self.knots.len() - p - 1 {
                let left_den = self.knots[i + p] - self.knots[i];
                let right_den = self.knots[i + p + 1] - self.knots[i + 1];
                let mut value = 0.0;
                if left_den > 0.0 {
                    value += (xv - self.knots[i]) / left_den * b[i];
                }
                if right_den > 0.0 {
                    value += (self.knots[i + p + 1] - xv) / right_den * b[i + 1];
                }
                b[i] = value;
            }
        }

        // Fold the trailing periodic aliases onto the leading functions.
        let mut out = b[..self.n_basis].to_vec();
        for j in 0..DEGREE {
            out[j] += b[self.n_basis + j];
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_basis_width() {
        let basis = PeriodicSplineBasis::fit(1.0, 366.0, 12).unwrap();
        assert_eq!(basis.n_basis(), 11);
        assert_eq!(basis.evaluate(50.0).len(), 11);
    }

    #[test]
    fn test_too_few_knots() {
        assert!(PeriodicSplineBasis::fit(0.0, 1.0, 3).is_err());
        assert!(PeriodicSplineBasis::fit(0.0, 1.0, 4).is_ok());
    }

    #[test]
    fn test_degenerate_span() {
        assert!(PeriodicSplineBasis::fit(5.0, 5.0, 12).is_err());
        assert!(PeriodicSplineBasis::fit(5.0, 4.0, 12).is_err());
    }

    #[test]
    fn test_partition_of_unity() {
        let basis = PeriodicSplineBasis::fit(1.0, 366.0, 12).unwrap();
        for x in [1.0, 17.5, 100.0, 182.5, 300.0, 365.9] {
            let total: f64 = basis.evaluate(x).iter().sum();
            assert_relative_eq!(total, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_nonnegative() {
        let basis = PeriodicSplineBasis::fit(0.0, 10.0, 6).unwrap();
        for x in [0.0, 2.5, 5.0, 9.99] {
            assert!(basis.evaluate(x).iter().all(|&v| v >= 0.0));
        }
    }

    #[test]
    fn test_periodic_wrap() {
        let basis = PeriodicSplineBasis::fit(0.0, 10.0, 6).unwrap();
        let inside = basis.evaluate(2.5);
        let wrapped = basis.evaluate(12.5);
        for (a, b) in inside.iter().zip(&wrapped) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
        // The span end wraps onto the span start.
        let at_start = basis.evaluate(0.0);
        let at_end = basis.evaluate(10.0);
        for (a, b) in at_start.iter().zip(&at_end) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_continuity_across_wrap() {
        let basis = PeriodicSplineBasis::fit(0.0, 10.0, 6).unwrap();
        let before = basis.evaluate(10.0 - 1e-9);
        let after = basis.evaluate(10.0 + 1e-9);
        for (a, b) in before.iter().zip(&after) {
            assert_relative_eq!(*a, *b, epsilon = 1e-6);
        }
    }
}
