//! Fit/transform contracts.

use braid_matrix::FeatureMatrix;
use polars::prelude::DataFrame;

use crate::error::Result;

/// A feature transformer: learns from a dataframe, then maps dataframes to
/// feature-matrix blocks.
///
/// Implementations must keep their output width independent of the number
/// of input rows. The pipeline layer infers block widths from a two-row
/// probe slice, so a transformer whose width varies with row count would
/// produce misaligned blocks; the cross-product transformer rejects such
/// output with [`TransformError::ProbeWidthMismatch`](crate::TransformError::ProbeWidthMismatch)
/// at transform time.
pub trait Transformer: Send {
    /// Learn fitted state from the input.
    fn fit(&mut self, df: &DataFrame) -> Result<()>;

    /// Map the input to a feature-matrix block.
    ///
    /// Requires a prior successful [`fit`](Transformer::fit) for stateful
    /// transformers; may be called any number of times afterwards.
    fn transform(&self, df: &DataFrame) -> Result<FeatureMatrix>;

    /// Fit on the input, then transform it.
    fn fit_transform(&mut self, df: &DataFrame) -> Result<FeatureMatrix> {
        self.fit(df)?;
        self.transform(df)
    }

    /// A parameter-preserving unfitted copy.
    ///
    /// Composition operators copy their operands through this method, so
    /// fitted state never leaks across pipeline trees built from the same
    /// source.
    fn fresh(&self) -> Box<dyn Transformer>;
}

/// A matrix-to-matrix stage, used as the second half of a sequential
/// composition.
pub trait MatrixTransformer: Send {
    /// Learn fitted state from the input matrix.
    fn fit(&mut self, matrix: &FeatureMatrix) -> Result<()>;

    /// Map the input matrix to an output matrix.
    fn transform(&self, matrix: &FeatureMatrix) -> Result<FeatureMatrix>;

    /// Fit on the input, then transform it.
    fn fit_transform(&mut self, matrix: &FeatureMatrix) -> Result<FeatureMatrix> {
        self.fit(matrix)?;
        self.transform(matrix)
    }

    /// A parameter-preserving unfitted copy.
    fn fresh(&self) -> Box<dyn MatrixTransformer>;
}
