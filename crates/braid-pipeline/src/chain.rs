//! Sequential composition.

use std::fmt;

use braid_matrix::FeatureMatrix;
use braid_traits::{MatrixTransformer, Result, Transformer};
use polars::prelude::DataFrame;

/// Feeds a head pipeline's output matrix into a matrix-level second stage.
///
/// `fit` fully fits-and-transforms the head, then fits the tail on the
/// resulting matrix; `transform` runs both stages in order.
pub struct Chain {
    head: Box<dyn Transformer>,
    tail: Box<dyn MatrixTransformer>,
}

impl Chain {
    /// Chain a head transformer into a tail stage.
    pub fn new(head: Box<dyn Transformer>, tail: Box<dyn MatrixTransformer>) -> Self {
        Self { head, tail }
    }

    pub(crate) fn fresh_chain(&self) -> Self {
        Self {
            head: self.head.fresh(),
            tail: self.tail.fresh(),
        }
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain").finish_non_exhaustive()
    }
}

impl Transformer for Chain {
    fn fit(&mut self, df: &DataFrame) -> Result<()> {
        let matrix = self.head.fit_transform(df)?;
        self.tail.fit(&matrix)
    }

    fn transform(&self, df: &DataFrame) -> Result<FeatureMatrix> {
        let matrix = self.head.transform(df)?;
        self.tail.transform(&matrix)
    }

    fn fit_transform(&mut self, df: &DataFrame) -> Result<FeatureMatrix> {
        let matrix = self.head.fit_transform(df)?;
        self.tail.fit_transform(&matrix)
    }

    fn fresh(&self) -> Box<dyn Transformer> {
        Box::new(self.fresh_chain())
    }
}
