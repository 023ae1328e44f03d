//! The pipeline value and its composition algebra.

use braid_matrix::FeatureMatrix;
use braid_traits::{MatrixTransformer, Result, Transformer};
use polars::prelude::DataFrame;

use crate::chain::Chain;
use crate::cross::CrossProduct;
use crate::union::{FeatureUnion, NamedTransformer};

/// A composable feature pipeline.
///
/// Pipelines are built by the constructors in [`crate::features`] (or
/// [`Pipeline::leaf`]) and combined with [`union_with`](Pipeline::union_with),
/// [`cross_with`](Pipeline::cross_with) and
/// [`then_apply`](Pipeline::then_apply). Composition never mutates its
/// operands: each method copies them unfitted, so a pipeline can appear in
/// any number of larger pipelines, and fitting one tree never leaks state
/// into another. The composed result is itself unfitted; call
/// [`fit`](Pipeline::fit) before [`transform`](Pipeline::transform).
#[derive(Debug)]
pub struct Pipeline {
    node: PipelineNode,
}

/// The structure of a pipeline.
#[derive(Debug)]
pub enum PipelineNode {
    /// A single named transformer
    Leaf(NamedTransformer),
    /// Horizontal concatenation of named members
    Union(FeatureUnion),
    /// Pairwise products between named members
    Cross(CrossProduct),
    /// Sequential composition of a pipeline and a matrix stage
    Chain(Chain),
}

impl Pipeline {
    /// Wrap a single transformer under a member name.
    pub fn leaf(name: impl Into<String>, transformer: impl Transformer + 'static) -> Self {
        Self {
            node: PipelineNode::Leaf(NamedTransformer::new(name, transformer)),
        }
    }

    /// Build a union pipeline directly from a member list.
    pub fn union(members: Vec<NamedTransformer>) -> Self {
        Self {
            node: PipelineNode::Union(FeatureUnion::from_members(members)),
        }
    }

    /// The pipeline's structure.
    pub const fn node(&self) -> &PipelineNode {
        &self.node
    }

    /// An unfitted copy with the same structure and parameters.
    pub fn unfitted(&self) -> Self {
        let node = match &self.node {
            PipelineNode::Leaf(member) => PipelineNode::Leaf(member.fresh()),
            PipelineNode::Union(union) => {
                PipelineNode::Union(FeatureUnion::from_members(union.fresh_members()))
            }
            PipelineNode::Cross(cross) => {
                PipelineNode::Cross(CrossProduct::new(cross.fresh_members()))
            }
            PipelineNode::Chain(chain) => PipelineNode::Chain(chain.fresh_chain()),
        };
        Self { node }
    }

    /// This pipeline as a single union member (unfitted).
    ///
    /// A leaf contributes its own named transformer; any other shape is
    /// wrapped whole under a generic name, so a union used as a member
    /// stays one block.
    fn as_member(&self) -> NamedTransformer {
        match &self.node {
            PipelineNode::Leaf(member) => member.fresh(),
            PipelineNode::Union(_) => NamedTransformer::from_boxed("union", Box::new(self.unfitted())),
            PipelineNode::Cross(_) => NamedTransformer::from_boxed("cross", Box::new(self.unfitted())),
            PipelineNode::Chain(_) => NamedTransformer::from_boxed("chain", Box::new(self.unfitted())),
        }
    }

    /// This pipeline flattened to a cross-product member list (unfitted).
    ///
    /// Unions and cross-products contribute their members; anything else
    /// contributes itself as a single member.
    fn flattened_members(&self) -> Vec<NamedTransformer> {
        match &self.node {
            PipelineNode::Union(union) => union.fresh_members(),
            PipelineNode::Cross(cross) => cross.fresh_members(),
            PipelineNode::Leaf(_) | PipelineNode::Chain(_) => vec![self.as_member()],
        }
    }

    /// A new pipeline concatenating this pipeline's features with
    /// `other`'s.
    ///
    /// If this pipeline is already a union, `other` is appended as one
    /// more member after the existing ones; otherwise the result is a
    /// two-member union, this pipeline first. Both operands are copied
    /// unfitted.
    pub fn union_with(&self, other: &Self) -> Self {
        let members = match &self.node {
            PipelineNode::Union(union) => {
                let mut members = union.fresh_members();
                members.push(other.as_member());
                members
            }
            _ => vec![self.as_member(), other.as_member()],
        };
        Self::union(members)
    }

    /// A new cross-product pipeline over both operands' members.
    ///
    /// Each operand is flattened: an existing union or cross-product
    /// contributes its member list, anything else contributes itself as a
    /// single member. This pipeline's members come first. Both operands
    /// are copied unfitted.
    pub fn cross_with(&self, other: &Self) -> Self {
        let mut members = self.flattened_members();
        members.extend(other.flattened_members());
        Self {
            node: PipelineNode::Cross(CrossProduct::new(members)),
        }
    }

    /// A new pipeline feeding this pipeline's output matrix into `stage`.
    ///
    /// This pipeline is copied unfitted; `stage` is moved in, so a fitted
    /// stage keeps whatever state it already carries until the chain is
    /// fit.
    pub fn then_apply(&self, stage: impl MatrixTransformer + 'static) -> Self {
        Self {
            node: PipelineNode::Chain(Chain::new(Box::new(self.unfitted()), Box::new(stage))),
        }
    }

    /// Fit the wrapped node on the input.
    pub fn fit(&mut self, df: &DataFrame) -> Result<()> {
        match &mut self.node {
            PipelineNode::Leaf(member) => member.transformer_mut().fit(df),
            PipelineNode::Union(union) => union.fit(df),
            PipelineNode::Cross(cross) => cross.fit(df),
            PipelineNode::Chain(chain) => chain.fit(df),
        }
    }

    /// Transform the input through the wrapped node.
    pub fn transform(&self, df: &DataFrame) -> Result<FeatureMatrix> {
        match &self.node {
            PipelineNode::Leaf(member) => member.transformer().transform(df),
            PipelineNode::Union(union) => union.transform(df),
            PipelineNode::Cross(cross) => cross.transform(df),
            PipelineNode::Chain(chain) => chain.transform(df),
        }
    }

    /// Fit on the input, then transform it.
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<FeatureMatrix> {
        match &mut self.node {
            PipelineNode::Leaf(member) => member.transformer_mut().fit_transform(df),
            PipelineNode::Union(union) => union.fit_transform(df),
            PipelineNode::Cross(cross) => cross.fit_transform(df),
            PipelineNode::Chain(chain) => chain.fit_transform(df),
        }
    }
}

impl From<FeatureUnion> for Pipeline {
    fn from(union: FeatureUnion) -> Self {
        Self {
            node: PipelineNode::Union(union),
        }
    }
}

impl From<CrossProduct> for Pipeline {
    fn from(cross: CrossProduct) -> Self {
        Self {
            node: PipelineNode::Cross(cross),
        }
    }
}

impl From<Chain> for Pipeline {
    fn from(chain: Chain) -> Self {
        Self {
            node: PipelineNode::Chain(chain),
        }
    }
}

impl Transformer for Pipeline {
    fn fit(&mut self, df: &DataFrame) -> Result<()> {
        Self::fit(self, df)
    }

    fn transform(&self, df: &DataFrame) -> Result<FeatureMatrix> {
        Self::transform(self, df)
    }

    fn fit_transform(&mut self, df: &DataFrame) -> Result<FeatureMatrix> {
        Self::fit_transform(self, df)
    }

    fn fresh(&self) -> Box<dyn Transformer> {
        Box::new(self.unfitted())
    }
}
