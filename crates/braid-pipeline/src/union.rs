//! Feature unions of named transformers.

use std::collections::HashSet;
use std::fmt;

use braid_matrix::FeatureMatrix;
use braid_traits::{Result, TransformError, Transformer};
use polars::prelude::DataFrame;

/// A transformer paired with the name that identifies its output block
/// inside a union.
pub struct NamedTransformer {
    name: String,
    transformer: Box<dyn Transformer>,
}

impl NamedTransformer {
    /// Pair a transformer with a name.
    pub fn new(name: impl Into<String>, transformer: impl Transformer + 'static) -> Self {
        Self::from_boxed(name, Box::new(transformer))
    }

    /// Pair an already-boxed transformer with a name.
    pub fn from_boxed(name: impl Into<String>, transformer: Box<dyn Transformer>) -> Self {
        Self {
            name: name.into(),
            transformer,
        }
    }

    /// The member name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wrapped transformer.
    pub fn transformer(&self) -> &dyn Transformer {
        self.transformer.as_ref()
    }

    pub(crate) fn transformer_mut(&mut self) -> &mut dyn Transformer {
        self.transformer.as_mut()
    }

    /// A parameter-preserving unfitted copy.
    pub fn fresh(&self) -> Self {
        Self {
            name: self.name.clone(),
            transformer: self.transformer.fresh(),
        }
    }
}

impl fmt::Debug for NamedTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedTransformer")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Horizontal concatenation of named transformers' output blocks.
///
/// Members keep their construction order; that order fixes the column
/// layout of the concatenated output. Member names are normalized at
/// construction: a duplicate gets a `-2`, `-3`, ... suffix in member
/// order, so building a union incrementally or from a complete member
/// list yields the same names.
pub struct FeatureUnion {
    members: Vec<NamedTransformer>,
}

impl FeatureUnion {
    /// Build a union over the given members, normalizing duplicate names.
    pub fn from_members(members: Vec<NamedTransformer>) -> Self {
        let mut taken: HashSet<String> = HashSet::new();
        let mut normalized = Vec::with_capacity(members.len());
        for member in members {
            let base = member.name;
            let name = if taken.contains(&base) {
                let mut k = 2;
                loop {
                    let candidate = format!("{base}-{k}");
                    if !taken.contains(&candidate) {
                        break candidate;
                    }
                    k += 1;
                }
            } else {
                base
            };
            taken.insert(name.clone());
            normalized.push(NamedTransformer {
                name,
                transformer: member.transformer,
            });
        }
        Self {
            members: normalized,
        }
    }

    /// The members, in output-block order.
    pub fn members(&self) -> &[NamedTransformer] {
        &self.members
    }

    /// Parameter-preserving unfitted copies of every member, in order.
    pub fn fresh_members(&self) -> Vec<NamedTransformer> {
        self.members.iter().map(NamedTransformer::fresh).collect()
    }
}

impl fmt::Debug for FeatureUnion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.members.iter().map(NamedTransformer::name))
            .finish()
    }
}

impl Transformer for FeatureUnion {
    fn fit(&mut self, df: &DataFrame) -> Result<()> {
        if self.members.is_empty() {
            return Err(TransformError::InvalidParameter(
                "feature union has no members".to_string(),
            ));
        }
        for member in &mut self.members {
            member.transformer.fit(df)?;
        }
        Ok(())
    }

    fn transform(&self, df: &DataFrame) -> Result<FeatureMatrix> {
        let parts = self
            .members
            .iter()
            .map(|member| member.transformer.transform(df))
            .collect::<Result<Vec<_>>>()?;
        FeatureMatrix::hstack(&parts).map_err(Into::into)
    }

    fn fresh(&self) -> Box<dyn Transformer> {
        Box::new(Self {
            members: self.fresh_members(),
        })
    }
}
