//! The cross-product transformer and its column-block tracker.
//!
//! A cross-product multiplies features from different named blocks. Given
//! seasonal features and a one-hot weekday, it produces seasonal features
//! per weekday: for every unordered pair of member blocks, every column of
//! the second block is broadcast-multiplied against the whole first block,
//! and all the resulting column batches are concatenated.

use std::fmt;
use std::ops::Range;

use braid_matrix::FeatureMatrix;
use braid_traits::{Result, TransformError, Transformer};
use polars::prelude::DataFrame;

use crate::union::{FeatureUnion, NamedTransformer};

/// Number of probe rows used to learn member output widths at fit time.
pub const PROBE_ROWS: usize = 2;

/// A member's column range inside the concatenated union output.
///
/// The marks of a fitted cross-product tile `0..total_width` contiguously
/// in member order, with no gaps or overlaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitMark {
    name: String,
    range: Range<usize>,
}

impl SplitMark {
    /// The member name this mark belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The half-open column range of the member's block.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// The block width.
    pub fn width(&self) -> usize {
        self.range.len()
    }
}

/// Pairwise products between the blocks of a union of named transformers.
///
/// `fit` fits the inner union on the full input, then transforms a
/// [`PROBE_ROWS`]-row probe slice through each member to learn its output
/// width cheaply, recording one [`SplitMark`] per member. `transform`
/// concatenates the member outputs, slices the fitted blocks back out,
/// and emits, for every unordered member pair in fit order, the
/// broadcast product of the first block against each column of the
/// second. Output column `k` of a pair maps to first-block column
/// `k % width(first)` and second-block column `k / width(first)`.
///
/// The probe shortcut assumes every member's output width is independent
/// of the input row count (see [`Transformer`]); `transform` re-checks
/// the concatenated width against the fitted total and fails with
/// [`TransformError::ProbeWidthMismatch`] if a member broke that
/// contract.
pub struct CrossProduct {
    union: FeatureUnion,
    marks: Option<Vec<SplitMark>>,
    union_width: Option<usize>,
}

impl CrossProduct {
    /// Build an unfitted cross-product over the given members.
    pub fn new(members: Vec<NamedTransformer>) -> Self {
        Self {
            union: FeatureUnion::from_members(members),
            marks: None,
            union_width: None,
        }
    }

    /// The members, in block order.
    pub fn members(&self) -> &[NamedTransformer] {
        self.union.members()
    }

    /// The fitted split marks, one per member in block order.
    pub fn split_marks(&self) -> Option<&[SplitMark]> {
        self.marks.as_deref()
    }

    /// The fitted width of the concatenated union output.
    pub const fn union_width(&self) -> Option<usize> {
        self.union_width
    }

    /// The fitted output width: the sum of `width(a) * width(b)` over all
    /// unordered member pairs.
    pub fn output_width(&self) -> Option<usize> {
        self.marks.as_ref().map(|marks| {
            let mut total = 0;
            for i in 0..marks.len() {
                for j in i + 1..marks.len() {
                    total += marks[i].width() * marks[j].width();
                }
            }
            total
        })
    }

    pub(crate) fn fresh_members(&self) -> Vec<NamedTransformer> {
        self.union.fresh_members()
    }
}

impl fmt::Debug for CrossProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrossProduct")
            .field("union", &self.union)
            .field("marks", &self.marks)
            .finish_non_exhaustive()
    }
}

impl Transformer for CrossProduct {
    fn fit(&mut self, df: &DataFrame) -> Result<()> {
        let member_count = self.union.members().len();
        if member_count < 2 {
            return Err(TransformError::CrossProductArity(member_count));
        }
        if df.height() < PROBE_ROWS {
            return Err(TransformError::InsufficientRows {
                required: PROBE_ROWS,
                actual: df.height(),
            });
        }

        self.union.fit(df)?;

        let probe = df.slice(0, PROBE_ROWS);
        let mut marks = Vec::with_capacity(member_count);
        let mut start = 0usize;
        for member in self.union.members() {
            let width = member.transformer().transform(&probe)?.ncols();
            marks.push(SplitMark {
                name: member.name().to_string(),
                range: start..start + width,
            });
            start += width;
        }
        self.marks = Some(marks);
        self.union_width = Some(start);
        Ok(())
    }

    fn transform(&self, df: &DataFrame) -> Result<FeatureMatrix> {
        let marks = self
            .marks
            .as_ref()
            .ok_or(TransformError::NotFitted("CrossProduct"))?;
        let union_width = self
            .union_width
            .ok_or(TransformError::NotFitted("CrossProduct"))?;

        let combined = self.union.transform(df)?;
        if combined.ncols() != union_width {
            return Err(TransformError::ProbeWidthMismatch {
                expected: union_width,
                actual: combined.ncols(),
            });
        }

        let blocks = marks
            .iter()
            .map(|mark| combined.slice_columns(mark.range()))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut batches = Vec::new();
        for i in 0..blocks.len() {
            for j in i + 1..blocks.len() {
                let (first, second) = (&blocks[i], &blocks[j]);
                for col in 0..second.ncols() {
                    let weights = second.column(col)?;
                    batches.push(first.scale_rows(&weights)?);
                }
            }
        }
        FeatureMatrix::hstack(&batches).map_err(Into::into)
    }

    fn fresh(&self) -> Box<dyn Transformer> {
        Box::new(Self::new(self.fresh_members()))
    }
}
