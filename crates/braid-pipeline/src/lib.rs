#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/braid-rs/braid/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chain;
pub mod cross;
pub mod features;
pub mod pipeline;
pub mod union;

pub use chain::Chain;
pub use cross::{CrossProduct, PROBE_ROWS, SplitMark};
pub use pipeline::{Pipeline, PipelineNode};
pub use union::{FeatureUnion, NamedTransformer};
