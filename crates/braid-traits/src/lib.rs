#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/braid-rs/braid/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod transformer;

pub use braid_matrix::FeatureMatrix;
pub use error::{Result, TransformError};
pub use transformer::{MatrixTransformer, Transformer};
