#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/braid-rs/braid/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod csc;
pub mod error;
pub mod matrix;

pub use csc::CscMatrix;
pub use error::MatrixError;
pub use matrix::FeatureMatrix;
