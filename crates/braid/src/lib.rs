#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/braid-rs/braid/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export member crates under short module names
pub use braid_encoders as encoders;
pub use braid_matrix as matrix;
pub use braid_pipeline as pipeline;
pub use braid_traits as traits;

// Re-export the common types at the root
pub use braid_encoders::{
    CountVectorizer, CountVectorizerConfig, OneHotEncoder, SeasonalEncoder, SelectColumns,
    StandardScaler,
};
pub use braid_matrix::{CscMatrix, FeatureMatrix, MatrixError};
pub use braid_pipeline::{
    Chain, CrossProduct, FeatureUnion, NamedTransformer, Pipeline, PipelineNode, SplitMark,
    features,
};
pub use braid_traits::{MatrixTransformer, Result, TransformError, Transformer};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
