#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/braid-rs/braid/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod datetime;
pub mod onehot;
pub mod scale;
pub mod seasonal;
pub mod select;
pub mod spline;
pub mod text;

pub use onehot::OneHotEncoder;
pub use scale::StandardScaler;
pub use seasonal::{DEFAULT_SEASONAL_KNOTS, SeasonalEncoder};
pub use select::SelectColumns;
pub use spline::PeriodicSplineBasis;
pub use text::{CountVectorizer, CountVectorizerConfig};
