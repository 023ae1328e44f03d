//! Named feature constructors.
//!
//! Each constructor returns an unfitted leaf [`Pipeline`] ready for
//! composition. Leaf names are derived from the constructor and its
//! column(s), so blocks stay identifiable in split marks.

use braid_encoders::{
    CountVectorizer, CountVectorizerConfig, OneHotEncoder, SeasonalEncoder, SelectColumns,
};

use crate::pipeline::Pipeline;

/// Yearly seasonal features from a `%Y-%m-%d` date column, as a periodic
/// spline basis with `n_knots` knots (width `n_knots - 1`).
pub fn seasonal(column: &str, n_knots: usize) -> Pipeline {
    Pipeline::leaf(
        format!("seasonal({column})"),
        SeasonalEncoder::new(column, n_knots),
    )
}

/// Numeric columns selected from the input as-is.
pub fn columns<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Pipeline {
    let names: Vec<String> = names
        .into_iter()
        .map(|name| name.as_ref().to_string())
        .collect();
    let label = format!("columns({})", names.join(","));
    Pipeline::leaf(label, SelectColumns::new(names))
}

/// One-hot encoded categorical columns, as a sparse block.
pub fn one_hot<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Pipeline {
    let names: Vec<String> = names
        .into_iter()
        .map(|name| name.as_ref().to_string())
        .collect();
    let label = format!("one_hot({})", names.join(","));
    Pipeline::leaf(label, OneHotEncoder::new(names))
}

/// Bag-of-words counts over a text column, as a sparse block.
pub fn bag_of_words(column: &str) -> Pipeline {
    Pipeline::leaf(
        format!("bag_of_words({column})"),
        CountVectorizer::new(column),
    )
}

/// Bag-of-words counts with explicit vectorizer configuration.
pub fn bag_of_words_with(column: &str, config: CountVectorizerConfig) -> Pipeline {
    Pipeline::leaf(
        format!("bag_of_words({column})"),
        CountVectorizer::with_config(column, config),
    )
}
