//! Bag-of-words text features.

use std::collections::HashMap;

use braid_matrix::{CscMatrix, FeatureMatrix};
use braid_traits::{Result, TransformError, Transformer};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Configuration for [`CountVectorizer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountVectorizerConfig {
    /// Lowercase text before tokenizing (default: true)
    pub lowercase: bool,
    /// Minimum token length in characters (default: 2)
    pub min_token_len: usize,
    /// Inclusive n-gram range (default: unigrams only)
    pub ngram_range: (usize, usize),
    /// Keep only the most frequent terms (default: unlimited)
    pub max_features: Option<usize>,
    /// Record term presence instead of counts (default: false)
    pub binary: bool,
}

impl Default for CountVectorizerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            min_token_len: 2,
            ngram_range: (1, 1),
            max_features: None,
            binary: false,
        }
    }
}

/// Bag-of-words term counts over a text column, as a sparse block.
///
/// `fit` builds a lexicographically sorted vocabulary from the training
/// documents; `transform` emits one count column per vocabulary term.
/// Tokens not in the vocabulary are skipped, so unseen words are not an
/// error. Output width equals the vocabulary size for any row count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountVectorizer {
    column: String,
    config: CountVectorizerConfig,
    vocabulary: Option<Vec<String>>,
}

impl CountVectorizer {
    /// Vectorize the given text column with default configuration.
    pub fn new(column: impl Into<String>) -> Self {
        Self::with_config(column, CountVectorizerConfig::default())
    }

    /// Vectorize the given text column with the given configuration.
    pub fn with_config(column: impl Into<String>, config: CountVectorizerConfig) -> Self {
        Self {
            column: column.into(),
            config,
            vocabulary: None,
        }
    }

    /// The fitted vocabulary, in output-column order.
    pub fn vocabulary(&self) -> Option<&[String]> {
        self.vocabulary.as_deref()
    }

    fn documents(df: &DataFrame, column: &str) -> Result<Vec<String>> {
        let series = df.column(column)?.as_materialized_series();
        let ca = series.str()?;
        let mut out = Vec::with_capacity(ca.len());
        for value in ca {
            let Some(v) = value else {
                return Err(TransformError::InvalidParameter(format!(
                    "null value in column '{column}'"
                )));
            };
            out.push(v.to_string());
        }
        Ok(out)
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let processed = if self.config.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let tokens: Vec<&str> = processed
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty() && t.len() >= self.config.min_token_len)
            .collect();

        let (lo, hi) = self.config.ngram_range;
        let mut terms = Vec::new();
        for n in lo..=hi {
            if tokens.len() >= n {
                for window in tokens.windows(n) {
                    terms.push(window.join(" "));
                }
            }
        }
        terms
    }
}

impl Transformer for CountVectorizer {
    fn fit(&mut self, df: &DataFrame) -> Result<()> {
        let (lo, hi) = self.config.ngram_range;
        if lo == 0 || lo > hi {
            return Err(TransformError::InvalidParameter(format!(
                "invalid n-gram range ({lo}, {hi})"
            )));
        }

        let documents = Self::documents(df, &self.column)?;
        let mut counts: HashMap<String, u64> = HashMap::new();
        for doc in &documents {
            for term in self.tokenize(doc) {
                *counts.entry(term).or_insert(0) += 1;
            }
        }
        if counts.is_empty() {
            return Err(TransformError::InvalidParameter(format!(
                "empty vocabulary for column '{}'",
                self.column
            )));
        }

        let mut vocabulary: Vec<String> = match self.config.max_features {
            Some(limit) if counts.len() > limit => {
                // Most frequent first, ties broken alphabetically.
                let mut by_count: Vec<(String, u64)> = counts.into_iter().collect();
                by_count.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                by_count.truncate(limit);
                by_count.into_iter().map(|(term, _)| term).collect()
            }
            _ => counts.into_keys().collect(),
        };
        vocabulary.sort();
        self.vocabulary = Some(vocabulary);
        Ok(())
    }

    fn transform(&self, df: &DataFrame) -> Result<FeatureMatrix> {
        let vocabulary = self
            .vocabulary
            .as_ref()
            .ok_or(TransformError::NotFitted("CountVectorizer"))?;
        let documents = Self::documents(df, &self.column)?;
        let mut triplets = Vec::new();
        for (row, doc) in documents.iter().enumerate() {
            let mut row_counts: HashMap<usize, f64> = HashMap::new();
            for term in self.tokenize(doc) {
                if let Ok(idx) = vocabulary.binary_search(&term) {
                    if self.config.binary {
                        row_counts.insert(idx, 1.0);
                    } else {
                        *row_counts.entry(idx).or_insert(0.0) += 1.0;
                    }
                }
            }
            triplets.extend(row_counts.into_iter().map(|(col, value)| (row, col, value)));
        }
        let matrix = CscMatrix::from_triplets(documents.len(), vocabulary.len(), triplets)?;
        Ok(FeatureMatrix::Sparse(matrix))
    }

    fn fresh(&self) -> Box<dyn Transformer> {
        Box::new(Self {
            column: self.column.clone(),
            config: self.config.clone(),
            vocabulary: None,
        })
    }
}
