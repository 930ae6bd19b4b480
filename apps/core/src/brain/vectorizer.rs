//! Bag-of-words feature encoder over a pre-fit vocabulary.
//!
//! Tokenization follows the usual count-vectorizer defaults: text is
//! lowercased and every run of two or more word characters is a token.
//! Tokens missing from the vocabulary are dropped.

use crate::error::{AppError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

// NOTE: expect() is acceptable here, the pattern is a compile-time constant.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid regex: token pattern"));

/// Fitted vocabulary: token -> feature index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vectorizer {
    vocabulary: HashMap<String, usize>,
}

impl Vectorizer {
    pub fn new(vocabulary: HashMap<String, usize>) -> Result<Self> {
        let vectorizer = Self { vocabulary };
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    /// Builds a vocabulary indexing tokens in the given order.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocabulary = HashMap::new();
        for token in tokens {
            let next = vocabulary.len();
            vocabulary.entry(token.into()).or_insert(next);
        }
        Self::new(vocabulary)
    }

    /// Vector length produced by [`Vectorizer::encode`].
    pub fn feature_count(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.vocabulary.get(token).copied()
    }

    /// Indices must form exactly `0..feature_count`.
    pub fn validate(&self) -> Result<()> {
        let size = self.feature_count();
        if size == 0 {
            return Err(AppError::Artifact("Vectorizer vocabulary is empty".to_string()));
        }

        let mut seen = HashSet::with_capacity(size);
        for (token, &index) in &self.vocabulary {
            if index >= size || !seen.insert(index) {
                return Err(AppError::Artifact(format!(
                    "Vectorizer index {} for token '{}' is out of range or duplicated",
                    index, token
                )));
            }
        }
        Ok(())
    }

    pub fn tokenize(text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        TOKEN_PATTERN
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Token counts for `text`, one slot per vocabulary entry.
    pub fn encode(&self, text: &str) -> Vec<f32> {
        let mut features = vec![0.0; self.feature_count()];
        for token in Self::tokenize(text) {
            if let Some(index) = self.index_of(&token) {
                features[index] += 1.0;
            }
        }
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer() -> Vectorizer {
        Vectorizer::from_tokens(["bug", "channel", "reports", "hello"]).unwrap()
    }

    #[test]
    fn test_tokenize_lowercases_and_skips_single_chars() {
        assert_eq!(
            Vectorizer::tokenize("Make a NEW channel, ok?"),
            vec!["make", "new", "channel", "ok"]
        );
    }

    #[test]
    fn test_encode_counts_known_tokens() {
        let v = vectorizer();
        let encoded = v.encode("Bug bug REPORTS please");
        assert_eq!(encoded, vec![2.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_unknown_tokens_are_dropped() {
        let v = vectorizer();
        assert_eq!(v.encode("completely unrelated words"), vec![0.0; 4]);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let v = vectorizer();
        let text = "hello channel hello";
        assert_eq!(v.encode(text), v.encode(text));
        assert_eq!(v.encode(text).len(), v.feature_count());
    }

    #[test]
    fn test_invalid_vocabularies_rejected() {
        assert!(Vectorizer::new(HashMap::new()).is_err());

        let mut gap = HashMap::new();
        gap.insert("a".to_string(), 0);
        gap.insert("b".to_string(), 2);
        assert!(matches!(Vectorizer::new(gap), Err(AppError::Artifact(_))));

        let mut dup = HashMap::new();
        dup.insert("a".to_string(), 0);
        dup.insert("b".to_string(), 0);
        assert!(Vectorizer::new(dup).is_err());
    }
}
