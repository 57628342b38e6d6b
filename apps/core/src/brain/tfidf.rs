//! TF-IDF vectorizer fitted on a small corpus.
//!
//! Tokens are lowercase runs of two or more word characters. IDF is smoothed
//! (`ln((1 + n) / (1 + df)) + 1`) and every row is L2-normalised, so a text with
//! no known terms maps to the zero vector.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

// NOTE: expect() is acceptable here: the pattern is a literal.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid regex: token pattern"));

/// Split text into lowercase word tokens
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Fitted vocabulary with per-term inverse document frequencies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// term -> column index, columns ordered alphabetically
    vocab: HashMap<String, usize>,
    idf_diag: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fit vocabulary and IDF weights on a corpus
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let tokenized: Vec<BTreeSet<String>> = documents
            .iter()
            .map(|d| tokenize(d.as_ref()).into_iter().collect())
            .collect();

        let terms: BTreeSet<&String> = tokenized.iter().flatten().collect();
        let vocab: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();

        let n_docs = documents.len() as f64;
        let mut doc_freq = vec![0usize; vocab.len()];
        for doc in &tokenized {
            for term in doc {
                if let Some(&col) = vocab.get(term) {
                    doc_freq[col] += 1;
                }
            }
        }

        let idf_diag = doc_freq
            .into_iter()
            .map(|df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        Self { vocab, idf_diag }
    }

    /// Number of feature columns
    pub fn dimension(&self) -> usize {
        self.idf_diag.len()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.vocab.contains_key(term)
    }

    /// Project text into the fitted feature space
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut row = vec![0.0; self.dimension()];
        for token in tokenize(text) {
            if let Some(&col) = self.vocab.get(&token) {
                row[col] += 1.0;
            }
        }

        for (value, idf) in row.iter_mut().zip(&self.idf_diag) {
            *value *= idf;
        }

        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in row.iter_mut() {
                *value /= norm;
            }
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_single_chars() {
        assert_eq!(tokenize("I'm anxious"), vec!["anxious"]);
        assert_eq!(tokenize("Good  Morning!"), vec!["good", "morning"]);
        assert!(tokenize("a b c").is_empty());
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let vectorizer = TfidfVectorizer::fit(&["zebra apple", "mango"]);
        assert_eq!(vectorizer.dimension(), 3);
        let row = vectorizer.transform("apple");
        assert!((row[0] - 1.0).abs() < 1e-12);
        assert_eq!(row[1], 0.0);
        assert_eq!(row[2], 0.0);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let vectorizer = TfidfVectorizer::fit(&["I feel stressed", "Feeling low", "Hello"]);
        let row = vectorizer.transform("feel stressed and low");
        let norm: f64 = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_text_is_zero_vector() {
        let vectorizer = TfidfVectorizer::fit(&["Hello", "Hi"]);
        let row = vectorizer.transform("purple elephant shoes");
        assert!(row.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_smoothed_idf() {
        let vectorizer = TfidfVectorizer::fit(&["common rare", "common"]);
        // common: df = 2 of 2, rare: df = 1 of 2
        let common = vectorizer.idf_diag[0];
        let rare = vectorizer.idf_diag[1];
        assert!((common - 1.0).abs() < 1e-12);
        assert!((rare - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }
}
