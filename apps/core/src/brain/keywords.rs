//! Keyword frequencies for free-text survey answers.
//!
//! Produces the term/weight pairs a word cloud would be drawn from: stopwords
//! removed, counts aggregated across all answers, weights relative to the most
//! frequent term.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::tfidf::tokenize;

/// Stopwords for English language
const STOPWORDS_EN: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "nor", "for", "yet", "so", "i", "you", "he", "she", "it",
    "we", "they", "me", "him", "her", "us", "them", "my", "your", "his", "her", "its", "our",
    "their", "mine", "yours", "hers", "ours", "theirs", "this", "that", "these", "those", "who",
    "whom", "which", "what", "whose", "is", "am", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "having", "do", "does", "did", "doing", "will", "would", "shall",
    "should", "can", "could", "may", "might", "must", "in", "on", "at", "to", "from", "by", "with",
    "about", "against", "between", "into", "through", "during", "before", "after", "above",
    "below", "up", "down", "out", "off", "over", "under", "again", "further", "here", "there",
    "where", "when", "why", "how", "all", "each", "every", "both", "few", "more", "most", "other",
    "some", "any", "no", "not", "only", "own", "same", "than", "too", "very", "just", "also",
    "now", "then", "once", "always", "never", "if", "because", "as", "until", "while", "although",
    "though", "yes", "maybe", "im", "ive", "dont", "lately", "really", "get", "got", "lot",
];

static STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS_EN.iter().copied().collect());

/// One term of the extracted keyword set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordResult {
    /// The keyword
    pub keyword: String,
    /// Raw count across all answers
    pub frequency: usize,
    /// Frequency relative to the most frequent keyword (0.0 - 1.0]
    pub weight: f32,
}

/// Frequency-based keyword extractor
pub struct KeywordExtractor {
    min_word_length: usize,
    max_keywords: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self::with_config(3, 50)
    }

    pub fn with_config(min_word_length: usize, max_keywords: usize) -> Self {
        Self {
            min_word_length,
            max_keywords,
        }
    }

    fn keep(&self, word: &str) -> bool {
        word.chars().count() >= self.min_word_length
            && !STOPWORDS.contains(word)
            && !word.chars().all(|c| c.is_numeric())
    }

    /// Extract the top keywords across several texts
    pub fn extract<S: AsRef<str>>(&self, texts: &[S]) -> Vec<KeywordResult> {
        let mut freq: HashMap<String, usize> = HashMap::new();
        for text in texts {
            // Strip apostrophes so "don't" folds into a single stopword
            let folded = text.as_ref().replace(['\'', '\u{2019}'], "");
            for word in tokenize(&folded) {
                if self.keep(&word) {
                    *freq.entry(word).or_insert(0) += 1;
                }
            }
        }

        let max = freq.values().copied().max().unwrap_or(0);
        if max == 0 {
            return vec![];
        }

        let mut results: Vec<KeywordResult> = freq
            .into_iter()
            .map(|(keyword, frequency)| KeywordResult {
                keyword,
                frequency,
                weight: frequency as f32 / max as f32,
            })
            .collect();

        // Most frequent first, alphabetical among equals
        results.sort_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then_with(|| a.keyword.cmp(&b.keyword))
        });
        results.truncate(self.max_keywords);
        results
    }
}
