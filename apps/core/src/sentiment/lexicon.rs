//! Lexicon-based sentiment backend.
//!
//! Counts positive and negative words. Used when no hosted model is
//! configured; never fails.

use std::collections::HashSet;

use super::{Sentiment, SentimentAnalyzer, SentimentLabel};
use crate::brain::tfidf::tokenize;
use crate::error::AppError;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "happy", "better", "calm", "relaxed", "love", "glad", "hopeful", "excited",
    "grateful", "fine", "wonderful", "amazing", "awesome", "peaceful", "proud", "joy", "thanks",
    "thank", "nice", "best", "fantastic", "excellent", "cheerful", "confident",
];

const NEGATIVE_WORDS: &[&str] = &[
    "sad", "stressed", "anxious", "overwhelmed", "tired", "lonely", "depressed", "angry",
    "worried", "bad", "awful", "terrible", "hate", "low", "scared", "hopeless", "upset",
    "exhausted", "afraid", "cry", "crying", "hurt", "worst", "miserable", "nervous", "panic",
    "horrible", "empty",
];

pub struct LexiconSentiment {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
}

impl Default for LexiconSentiment {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconSentiment {
    pub fn new() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
        }
    }

    fn score(&self, text: &str) -> Sentiment {
        let mut positive_hits = 0usize;
        let mut negative_hits = 0usize;
        for token in tokenize(text) {
            if self.positive.contains(token.as_str()) {
                positive_hits += 1;
            } else if self.negative.contains(token.as_str()) {
                negative_hits += 1;
            }
        }

        let total = (positive_hits + negative_hits) as f64;
        if total == 0.0 {
            return Sentiment::new(SentimentLabel::Neutral, 1.0);
        }

        let positive_share = positive_hits as f64 / total;
        if positive_hits > negative_hits {
            Sentiment::new(SentimentLabel::Positive, positive_share)
        } else if negative_hits > positive_hits {
            Sentiment::new(SentimentLabel::Negative, 1.0 - positive_share)
        } else {
            Sentiment::new(SentimentLabel::Neutral, 0.5)
        }
    }
}

impl SentimentAnalyzer for LexiconSentiment {
    fn analyze(&self, text: &str) -> Result<Sentiment, AppError> {
        Ok(self.score(text))
    }
}
