//! # Sentiment Module
//!
//! The router treats sentiment as a black box behind [`SentimentAnalyzer`].
//!
//! ## Backends
//! - `lexicon`: offline word-list scoring (default)
//! - `http`: hosted inference endpoint (Hugging Face style)

pub mod http;
pub mod lexicon;

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::config::{AppConfig, SentimentBackend};
use crate::error::AppError;

pub use http::HttpSentiment;
pub use lexicon::LexiconSentiment;

/// Polarity reported by a sentiment backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
        }
    }

    /// Numeric value plotted on the mood timeline
    pub fn value(&self) -> i8 {
        match self {
            SentimentLabel::Positive => 1,
            SentimentLabel::Neutral => 0,
            SentimentLabel::Negative => -1,
        }
    }

    /// Map a backend label onto the three known polarities.
    /// Unrecognised labels degrade to `Neutral`.
    pub fn from_backend(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "POSITIVE" | "POS" => SentimentLabel::Positive,
            "NEGATIVE" | "NEG" => SentimentLabel::Negative,
            "NEUTRAL" | "NEU" => SentimentLabel::Neutral,
            other => {
                warn!("Unrecognised sentiment label '{}', treating as NEUTRAL", other);
                SentimentLabel::Neutral
            }
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentiment of one message
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    /// Backend confidence in `label` (0.0 - 1.0)
    pub score: f64,
}

impl Sentiment {
    pub fn new(label: SentimentLabel, score: f64) -> Self {
        Self {
            label,
            score: score.clamp(0.0, 1.0),
        }
    }
}

/// Defines the public interface for a sentiment backend.
///
/// Calls are blocking. Failures to reach the backend are reported as
/// [`AppError::UpstreamUnavailable`].
pub trait SentimentAnalyzer {
    fn analyze(&self, text: &str) -> Result<Sentiment, AppError>;
}

impl<T: SentimentAnalyzer + ?Sized> SentimentAnalyzer for Box<T> {
    fn analyze(&self, text: &str) -> Result<Sentiment, AppError> {
        (**self).analyze(text)
    }
}

/// Build the backend selected in the configuration.
pub fn from_config(config: &AppConfig) -> Result<Box<dyn SentimentAnalyzer>, AppError> {
    match config.sentiment_backend {
        SentimentBackend::Lexicon => Ok(Box::new(LexiconSentiment::new())),
        SentimentBackend::Http => {
            let url = config.sentiment_url.clone().ok_or_else(|| {
                AppError::Config("CAREBOT_SENTIMENT_URL is required for the http backend".to_string())
            })?;
            let backend = HttpSentiment::new(url, config.sentiment_token.clone(), config.sentiment_timeout())?;
            Ok(Box::new(backend))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_labels() {
        assert_eq!(SentimentLabel::from_backend("positive"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_backend("NEGATIVE"), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_backend("LABEL_7"), SentimentLabel::Neutral);
    }

    #[test]
    fn test_timeline_values() {
        assert_eq!(SentimentLabel::Positive.value(), 1);
        assert_eq!(SentimentLabel::Neutral.value(), 0);
        assert_eq!(SentimentLabel::Negative.value(), -1);
    }

    #[test]
    fn test_score_is_clamped() {
        assert_eq!(Sentiment::new(SentimentLabel::Positive, 1.7).score, 1.0);
        assert_eq!(Sentiment::new(SentimentLabel::Negative, -0.2).score, 0.0);
    }
}
