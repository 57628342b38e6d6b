//! Intent labels and the fixed training corpus.
//!
//! The trainable labels are the four conversational buckets. `Default` is the
//! fallback for low-confidence predictions and `Crisis` is produced only by the
//! router when a crisis keyword is found.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Resolved intent of a user message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Anxious feelings (anxious, worried, etc.)
    Anxiety,
    /// Greeting (hello, hi, good morning, etc.)
    Greeting,
    /// Low mood (sad, feeling low, etc.)
    Sadness,
    /// Stress (stressed, overwhelmed, etc.)
    Stress,
    /// Fallback when the classifier is not confident enough
    Default,
    /// Synthetic label for messages caught by the crisis filter
    #[serde(rename = "Crisis")]
    Crisis,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Labels a classifier may be trained on.
    pub const TRAINABLE: [Intent; 4] = [
        Intent::Anxiety,
        Intent::Greeting,
        Intent::Sadness,
        Intent::Stress,
    ];

    /// Every label a classifier can resolve to, fallback included.
    pub const PRODUCIBLE: [Intent; 5] = [
        Intent::Anxiety,
        Intent::Greeting,
        Intent::Sadness,
        Intent::Stress,
        Intent::Default,
    ];

    /// Returns the label as shown in logs and tables
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Anxiety => "anxiety",
            Intent::Greeting => "greeting",
            Intent::Sadness => "sadness",
            Intent::Stress => "stress",
            Intent::Default => "default",
            Intent::Crisis => "Crisis",
        }
    }

    pub fn is_trainable(&self) -> bool {
        Self::TRAINABLE.contains(self)
    }
}

impl FromStr for Intent {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anxiety" => Ok(Intent::Anxiety),
            "greeting" => Ok(Intent::Greeting),
            "sadness" => Ok(Intent::Sadness),
            "stress" => Ok(Intent::Stress),
            "default" => Ok(Intent::Default),
            "crisis" => Ok(Intent::Crisis),
            other => Err(AppError::Validation(format!("Unknown intent label: {}", other))),
        }
    }
}

/// A labelled training sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentExample {
    pub text: String,
    pub label: Intent,
}

impl IntentExample {
    pub fn new(text: impl Into<String>, label: Intent) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

const BUILTIN_EXAMPLES: &[(&str, Intent)] = &[
    ("I feel stressed", Intent::Stress),
    ("I'm anxious", Intent::Anxiety),
    ("Hello", Intent::Greeting),
    ("Hi", Intent::Greeting),
    ("I'm sad", Intent::Sadness),
    ("Feeling low", Intent::Sadness),
    ("I'm overwhelmed", Intent::Stress),
    ("Good morning", Intent::Greeting),
];

/// The built-in training corpus.
pub fn builtin_examples() -> Vec<IntentExample> {
    BUILTIN_EXAMPLES
        .iter()
        .map(|(text, label)| IntentExample::new(*text, *label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for intent in Intent::PRODUCIBLE {
            assert_eq!(intent.label().parse::<Intent>().unwrap(), intent);
        }
        assert_eq!("Crisis".parse::<Intent>().unwrap(), Intent::Crisis);
        assert!("joy".parse::<Intent>().is_err());
    }

    #[test]
    fn test_builtin_corpus_is_trainable() {
        let examples = builtin_examples();
        assert_eq!(examples.len(), 8);
        assert!(examples.iter().all(|e| e.label.is_trainable()));
        assert!(!Intent::Default.is_trainable());
        assert!(!Intent::Crisis.is_trainable());
    }

    #[test]
    fn test_crisis_serializes_capitalized() {
        let json = serde_json::to_string(&Intent::Crisis).unwrap();
        assert_eq!(json, "\"Crisis\"");
        let json = serde_json::to_string(&Intent::Greeting).unwrap();
        assert_eq!(json, "\"greeting\"");
    }
}
