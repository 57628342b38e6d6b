//! Keyword-based crisis filter.
//!
//! A message is flagged when its lowercase form contains any configured
//! phrase as a plain substring. No tokenisation, so "end it" also matches
//! "spend it".

use serde::{Deserialize, Serialize};

/// Phrases that route a message straight to the crisis reply.
pub const DEFAULT_CRISIS_KEYWORDS: &[&str] =
    &["suicide", "kill myself", "end it", "hopeless", "give up"];

/// Reply shown for any flagged message.
pub const CRISIS_MESSAGE: &str = "[\u{26a0}\u{fe0f} Crisis Detected] Please seek immediate help.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisFilter {
    /// Lowercased, non-empty phrases
    keywords: Vec<String>,
}

impl Default for CrisisFilter {
    fn default() -> Self {
        Self::new(DEFAULT_CRISIS_KEYWORDS.iter().copied())
    }
}

impl CrisisFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// Returns the first configured phrase found in `text`.
    pub fn detect(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.keywords
            .iter()
            .find(|k| lower.contains(k.as_str()))
            .map(|k| k.as_str())
    }

    pub fn is_crisis(&self, text: &str) -> bool {
        self.detect(text).is_some()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_substring() {
        let filter = CrisisFilter::default();
        assert_eq!(filter.detect("I want to GIVE UP"), Some("give up"));
        assert_eq!(filter.detect("everything feels Hopeless."), Some("hopeless"));
        assert!(filter.is_crisis("I'll spend it all"));
    }

    #[test]
    fn test_clean_text() {
        let filter = CrisisFilter::default();
        assert!(filter.detect("I feel stressed").is_none());
        assert!(filter.detect("").is_none());
    }

    #[test]
    fn test_custom_keywords_are_normalised() {
        let filter = CrisisFilter::new(["  Self Harm ", "", "   "]);
        assert_eq!(filter.keywords(), &["self harm".to_string()]);
        assert!(filter.is_crisis("thinking about self harm"));
    }
}
