//! Static reply and recommendation tables.
//!
//! Both are keyed by intent and must hold a non-empty entry for every label a
//! classifier can resolve to, `Default` included. Tables that miss one are
//! rejected when built.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::brain::Intent;
use crate::error::AppError;

/// A link shown under the bot reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RecommendationEntry {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(url)]
    pub url: String,
}

impl RecommendationEntry {
    pub fn new(title: &str, url: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
        }
    }
}

fn check_coverage<T>(name: &str, table: &BTreeMap<Intent, Vec<T>>, labels: &[Intent]) -> Result<(), AppError> {
    for label in labels {
        match table.get(label) {
            Some(entries) if !entries.is_empty() => {}
            Some(_) => {
                return Err(AppError::ConfigurationDefect(format!(
                    "{} has an empty entry for '{}'",
                    name, label
                )))
            }
            None => {
                return Err(AppError::ConfigurationDefect(format!(
                    "{} has no entry for '{}'",
                    name, label
                )))
            }
        }
    }
    Ok(())
}

/// Candidate replies per intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseTable {
    entries: BTreeMap<Intent, Vec<String>>,
}

impl ResponseTable {
    pub fn new(entries: BTreeMap<Intent, Vec<String>>) -> Result<Self, AppError> {
        check_coverage("response table", &entries, &Intent::PRODUCIBLE)?;
        Ok(Self { entries })
    }

    /// Fail unless every one of `labels` has candidates.
    pub fn ensure_covers(&self, labels: &[Intent]) -> Result<(), AppError> {
        check_coverage("response table", &self.entries, labels)
    }

    /// Candidates for `intent`, falling back to the default bucket.
    pub fn candidates(&self, intent: Intent) -> &[String] {
        self.entries
            .get(&intent)
            .or_else(|| self.entries.get(&Intent::Default))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for ResponseTable {
    fn default() -> Self {
        let entries: BTreeMap<Intent, Vec<String>> = [
            (Intent::Greeting, "Hi there! How can I support you today?"),
            (Intent::Stress, "Stress is tough. Let\u{2019}s take a deep breath together."),
            (Intent::Anxiety, "It\u{2019}s okay to feel anxious. I'm here with you."),
            (Intent::Sadness, "I\u{2019}m sorry you feel this way. Want to talk more about it?"),
            (Intent::Default, "Tell me more, I'm listening."),
        ]
        .into_iter()
        .map(|(intent, reply)| (intent, vec![reply.to_string()]))
        .collect();
        Self { entries }
    }
}

/// Ordered recommendations per intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationTable {
    entries: BTreeMap<Intent, Vec<RecommendationEntry>>,
}

impl RecommendationTable {
    pub fn new(entries: BTreeMap<Intent, Vec<RecommendationEntry>>) -> Result<Self, AppError> {
        check_coverage("recommendation table", &entries, &Intent::PRODUCIBLE)?;
        for entry in entries.values().flatten() {
            entry.validate()?;
        }
        Ok(Self { entries })
    }

    pub fn ensure_covers(&self, labels: &[Intent]) -> Result<(), AppError> {
        check_coverage("recommendation table", &self.entries, labels)
    }

    /// Recommendations for `intent`; intents without their own list
    /// (`Crisis`) get the default list.
    pub fn lookup(&self, intent: Intent) -> &[RecommendationEntry] {
        self.entries
            .get(&intent)
            .or_else(|| self.entries.get(&Intent::Default))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for RecommendationTable {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            Intent::Greeting,
            vec![RecommendationEntry::new(
                "Mental Health Playlist",
                "https://www.youtube.com/playlist?list=PLFzWFredxyJlR9L1_LPODw_JH6XkUnYVX",
            )],
        );
        entries.insert(
            Intent::Stress,
            vec![
                RecommendationEntry::new("5-Minute Meditation", "https://www.youtube.com/watch?v=inpok4MKVLM"),
                RecommendationEntry::new("Stretch & Relax", "https://www.youtube.com/watch?v=qHJ992N-Dhs"),
            ],
        );
        entries.insert(
            Intent::Anxiety,
            vec![
                RecommendationEntry::new("Anxiety Relief Music", "https://www.youtube.com/watch?v=ZToicYcHIOU"),
                RecommendationEntry::new("Grounding Exercise", "https://www.youtube.com/watch?v=KZXT7L4s0bY"),
            ],
        );
        entries.insert(
            Intent::Sadness,
            vec![
                RecommendationEntry::new("Uplifting Music", "https://www.youtube.com/watch?v=UfcAVejslrU"),
                RecommendationEntry::new("Talk on Depression", "https://www.youtube.com/watch?v=XiCrniLQGYc"),
            ],
        );
        entries.insert(
            Intent::Default,
            vec![RecommendationEntry::new(
                "Mental Health Playlist",
                "https://www.youtube.com/playlist?list=PLFzWFredxyJlR9L1_LPODw_JH6XkUnYVX",
            )],
        );
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_producible_label() {
        let responses = ResponseTable::default();
        let recommendations = RecommendationTable::default();
        for intent in Intent::PRODUCIBLE {
            assert!(!responses.candidates(intent).is_empty(), "{}", intent);
            assert!(!recommendations.lookup(intent).is_empty(), "{}", intent);
        }
        assert!(responses.ensure_covers(&Intent::PRODUCIBLE).is_ok());
        assert!(recommendations.ensure_covers(&Intent::PRODUCIBLE).is_ok());
    }

    #[test]
    fn test_missing_default_is_a_defect() {
        let mut entries = BTreeMap::new();
        for intent in Intent::TRAINABLE {
            entries.insert(intent, vec!["reply".to_string()]);
        }
        let err = ResponseTable::new(entries).unwrap_err();
        assert!(matches!(err, AppError::ConfigurationDefect(_)));
    }

    #[test]
    fn test_empty_bucket_is_a_defect() {
        let mut entries = BTreeMap::new();
        for intent in Intent::PRODUCIBLE {
            entries.insert(intent, vec![RecommendationEntry::new("t", "https://example.com")]);
        }
        entries.insert(Intent::Stress, vec![]);
        assert!(matches!(
            RecommendationTable::new(entries),
            Err(AppError::ConfigurationDefect(_))
        ));
    }

    #[test]
    fn test_bad_url_rejected() {
        let mut entries = BTreeMap::new();
        for intent in Intent::PRODUCIBLE {
            entries.insert(intent, vec![RecommendationEntry::new("t", "not a url")]);
        }
        assert!(RecommendationTable::new(entries).is_err());
    }

    #[test]
    fn test_crisis_uses_default_recommendations() {
        let table = RecommendationTable::default();
        assert_eq!(table.lookup(Intent::Crisis), table.lookup(Intent::Default));
    }
}
