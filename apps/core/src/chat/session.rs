//! Session-scoped conversation log.
//!
//! A `Session` is created when the user starts chatting, mutated only by the
//! router, and dropped at the end. Nothing here touches disk.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brain::Intent;
use crate::sentiment::{Sentiment, SentimentLabel};

/// Time format used in tables and the mood timeline
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// One routed message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub timestamp: DateTime<Local>,
    pub user_input: String,
    /// `None` when the crisis filter short-circuited sentiment scoring
    pub sentiment_label: Option<SentimentLabel>,
    pub sentiment_score: Option<f64>,
    pub intent: Intent,
    pub response_text: String,
}

impl ConversationRecord {
    pub fn new(
        user_input: &str,
        sentiment: Option<Sentiment>,
        intent: Intent,
        response_text: &str,
    ) -> Self {
        Self {
            timestamp: Local::now(),
            user_input: user_input.to_string(),
            sentiment_label: sentiment.map(|s| s.label),
            sentiment_score: sentiment.map(|s| s.score),
            intent,
            response_text: response_text.to_string(),
        }
    }

    pub fn time(&self) -> String {
        self.timestamp.format(TIME_FORMAT).to_string()
    }
}

/// A point on the mood timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodPoint {
    pub time: String,
    /// POSITIVE = 1, NEUTRAL = 0, NEGATIVE = -1
    pub value: i8,
}

/// An interactive chat session and its append-only log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Local>,
    log: Vec<ConversationRecord>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Local::now(),
            log: Vec::new(),
        }
    }

    pub(crate) fn append(&mut self, record: ConversationRecord) {
        self.log.push(record);
    }

    /// Records in insertion order
    pub fn log(&self) -> &[ConversationRecord] {
        &self.log
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Sentiment over time; crisis records carry no sentiment and are skipped.
    pub fn mood_timeline(&self) -> Vec<MoodPoint> {
        self.log
            .iter()
            .filter_map(|r| {
                r.sentiment_label.map(|label| MoodPoint {
                    time: r.time(),
                    value: label.value(),
                })
            })
            .collect()
    }

    /// The log as JSON lines, oldest first
    pub fn export_jsonl(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for record in &self.log {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }
        Ok(out)
    }
}
