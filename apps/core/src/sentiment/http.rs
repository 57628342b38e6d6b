//! Hosted sentiment backend.
//!
//! Posts `{"inputs": "<text>"}` to a Hugging Face style text-classification
//! endpoint and keeps the highest-scoring label. The endpoint may answer with
//! either a flat list of `{label, score}` objects or a list of such lists.

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error};

use super::{Sentiment, SentimentAnalyzer, SentimentLabel};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl InferenceResponse {
    fn best(self) -> Option<LabelScore> {
        let candidates = match self {
            InferenceResponse::Nested(batches) => batches.into_iter().flatten().collect(),
            InferenceResponse::Flat(list) => list,
        };
        candidates.into_iter().fold(None, |best: Option<LabelScore>, c| match best {
            Some(b) if b.score >= c.score => Some(b),
            _ => Some(c),
        })
    }
}

pub struct HttpSentiment {
    client: Client,
    url: String,
    token: Option<String>,
}

impl HttpSentiment {
    /// `timeout` of `None` waits for the backend indefinitely.
    pub fn new(url: String, token: Option<String>, timeout: Option<Duration>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, url, token })
    }
}

impl SentimentAnalyzer for HttpSentiment {
    fn analyze(&self, text: &str) -> Result<Sentiment, AppError> {
        let mut request = self.client.post(&self.url).json(&json!({ "inputs": text }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            error!("Sentiment backend returned {}: {}", status, body);
            return Err(AppError::UpstreamUnavailable(format!(
                "sentiment backend returned {}",
                status
            )));
        }

        let best = response
            .json::<InferenceResponse>()
            .map_err(|e| AppError::UpstreamUnavailable(format!("unreadable sentiment payload: {}", e)))?
            .best()
            .ok_or_else(|| AppError::UpstreamUnavailable("empty sentiment payload".to_string()))?;

        debug!("Sentiment backend: {} ({:.3})", best.label, best.score);
        Ok(Sentiment::new(SentimentLabel::from_backend(&best.label), best.score))
    }
}
