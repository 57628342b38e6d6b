//! Runtime configuration.
//!
//! Read from `CAREBOT_*` environment variables (a `.env` file is loaded by the
//! binary first) and validated before anything is built from it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use validator::{Validate, ValidationError};

use crate::brain::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_CRISIS_KEYWORDS};
use crate::error::AppError;

const ENV_THRESHOLD: &str = "CAREBOT_CONFIDENCE_THRESHOLD";
const ENV_CRISIS_KEYWORDS: &str = "CAREBOT_CRISIS_KEYWORDS";
const ENV_BACKEND: &str = "CAREBOT_SENTIMENT_BACKEND";
const ENV_URL: &str = "CAREBOT_SENTIMENT_URL";
const ENV_TOKEN: &str = "CAREBOT_SENTIMENT_TOKEN";
const ENV_TIMEOUT: &str = "CAREBOT_SENTIMENT_TIMEOUT_SECS";
const ENV_SEED: &str = "CAREBOT_SEED";
const ENV_LOG_FORMAT: &str = "CAREBOT_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentBackend {
    Lexicon,
    Http,
}

impl FromStr for SentimentBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lexicon" => Ok(SentimentBackend::Lexicon),
            "http" => Ok(SentimentBackend::Http),
            other => Err(AppError::Config(format!("Unknown sentiment backend: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown log format: {}", other))),
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Minimum top-class probability (exclusive) to accept an intent.
    #[validate(range(min = 0.0, max = 1.0))]
    pub confidence_threshold: f64,
    /// Phrases that trigger the crisis reply.
    #[validate(length(min = 1), custom(function = "validate_keywords"))]
    pub crisis_keywords: Vec<String>,
    pub sentiment_backend: SentimentBackend,
    #[validate(url)]
    pub sentiment_url: Option<String>,
    pub sentiment_token: Option<String>,
    #[validate(range(min = 1))]
    pub sentiment_timeout_secs: Option<u64>,
    /// Fixed seed for reply selection; random when unset.
    pub seed: Option<u64>,
    pub log_format: LogFormat,
}

fn validate_keywords(keywords: &[String]) -> Result<(), ValidationError> {
    if keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(ValidationError::new("empty_crisis_keyword"));
    }
    Ok(())
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            crisis_keywords: DEFAULT_CRISIS_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            sentiment_backend: SentimentBackend::Lexicon,
            sentiment_url: None,
            sentiment_token: None,
            sentiment_timeout_secs: None,
            seed: None,
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Build the configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(v) = env_var(ENV_THRESHOLD) {
            config.confidence_threshold = v
                .parse()
                .map_err(|_| AppError::Config(format!("{} must be a number, got '{}'", ENV_THRESHOLD, v)))?;
        }
        if let Some(v) = env_var(ENV_CRISIS_KEYWORDS) {
            config.crisis_keywords = v
                .split(',')
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect();
        }
        if let Some(v) = env_var(ENV_BACKEND) {
            config.sentiment_backend = v.parse()?;
        }
        config.sentiment_url = env_var(ENV_URL);
        config.sentiment_token = env_var(ENV_TOKEN);
        if let Some(v) = env_var(ENV_TIMEOUT) {
            config.sentiment_timeout_secs = Some(
                v.parse()
                    .map_err(|_| AppError::Config(format!("{} must be whole seconds, got '{}'", ENV_TIMEOUT, v)))?,
            );
        }
        if let Some(v) = env_var(ENV_SEED) {
            config.seed = Some(
                v.parse()
                    .map_err(|_| AppError::Config(format!("{} must be an unsigned integer, got '{}'", ENV_SEED, v)))?,
            );
        }
        if let Some(v) = env_var(ENV_LOG_FORMAT) {
            config.log_format = v.parse()?;
        }

        config.check()?;
        Ok(config)
    }

    /// Validate field ranges and cross-field requirements.
    pub fn check(&self) -> Result<(), AppError> {
        // Range checks never fail on NaN
        if !self.confidence_threshold.is_finite() {
            return Err(AppError::Config(format!(
                "{} must be a finite number, got {}",
                ENV_THRESHOLD, self.confidence_threshold
            )));
        }
        self.validate()?;
        if self.sentiment_backend == SentimentBackend::Http && self.sentiment_url.is_none() {
            return Err(AppError::Config(format!(
                "{} is required when {}=http",
                ENV_URL, ENV_BACKEND
            )));
        }
        Ok(())
    }

    pub fn sentiment_timeout(&self) -> Option<Duration> {
        self.sentiment_timeout_secs.map(Duration::from_secs)
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
