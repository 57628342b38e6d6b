// CareBot Core
// Crisis filter, intent classifier and response router for a mental health companion.

pub mod brain;
pub mod chat;
pub mod config;
pub mod error;
pub mod logging;
pub mod sentiment;
pub mod survey;

#[cfg(test)]
mod tests;

use tracing::info;

use brain::{builtin_examples, TfidfIntentClassifier};
use chat::ResponseRouter;
use config::AppConfig;
use error::AppError;
use sentiment::SentimentAnalyzer;

/// Router type used by the binary.
pub type DefaultRouter = ResponseRouter<TfidfIntentClassifier, Box<dyn SentimentAnalyzer>>;

/// Train the built-in classifier and wire the router from configuration.
/// Any error here is fatal: the assistant cannot serve without it.
pub fn bootstrap(config: &AppConfig) -> Result<DefaultRouter, AppError> {
    config.check()?;
    let classifier = TfidfIntentClassifier::train(&builtin_examples())?;
    let sentiment = sentiment::from_config(config)?;
    let router = ResponseRouter::from_config(classifier, sentiment, config)?;
    info!(
        "Router ready (threshold {:.2}, {} crisis keywords, backend {:?})",
        router.threshold(),
        config.crisis_keywords.len(),
        config.sentiment_backend
    );
    Ok(router)
}
