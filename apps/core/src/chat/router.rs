//! Response router: turns one user message into a reply.
//!
//! Steps, in order:
//! 1. Crisis keywords (short-circuits everything else)
//! 2. Sentiment from the configured backend
//! 3. Intent classification with the confidence fallback
//! 4. Random reply from the intent's bucket, prefixed with the sentiment label
//! 5. Log append
//! 6. Recommendation lookup

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use super::session::{ConversationRecord, Session};
use super::tables::{RecommendationEntry, RecommendationTable, ResponseTable};
use crate::brain::{CrisisFilter, Intent, IntentModel, CRISIS_MESSAGE, DEFAULT_CONFIDENCE_THRESHOLD};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::sentiment::SentimentAnalyzer;

/// Shown when the sentiment backend is down. Nothing is logged for these turns.
pub const APOLOGY_MESSAGE: &str =
    "I'm sorry, I can't respond properly right now. Please try again in a moment.";

/// Outcome of routing one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub display_text: String,
    pub intent: Intent,
    pub recommendations: Vec<RecommendationEntry>,
}

/// Routes messages through crisis check, sentiment and intent.
pub struct ResponseRouter<M, S>
where
    M: IntentModel,
    S: SentimentAnalyzer,
{
    classifier: M,
    sentiment: S,
    crisis: CrisisFilter,
    responses: ResponseTable,
    recommendations: RecommendationTable,
    threshold: f64,
    rng: StdRng,
}

impl<M, S> ResponseRouter<M, S>
where
    M: IntentModel,
    S: SentimentAnalyzer,
{
    /// Router with the built-in tables, crisis keywords and threshold.
    pub fn new(classifier: M, sentiment: S) -> Result<Self, AppError> {
        let router = Self {
            classifier,
            sentiment,
            crisis: CrisisFilter::default(),
            responses: ResponseTable::default(),
            recommendations: RecommendationTable::default(),
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            rng: StdRng::from_entropy(),
        };
        router.check_tables()?;
        Ok(router)
    }

    /// Router configured from `AppConfig` (threshold, crisis keywords, seed).
    pub fn from_config(classifier: M, sentiment: S, config: &AppConfig) -> Result<Self, AppError> {
        let mut router = Self::new(classifier, sentiment)?
            .with_threshold(config.confidence_threshold)
            .with_crisis_filter(CrisisFilter::new(&config.crisis_keywords));
        if let Some(seed) = config.seed {
            router = router.with_seed(seed);
        }
        Ok(router)
    }

    /// Replace both tables. Fails if either misses a label the classifier can produce.
    pub fn with_tables(
        mut self,
        responses: ResponseTable,
        recommendations: RecommendationTable,
    ) -> Result<Self, AppError> {
        self.responses = responses;
        self.recommendations = recommendations;
        self.check_tables()?;
        Ok(self)
    }

    pub fn with_crisis_filter(mut self, crisis: CrisisFilter) -> Self {
        self.crisis = crisis;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn check_tables(&self) -> Result<(), AppError> {
        let labels = self.classifier.labels();
        self.responses.ensure_covers(&labels)?;
        self.recommendations.ensure_covers(&labels)?;
        Ok(())
    }

    /// Route one message and append exactly one record to `session`.
    ///
    /// Only a sentiment backend failure returns an error; in that case the
    /// session log is left untouched.
    #[instrument(skip(self, session, text), fields(session_id = %session.id))]
    pub fn route(&mut self, session: &mut Session, text: &str) -> Result<Reply, AppError> {
        if let Some(keyword) = self.crisis.detect(text) {
            warn!("Crisis keyword matched: '{}'", keyword);
            session.append(ConversationRecord::new(text, None, Intent::Crisis, CRISIS_MESSAGE));
            return Ok(Reply {
                display_text: CRISIS_MESSAGE.to_string(),
                intent: Intent::Crisis,
                recommendations: self.recommendations.lookup(Intent::Crisis).to_vec(),
            });
        }

        let sentiment = self.sentiment.analyze(text)?;

        let classification = self.classifier.classify(text);
        let intent = classification.resolve(self.threshold);
        debug!(
            "Classified as {} ({:.3}), resolved to {}",
            classification.label, classification.confidence, intent
        );

        let response = self
            .responses
            .candidates(intent)
            .choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| AppError::ConfigurationDefect(format!("no replies for '{}'", intent)))?;

        session.append(ConversationRecord::new(text, Some(sentiment), intent, &response));

        info!(
            "Routed message: sentiment={} ({:.2}), intent={}, log size={}",
            sentiment.label,
            sentiment.score,
            intent,
            session.len()
        );

        Ok(Reply {
            display_text: format!("[{}] {}", sentiment.label, response),
            intent,
            recommendations: self.recommendations.lookup(intent).to_vec(),
        })
    }

    /// Route for the interactive surface: never fails. Errors turn into an
    /// apology with the default recommendations and no log entry.
    pub fn respond(&mut self, session: &mut Session, text: &str) -> Reply {
        match self.route(session, text) {
            Ok(reply) => reply,
            Err(e) => {
                error!("Failed to route message: {}", e);
                Reply {
                    display_text: APOLOGY_MESSAGE.to_string(),
                    intent: Intent::Default,
                    recommendations: self.recommendations.lookup(Intent::Default).to_vec(),
                }
            }
        }
    }
}
