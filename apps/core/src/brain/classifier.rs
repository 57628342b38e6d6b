//! Intent classification over the fixed corpus.
//!
//! `IntentModel` is the seam the router depends on; `TfidfIntentClassifier`
//! is the shipped implementation (TF-IDF features + multinomial logistic
//! regression). The confidence threshold is applied by [`Classification::resolve`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::intent::{Intent, IntentExample};
use super::logistic::{LogisticRegression, SolverOptions};
use super::tfidf::TfidfVectorizer;
use crate::error::AppError;

/// Minimum top-class probability (exclusive) to trust a prediction.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.4;

/// Raw classifier output before the threshold is applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Highest-probability label
    pub label: Intent,
    /// Probability of `label` (0.0 - 1.0)
    pub confidence: f64,
    /// Full distribution, in class order
    pub probabilities: Vec<(Intent, f64)>,
}

impl Classification {
    /// Apply the confidence policy: anything at or below `threshold` becomes `Default`.
    pub fn resolve(&self, threshold: f64) -> Intent {
        if self.confidence > threshold {
            self.label
        } else {
            Intent::Default
        }
    }
}

/// A trained, read-only intent model.
pub trait IntentModel {
    /// Classify one message.
    fn classify(&self, text: &str) -> Classification;

    /// Labels this model can return from `classify`.
    fn labels(&self) -> Vec<Intent>;
}

/// TF-IDF + logistic regression intent classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfIntentClassifier {
    vectorizer: TfidfVectorizer,
    model: LogisticRegression,
    /// Sorted, deduplicated class labels
    classes: Vec<Intent>,
}

impl TfidfIntentClassifier {
    /// Train with the default solver settings
    pub fn train(examples: &[IntentExample]) -> Result<Self, AppError> {
        Self::train_with(examples, SolverOptions::default())
    }

    pub fn train_with(examples: &[IntentExample], options: SolverOptions) -> Result<Self, AppError> {
        if examples.is_empty() {
            return Err(AppError::MalformedTrainingData(
                "training set is empty".to_string(),
            ));
        }

        for (i, example) in examples.iter().enumerate() {
            if example.text.trim().is_empty() {
                return Err(AppError::MalformedTrainingData(format!(
                    "example {} has no text",
                    i
                )));
            }
            if !example.label.is_trainable() {
                return Err(AppError::MalformedTrainingData(format!(
                    "example {} uses reserved label '{}'",
                    i, example.label
                )));
            }
        }

        let mut classes: Vec<Intent> = examples.iter().map(|e| e.label).collect();
        classes.sort();
        classes.dedup();

        let texts: Vec<&str> = examples.iter().map(|e| e.text.as_str()).collect();
        let vectorizer = TfidfVectorizer::fit(&texts);
        if vectorizer.dimension() == 0 {
            return Err(AppError::MalformedTrainingData(
                "training set has no usable terms".to_string(),
            ));
        }

        let x: Vec<Vec<f64>> = texts.iter().map(|t| vectorizer.transform(t)).collect();
        let y: Vec<usize> = examples
            .iter()
            .map(|e| classes.iter().position(|c| *c == e.label).unwrap_or(0))
            .collect();

        let model = LogisticRegression::fit(&x, &y, classes.len(), options);

        info!(
            "Trained intent classifier: {} examples, {} terms, {} classes, {} iterations",
            examples.len(),
            vectorizer.dimension(),
            classes.len(),
            model.iterations()
        );

        Ok(Self {
            vectorizer,
            model,
            classes,
        })
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }
}

impl IntentModel for TfidfIntentClassifier {
    fn classify(&self, text: &str) -> Classification {
        let row = self.vectorizer.transform(text);
        let probs = self.model.predict_proba(&row);

        // First maximum wins on ties
        let mut best = 0;
        for (i, p) in probs.iter().enumerate() {
            if *p > probs[best] {
                best = i;
            }
        }

        debug!(
            "Intent distribution: {:?} -> {} ({:.3})",
            probs, self.classes[best], probs[best]
        );

        Classification {
            label: self.classes[best],
            confidence: probs[best],
            probabilities: self.classes.iter().copied().zip(probs).collect(),
        }
    }

    fn labels(&self) -> Vec<Intent> {
        let mut labels = self.classes.clone();
        labels.push(Intent::Default);
        labels
    }
}
