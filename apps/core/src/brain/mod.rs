//! # Brain Module
//!
//! Local, model-free analysis of user messages.
//!
//! ## Components
//! - `intent`: Intent labels and the built-in training corpus
//! - `tfidf`: TF-IDF vectorizer
//! - `logistic`: Multinomial logistic regression
//! - `classifier`: Trainable intent classifier and the `IntentModel` seam
//! - `crisis`: Crisis keyword filter
//! - `keywords`: Keyword frequencies for survey answers

pub mod classifier;
pub mod crisis;
pub mod intent;
pub mod keywords;
pub mod logistic;
pub mod tfidf;

pub use classifier::{Classification, IntentModel, TfidfIntentClassifier, DEFAULT_CONFIDENCE_THRESHOLD};
pub use crisis::{CrisisFilter, CRISIS_MESSAGE, DEFAULT_CRISIS_KEYWORDS};
pub use intent::{builtin_examples, Intent, IntentExample};
pub use keywords::{KeywordExtractor, KeywordResult};
