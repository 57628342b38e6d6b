use std::io;
use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// The intent training set is empty or contains an unusable example.
    /// Fatal at startup: nothing can be routed without a trained model.
    #[error("Malformed training data: {0}")]
    MalformedTrainingData(String),

    /// A label the classifier can produce has no entry in a lookup table.
    #[error("Configuration defect: {0}")]
    ConfigurationDefect(String),

    /// The sentiment backend could not be reached or returned garbage.
    #[error("Sentiment backend unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents data validation errors (e.g., invalid input format).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Survey file could not be parsed.
    #[error("Survey error: {0}")]
    Survey(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl AppError {
    /// Whether the error came from the sentiment backend rather than local state.
    pub fn is_upstream(&self) -> bool {
        matches!(self, AppError::UpstreamUnavailable(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Config(format!("Validation errors: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::UpstreamUnavailable(format!("HTTP error: {}", err))
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Survey(format!("CSV error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
