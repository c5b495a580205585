use chrono::NaiveDate;
use thiserror::Error;

pub type InsightsResult<T> = Result<T, InsightsError>;

#[derive(Debug, Error)]
pub enum InsightsError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CRM API error: {status} - {message}")]
    RemoteApi { status: u16, message: String },

    #[error("Malformed record {record_id}: {reason}")]
    MalformedRecord { record_id: String, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Start date {start} must not be after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Chat completion failed: {0}")]
    Chat(String),

    #[error("Knowledge base error: {0}")]
    Knowledge(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error)
}

impl InsightsError {
    pub fn malformed(record_id: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedRecord {
            record_id: record_id.into(),
            reason: reason.to_string()
        }
    }

    /// Errors that disable a feature rather than fail an action.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteApi { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None
        }
    }
}

impl From<async_openai::error::OpenAIError> for InsightsError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        Self::Chat(err.to_string())
    }
}
