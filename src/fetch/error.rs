use crate::error::ErrorKind;
use reqwest::StatusCode;
use thiserror::Error;

/// Boxed cause of a transport-level failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Rate limit exceeded for {url}")]
    RateLimitExceeded { url: String },

    #[error("Request to {url} timed out")]
    RequestTimeout {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("Network request failed for {url}")]
    NetworkRequest {
        url: String,
        #[source]
        source: BoxError,
    },

    // 404 from the position endpoint: the model run does not cover the window (yet)
    #[error("No data available for the requested time window at {url}: {body}")]
    NoDataForWindow { url: String, body: String },

    #[error("HTTP request failed for {url} with status {status}: {body}")]
    UnexpectedStatus {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse JSON response from {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to build HTTP client")]
    HttpClientBuild(#[source] reqwest::Error),
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::RateLimitExceeded { .. } => ErrorKind::RateLimited,
            FetchError::HttpClientBuild(_) => ErrorKind::Fatal,
            FetchError::RequestTimeout { .. }
            | FetchError::NetworkRequest { .. }
            | FetchError::NoDataForWindow { .. }
            | FetchError::UnexpectedStatus { .. }
            | FetchError::JsonParse { .. } => ErrorKind::Retryable,
        }
    }

    /// The status code the server answered with, if the failure came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::RateLimitExceeded { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            FetchError::NoDataForWindow { .. } => Some(StatusCode::NOT_FOUND),
            FetchError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
