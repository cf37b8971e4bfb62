use crate::collections::error::CollectionError;
use crate::coverage::error::DecodeError;
use crate::fetch::error::FetchError;
use std::path::PathBuf;
use thiserror::Error;

/// How the update loop should react to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The server asked us to slow down; the cooldown has already been waited out.
    RateLimited,
    /// Worth another attempt after the normal backoff.
    Retryable,
    /// Retrying cannot help (bad configuration or coordinates).
    Fatal,
}

#[derive(Debug, Error)]
pub enum EdrForecastError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Invalid coordinates: latitude {lat}, longitude {lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read configuration file '{0}'")]
    ConfigRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse configuration")]
    ConfigParse(#[source] serde_json::Error),

    #[error("Forecast update failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<EdrForecastError>,
    },
}

impl EdrForecastError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EdrForecastError::Fetch(e) => e.kind(),
            EdrForecastError::Collection(e) => e.kind(),
            EdrForecastError::Decode(e) => e.kind(),
            EdrForecastError::InvalidCoordinates { .. }
            | EdrForecastError::InvalidConfig(_)
            | EdrForecastError::ConfigRead(..)
            | EdrForecastError::ConfigParse(_)
            | EdrForecastError::RetriesExhausted { .. } => ErrorKind::Fatal,
        }
    }

    /// The error that ended the last attempt, looking through [`Self::RetriesExhausted`].
    pub fn root_cause(&self) -> &EdrForecastError {
        match self {
            EdrForecastError::RetriesExhausted { last, .. } => last.root_cause(),
            other => other,
        }
    }
}
