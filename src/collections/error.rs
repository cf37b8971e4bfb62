use crate::error::ErrorKind;
use crate::fetch::error::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    // Not retried here; the update loop decides.
    #[error("No EDR collections available at {0}")]
    Empty(String),
}

impl CollectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CollectionError::Fetch(e) => e.kind(),
            CollectionError::Empty(_) => ErrorKind::Retryable,
        }
    }
}
