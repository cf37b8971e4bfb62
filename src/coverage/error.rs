use crate::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Coverage has no time axis values")]
    MissingTimeAxis,

    #[error("Coverage has no ranges")]
    MissingRanges,

    #[error("Invalid timestamp at index {index}: {value}")]
    InvalidTimestamp { index: usize, value: String },

    #[error("Non-numeric value for {parameter} at index {index}: {value}")]
    TypeMismatch {
        index: usize,
        parameter: String,
        value: String,
    },

    #[error("None of the {total} timesteps could be decoded")]
    NoUsableRecords { total: usize },
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Retryable
    }
}
