use std::io;

use tally_domain::DateRangeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Date out of supported range: {0}")]
    OutOfRange(String),
    #[error("Upstream request failed: {0}")]
    Upstream(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<DateRangeError> for CoreError {
    fn from(err: DateRangeError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
