use std::result::Result as StdResult;

use tally_config::ConfigError;
use tally_core::CoreError;
use tally_domain::DateRangeError;
use thiserror::Error;

/// Unified error type for the core, config and storage layers.
#[derive(Error, Debug)]
pub enum TallyError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Date out of range: {0}")]
    OutOfRange(String),
    #[error("Upstream unavailable: {0}")]
    Upstream(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, TallyError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TallyError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for TallyError {
    fn from(err: std::io::Error) -> Self {
        TallyError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(err: serde_json::Error) -> Self {
        TallyError::StorageError(err.to_string())
    }
}

impl From<DateRangeError> for TallyError {
    fn from(err: DateRangeError) -> Self {
        TallyError::InvalidInput(err.to_string())
    }
}

impl From<CoreError> for TallyError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(message) => TallyError::InvalidInput(message),
            CoreError::OutOfRange(message) => TallyError::OutOfRange(message),
            CoreError::Upstream(message) => TallyError::Upstream(message),
            CoreError::Storage(message) | CoreError::Serde(message) => {
                TallyError::StorageError(message)
            }
            CoreError::Io(err) => TallyError::StorageError(err.to_string()),
        }
    }
}

impl From<ConfigError> for TallyError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => TallyError::StorageError(io.to_string()),
            ConfigError::Serde(message) => TallyError::ConfigError(message),
            invalid @ ConfigError::InvalidValue { .. } => {
                TallyError::InvalidInput(invalid.to_string())
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::from(TallyError::from(err))
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::from(TallyError::from(err))
    }
}
