use std::result::Result as StdResult;

use savings_config::ConfigError;
use savings_core::{CoreError, ValidationError};
use thiserror::Error;

/// Unified error type for the store, persistence, and configuration layers.
#[derive(Error, Debug)]
pub enum SavingsError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type Result<T> = StdResult<T, SavingsError>;

impl From<ValidationError> for SavingsError {
    fn from(err: ValidationError) -> Self {
        SavingsError::Core(CoreError::Validation(err))
    }
}

impl From<ConfigError> for SavingsError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => SavingsError::Persistence(io.to_string()),
            ConfigError::Serde(message) => SavingsError::Config(message),
        }
    }
}

impl From<std::io::Error> for SavingsError {
    fn from(err: std::io::Error) -> Self {
        SavingsError::Persistence(err.to_string())
    }
}
