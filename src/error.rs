//! # Recovery Error Types
//!
//! Unified error handling for the recovery library and the `sfn-recover` CLI.

use thiserror::Error;

/// Recovery operation result type
pub type RecoverResult<T> = Result<T, RecoverError>;

/// Error types for recovery operations
///
/// Every failure stops the operation in progress. Nothing here is retried.
#[derive(Debug, Error)]
pub enum RecoverError {
    #[error("Remote call {operation} failed: {message}")]
    Remote { operation: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON serialization/deserialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RecoverError {
    /// Create an error for a failed call against the orchestration service
    pub fn remote(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Remote {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Name of the remote operation that failed, if this is a remote error
    pub fn operation(&self) -> Option<&str> {
        match self {
            RecoverError::Remote { operation, .. } => Some(operation),
            _ => None,
        }
    }
}

impl From<::config::ConfigError> for RecoverError {
    fn from(err: ::config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}
