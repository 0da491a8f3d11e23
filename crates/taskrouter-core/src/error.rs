//! Error types for taskrouter-core
//!
//! Provides a unified error type for workspace operations.

use crate::client::ClientError;
use crate::config::ConfigError;
use thiserror::Error;

/// Result type for taskrouter-core operations
pub type Result<T> = std::result::Result<T, TaskRouterError>;

/// Unified error type for taskrouter-core
#[derive(Error, Debug)]
pub enum TaskRouterError {
    /// Remote call failed; passed through unchanged
    #[error("Transport error: {0}")]
    Transport(#[from] ClientError),

    /// A referenced resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Status update named an activity the workspace does not have
    #[error("The activity '{activity}' doesn't exist in the workspace '{workspace}'")]
    UnknownActivity { activity: String, workspace: String },

    /// A worker's attributes document is unusable
    #[error("'{worker}' has unusable attributes: {reason}")]
    DataIntegrity { worker: String, reason: String },

    /// A parameter could not be converted to its required type
    #[error("Invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Configuration or plan file error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TaskRouterError {
    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        TaskRouterError::NotFound(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        TaskRouterError::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        TaskRouterError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<ConfigError> for TaskRouterError {
    fn from(err: ConfigError) -> Self {
        TaskRouterError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for TaskRouterError {
    fn from(err: toml::de::Error) -> Self {
        TaskRouterError::Config(err.to_string())
    }
}

impl From<std::io::Error> for TaskRouterError {
    fn from(err: std::io::Error) -> Self {
        TaskRouterError::Config(format!("I/O error: {}", err))
    }
}
