//! Error types for the userdesk CLI
//!
//! User-facing errors with messages that say what to check next.

use crate::api::ApiError;
use thiserror::Error;
use userdesk_common::CommonError;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// The server answered with an error status
    #[error("{0}")]
    Api(#[source] ApiError),

    /// The server could not be reached at all
    #[error("{0}. Ensure the server is running and --server-url points at it.")]
    Unreachable(#[source] ApiError),

    /// Command-line input could not be turned into a request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables.")]
    Config(String),

    /// Invalid value for a shared setting
    #[error(transparent)]
    Common(#[from] CommonError),

    /// JSON parsing or printing failed
    #[error("Failed to handle JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure from a setup step that reports through anyhow, such as logging
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        if err.is_transport() {
            CliError::Unreachable(err)
        } else {
            CliError::Api(err)
        }
    }
}

impl CliError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The API error underneath, if this came from a request
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            CliError::Api(err) | CliError::Unreachable(err) => Some(err),
            _ => None,
        }
    }
}
