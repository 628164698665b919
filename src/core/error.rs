//! Error types and error handling for the Scheme relay.
//!
//! This module defines the error types used throughout the
//! application. HTTP status mapping lives in the `http` adapter.

use crate::core::scheme::EvalError;
use thiserror::Error;

/// Fixed message returned whenever a request carries no usable command
pub const MISSING_COMMAND_MESSAGE: &str = "Invalid request: required parameter command is missing";

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;

/// Main error type for the relay service
#[derive(Error, Debug)]
pub enum RelayError {
    /// Missing `command` field, or a body that could not be read as one
    #[error("{}", MISSING_COMMAND_MESSAGE)]
    InvalidRequest,

    #[error("Interpreter error: {0}")]
    Interpreter(#[from] EvalError),

    #[error("Command execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl RelayError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a bad request error (caller must fix the request)
    pub fn is_bad_request(&self) -> bool {
        matches!(self, RelayError::InvalidRequest)
    }

    /// Check if the interpreter rejected or failed on the command
    pub fn is_interpreter_error(&self) -> bool {
        matches!(self, RelayError::Interpreter(_))
    }
}
