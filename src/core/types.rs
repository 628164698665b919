//! Request and response types for the relay.
//!
//! Every type here lives for a single request: it is created when the
//! request arrives and dropped once the response has been written.

use serde::{Deserialize, Serialize};

/// Body of a command submission
///
/// `command` is optional at the type level so a missing field is a
/// value the relay inspects, not a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CommandRequest {
    /// Opaque command text for the interpreter
    #[serde(default)]
    pub command: Option<String>,
}

/// Successful command result
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommandResponse {
    /// Interpreter output, verbatim
    pub response: String,
}

/// Error envelope returned for any failed request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: String,
}

/// Health check response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
