//! HTTP request handlers for the relay API
//!
//! Implements the command endpoint (POST + OPTIONS preflight) and a
//! health check.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderName, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::core::error::RelayError;
use crate::core::services::Services;
use crate::core::types::*;

/// Fixed CORS headers answered to every preflight request
pub const PREFLIGHT_HEADERS: [(HeaderName, &str); 4] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, GET, OPTIONS"),
    (header::ACCESS_CONTROL_MAX_AGE, "1000"),
    (
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        "origin, x-csrftoken, content-type, accept",
    ),
];

/// Health check handler
///
/// Returns server status and version information.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// CORS preflight handler
///
/// Answers with the fixed header set and a `success` body. Takes no
/// state, so it cannot reach the interpreter.
pub async fn preflight_handler() -> impl IntoResponse {
    (StatusCode::OK, PREFLIGHT_HEADERS, "success")
}

/// Command submission handler
///
/// Extracts `command` from the JSON body, runs it through the relay and
/// returns `{"response": ...}`. The response is written only after the
/// interpreter call has returned.
///
/// # Errors
///
/// - `InvalidRequest` (400): body unreadable, not JSON, or no string
///   `command` field. The interpreter is not called.
/// - `Interpreter` (500): the interpreter rejected the command.
/// - `ExecutionFailed` (500): the interpreter call died.
pub async fn submit_handler(
    State(services): State<Arc<Services>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<CommandResponse>, RelayError> {
    let body = body.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Failed to read request body");
        RelayError::InvalidRequest
    })?;

    let response = services.relay.submit(&body).await?;
    Ok(Json(response))
}
