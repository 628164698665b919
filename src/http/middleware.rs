//! Request logging for the relay API
//!
//! One event per request, after the response is produced. The level
//! follows the status class: server errors at ERROR, rejected requests
//! at WARN, everything else at INFO. Bodies and commands are never
//! logged.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::Level;

/// Log level for a finished request
pub fn level_for(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

pub async fn log_request(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    match level_for(response.status()) {
        Level::ERROR => tracing::error!(%method, %path, status, elapsed_ms, "Request failed"),
        Level::WARN => tracing::warn!(%method, %path, status, elapsed_ms, "Request rejected"),
        _ => tracing::info!(%method, %path, status, elapsed_ms, "Request completed"),
    }

    response
}
