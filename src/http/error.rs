//! HTTP mapping for relay errors
//!
//! Every error leaves the endpoint as a JSON envelope
//! `{"status_code": ..., "message": ...}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::core::error::RelayError;
use crate::core::types::ErrorResponse;

/// Convert error to appropriate HTTP status code
pub fn status_code(err: &RelayError) -> StatusCode {
    match err {
        RelayError::InvalidRequest => StatusCode::BAD_REQUEST,
        RelayError::Interpreter(_)
        | RelayError::ExecutionFailed(_)
        | RelayError::ConfigError(_)
        | RelayError::IoError(_)
        | RelayError::SerdeError(_)
        | RelayError::TomlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Implement IntoResponse for automatic error conversion in Axum
impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = status_code(&self);
        let body = Json(ErrorResponse {
            status_code: status.as_u16(),
            message: self.message(),
        });

        (status, body).into_response()
    }
}
