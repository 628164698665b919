//! HTTP REST adapter
//!
//! Depends only on core/. Never imports from cli/.
//!
//! Mounts the command relay endpoint and a health check on an Axum
//! router.

pub mod error;
pub mod handlers;
pub mod middleware;

pub use handlers::*;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};

use crate::core::services::Services;

/// Build the ready-to-serve router for a set of services
///
/// The command endpoint is mounted at `relay.mount_path`, the health
/// check at `/health`.
pub fn router(services: Arc<Services>) -> Router {
    let mount_path = services.config.relay.mount_path.clone();
    let max_body_bytes = services.config.relay.max_body_bytes;

    Router::new()
        .route("/health", get(health_handler))
        .route(
            &mount_path,
            post(submit_handler).options(preflight_handler),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(axum_middleware::from_fn(middleware::log_request))
        .with_state(services)
}
