//! scheme-relay HTTP server entry point
//!
//! Starts the REST API that relays commands to the Scheme interpreter.

use std::sync::Arc;

use scheme_relay::core::config::Config;
use scheme_relay::core::logging::init_tracing;
use scheme_relay::core::services::Services;
use scheme_relay::core::xdg::XdgDirs;
use scheme_relay::http;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Configuration decides the log format, so it loads first
    let config = Config::load()?;
    init_tracing(&config.logging);

    tracing::info!("Starting scheme-relay");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    XdgDirs::new().log_paths();
    config.log_config();

    // The store lives for the whole process; every request shares it
    let services = Arc::new(Services::new(config.clone())?);

    let app = http::router(services);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!(
        "Service ready - commands at http://{}{}",
        addr,
        config.relay.mount_path
    );

    axum::serve(listener, app).await?;

    Ok(())
}
