//! Info command - show version and server information

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Include knowledge store statistics
    #[arg(long, short = 'd')]
    pub detailed: bool,
}

/// Server information response
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub name: String,
    pub version: String,
    pub endpoint: String,
    pub execution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atoms: Option<usize>,
}

/// Execute the info command
pub async fn execute(
    args: InfoArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = &services.config;

    let info = InfoResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoint: format!("http://{}{}", config.bind_addr(), config.relay.mount_path),
        execution: config.relay.execution.to_string(),
        atoms: args.detailed.then(|| services.store.node_count()),
    };

    match format {
        OutputFormat::Human => {
            println!("{} {}", colors::label(&info.name), info.version);
            println!("Endpoint: {}", colors::endpoint(&info.endpoint));
            println!("Execution: {}", info.execution);
            if let Some(count) = info.atoms {
                println!("Atoms: {}", colors::number(&count.to_string()));
            }
        }
        OutputFormat::Json => output::print_output(&info, format),
    }

    Ok(())
}
