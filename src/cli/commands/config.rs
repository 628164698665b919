//! Config command - show current configuration

use crate::cli::output;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::Args;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Also show where the configuration file is looked up
    #[arg(long, short = 'p')]
    pub paths: bool,
}

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = &services.config;

    match format {
        OutputFormat::Human => {
            output::print_header("Configuration:");
            println!("  server:");
            println!("    host: {}", config.server.host);
            println!("    port: {}", config.server.port);
            println!("  relay:");
            println!("    mount_path: {}", config.relay.mount_path);
            println!("    execution: {}", config.relay.execution);
            println!("    max_body_bytes: {}", config.relay.max_body_bytes);
            println!("  interpreter:");
            println!("    preload: {:?}", config.interpreter.preload);
            println!("  logging:");
            println!("    format: {:?}", config.logging.format);
            println!("    filter: {}", config.logging.filter);
            if args.paths {
                println!("  config_file: {}", XdgDirs::new().config_file().display());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config.as_ref())?);
        }
    }

    Ok(())
}
