//! Eval command - run one command through the relay

use crate::cli::output;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the eval command
#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Command text, e.g. "(+ 1 2)"
    #[arg(required_unless_present = "file")]
    pub command: Option<String>,

    /// Read the command from a file instead
    #[arg(long, short = 'f', conflicts_with = "command")]
    pub file: Option<PathBuf>,
}

/// Execute the eval command
///
/// Goes through the same relay (and execution mode) as the HTTP
/// endpoint, against the store built from the configured preloads.
pub async fn execute(
    args: EvalArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let command = match (args.command, args.file) {
        (Some(command), _) => command,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?,
        (None, None) => return Err("No command given".into()),
    };

    let result = services.relay.execute(command).await?;

    match format {
        OutputFormat::Human => print!("{}", output::format_result(&result.response)),
        OutputFormat::Json => output::print_output(&result, format),
    }

    Ok(())
}
