//! scheme-relay CLI - evaluate commands without the HTTP server
//!
//! # Examples
//!
//! ```bash
//! # Evaluate a command
//! scheme-relay eval "(+ 1 2)"
//!
//! # Evaluate a file, JSON envelope output
//! scheme-relay --format json eval --file init.scm
//!
//! # Show configuration
//! scheme-relay show-config
//! ```

use clap::Parser;
use scheme_relay::cli::{output, run, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
