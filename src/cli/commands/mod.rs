//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a specific CLI command.

pub mod config;
pub mod eval;
pub mod info;

// Re-export argument types for use in mod.rs
pub use config::ConfigArgs;
pub use eval::EvalArgs;
pub use info::InfoArgs;
