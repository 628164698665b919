//! Core domain logic (protocol-agnostic)
//!
//! This module contains all business logic that is independent
//! of transport protocols (HTTP, CLI).
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Request/response envelopes
//! - **xdg**: XDG directory handling
//! - **logging**: Tracing subscriber setup
//! - **store**: Shared knowledge store
//! - **scheme**: Built-in interpreter (reader, printer, evaluator)
//! - **interpreter**: Interpreter contract and invokers
//! - **relay**: Extract, invoke, format
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod interpreter;
pub mod logging;
pub mod relay;
pub mod scheme;
pub mod services;
pub mod store;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{RelayError, Result};
pub use services::Services;
