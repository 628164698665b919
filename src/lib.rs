//! scheme-relay - HTTP relay for a Scheme interpreter
//!
//! Accepts a command over HTTP, evaluates it synchronously against a
//! shared knowledge store, and returns the interpreter's textual result
//! as JSON.
//!
//! # Architecture
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, error, types, xdg, logging
//!   - store (shared knowledge store)
//!   - scheme (built-in interpreter)
//!   - interpreter (collaborator contract, invokers)
//!   - relay (extract, invoke, format)
//!   - services (unified service container)
//!
//! - **http**: REST API adapter (depends on core)
//!   - router, handlers, middleware, error mapping
//!
//! - **cli**: Command-line adapter (depends on core)
//!
//! # Concurrency
//!
//! Each request runs one command and waits for it to finish. Concurrent
//! commands share the store with no isolation between them: the relay
//! neither orders nor locks them.

// Core domain logic (protocol-agnostic)
pub mod core;

// HTTP REST adapter
pub mod http;

// CLI adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{RelayError, Result};
pub use core::interpreter::{CommandInvoker, ExecutionMode, Interpreter};
pub use core::relay::CommandRelay;
pub use core::scheme::{EvalError, SchemeInterpreter};
pub use core::services::Services;
pub use core::store::{KnowledgeStore, NodeRef};
pub use core::types::*;
