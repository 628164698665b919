//! Unified service container for the relay
//!
//! Provides shared access to the knowledge store, the relay and the
//! configuration. All adapters use this same struct.

use crate::core::config::Config;
use crate::core::error::{RelayError, Result};
use crate::core::interpreter::Interpreter;
use crate::core::relay::CommandRelay;
use crate::core::scheme::SchemeInterpreter;
use crate::core::store::KnowledgeStore;
use std::fs;
use std::sync::Arc;

/// Unified services container
#[derive(Clone)]
pub struct Services {
    /// Knowledge store shared by every command
    pub store: Arc<KnowledgeStore>,

    /// Relay bound to `store`
    pub relay: CommandRelay,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services with a fresh store and the built-in interpreter
    pub fn new(config: Config) -> Result<Self> {
        Self::with_interpreter(
            config,
            Arc::new(KnowledgeStore::new()),
            Arc::new(SchemeInterpreter::new()),
        )
    }

    /// Create services around a host-supplied store and interpreter
    ///
    /// Files listed in `interpreter.preload` are evaluated into the store
    /// before the relay is built; the first failure aborts construction.
    pub fn with_interpreter(
        config: Config,
        store: Arc<KnowledgeStore>,
        interpreter: Arc<dyn Interpreter>,
    ) -> Result<Self> {
        for path in &config.interpreter.preload {
            let source = fs::read_to_string(path).map_err(|e| {
                RelayError::ConfigError(format!("Failed to read preload file {path:?}: {e}"))
            })?;

            interpreter.evaluate(&store, &source).map_err(|e| {
                RelayError::ConfigError(format!("Preload file {path:?} failed: {e}"))
            })?;

            tracing::info!(path = ?path, "Preloaded Scheme file");
        }

        let relay = CommandRelay::new(
            Arc::clone(&store),
            interpreter,
            config.relay.execution,
        );

        Ok(Self {
            store,
            relay,
            config: Arc::new(config),
        })
    }
}
