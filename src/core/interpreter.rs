//! Interpreter collaborator and the seam that runs it
//!
//! [`Interpreter`] is the contract the relay consumes: evaluate one
//! command against a knowledge store and return its serialized result.
//! The call is blocking. [`CommandInvoker`] wraps it so a request handler
//! can await completion without caring where the call actually runs.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::error::{RelayError, Result};
use crate::core::scheme::EvalError;
use crate::core::store::KnowledgeStore;

/// An interpreter that evaluates textual commands against a store
///
/// Implementations may mutate the store; that is their purpose.
pub trait Interpreter: Send + Sync {
    /// Evaluate `command`, returning the interpreter's own textual
    /// serialization of the result
    fn evaluate(
        &self,
        store: &KnowledgeStore,
        command: &str,
    ) -> std::result::Result<String, EvalError>;
}

/// Where blocking interpreter calls run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Offload to the runtime's blocking thread pool and await the result
    #[default]
    BlockingPool,
    /// Run directly on the request task
    Inline,
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionMode::BlockingPool => f.write_str("blocking_pool"),
            ExecutionMode::Inline => f.write_str("inline"),
        }
    }
}

impl std::str::FromStr for ExecutionMode {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "blocking_pool" => Ok(ExecutionMode::BlockingPool),
            "inline" => Ok(ExecutionMode::Inline),
            other => Err(RelayError::ConfigError(format!(
                "Unknown execution mode '{other}' (expected blocking_pool or inline)"
            ))),
        }
    }
}

/// Runs one command to completion on behalf of a request
///
/// There is no cancellation: once `invoke` starts the interpreter call,
/// it runs to the end even if the caller goes away.
#[async_trait]
pub trait CommandInvoker: Send + Sync {
    async fn invoke(&self, command: String) -> Result<String>;
}

/// Build the invoker for an execution mode
pub fn invoker_for(
    mode: ExecutionMode,
    store: Arc<KnowledgeStore>,
    interpreter: Arc<dyn Interpreter>,
) -> Arc<dyn CommandInvoker> {
    match mode {
        ExecutionMode::BlockingPool => Arc::new(BlockingPoolInvoker::new(store, interpreter)),
        ExecutionMode::Inline => Arc::new(InlineInvoker::new(store, interpreter)),
    }
}

/// Offloads each call to `tokio::task::spawn_blocking`
pub struct BlockingPoolInvoker {
    store: Arc<KnowledgeStore>,
    interpreter: Arc<dyn Interpreter>,
}

impl BlockingPoolInvoker {
    pub fn new(store: Arc<KnowledgeStore>, interpreter: Arc<dyn Interpreter>) -> Self {
        Self { store, interpreter }
    }
}

#[async_trait]
impl CommandInvoker for BlockingPoolInvoker {
    async fn invoke(&self, command: String) -> Result<String> {
        let store = Arc::clone(&self.store);
        let interpreter = Arc::clone(&self.interpreter);

        let outcome = tokio::task::spawn_blocking(move || interpreter.evaluate(&store, &command))
            .await
            .map_err(|e| RelayError::ExecutionFailed(e.to_string()))?;

        Ok(outcome?)
    }
}

/// Calls the interpreter on the current task
///
/// A panic inside the interpreter is caught and reported as
/// `ExecutionFailed`, matching the blocking-pool behaviour.
pub struct InlineInvoker {
    store: Arc<KnowledgeStore>,
    interpreter: Arc<dyn Interpreter>,
}

impl InlineInvoker {
    pub fn new(store: Arc<KnowledgeStore>, interpreter: Arc<dyn Interpreter>) -> Self {
        Self { store, interpreter }
    }
}

#[async_trait]
impl CommandInvoker for InlineInvoker {
    async fn invoke(&self, command: String) -> Result<String> {
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.interpreter.evaluate(&self.store, &command)
        }))
        .map_err(|_| RelayError::ExecutionFailed("interpreter panicked".to_string()))?;

        Ok(outcome?)
    }
}
