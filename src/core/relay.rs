//! Command relay
//!
//! Protocol-agnostic core of the endpoint: extract the command from a
//! request body, hand it to the interpreter, wrap the result. Each
//! submission is independent; nothing is cached or deduplicated, and
//! concurrent submissions are not serialized against each other.

use std::sync::Arc;

use crate::core::error::{RelayError, Result};
use crate::core::interpreter::{invoker_for, CommandInvoker, ExecutionMode, Interpreter};
use crate::core::store::KnowledgeStore;
use crate::core::types::{CommandRequest, CommandResponse};

/// Relay bound to one interpreter and one knowledge store
#[derive(Clone)]
pub struct CommandRelay {
    invoker: Arc<dyn CommandInvoker>,
}

impl CommandRelay {
    /// Bind a relay to a store and interpreter
    ///
    /// The store stays owned by the caller; the relay never resets it.
    pub fn new(
        store: Arc<KnowledgeStore>,
        interpreter: Arc<dyn Interpreter>,
        mode: ExecutionMode,
    ) -> Self {
        Self::with_invoker(invoker_for(mode, store, interpreter))
    }

    /// Build a relay around a custom invoker
    pub fn with_invoker(invoker: Arc<dyn CommandInvoker>) -> Self {
        Self { invoker }
    }

    /// Parse a raw JSON body into a command
    ///
    /// Unparseable bodies, non-string commands and absent commands all
    /// collapse into `InvalidRequest`.
    pub fn extract_command(body: &[u8]) -> Result<String> {
        let request: CommandRequest = serde_json::from_slice(body).map_err(|e| {
            tracing::debug!(error = %e, "Request body is not a command object");
            RelayError::InvalidRequest
        })?;

        request.command.ok_or(RelayError::InvalidRequest)
    }

    /// Run one command and wrap the interpreter output
    pub async fn execute(&self, command: String) -> Result<CommandResponse> {
        tracing::debug!(command_len = command.len(), "Dispatching command");

        let response = self.invoker.invoke(command).await.map_err(|e| {
            tracing::error!(error = %e, "Command failed");
            e
        })?;

        Ok(CommandResponse { response })
    }

    /// Extract, invoke and format for a raw request body
    pub async fn submit(&self, body: &[u8]) -> Result<CommandResponse> {
        let command = Self::extract_command(body).map_err(|e| {
            tracing::warn!("Rejected request without a command");
            e
        })?;

        self.execute(command).await
    }
}
