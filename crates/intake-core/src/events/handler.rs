//! Handler trait for the domain event system.
//!
//! Handlers are single-purpose side-effect units reacting to one event
//! name. They are expected to contain their own failures: an error returned
//! from [`EventHandler::handle`] is logged by the dispatcher and does not
//! stop delivery to later handlers.

use async_trait::async_trait;

use super::types::DomainEvent;

/// Error type for handler operations.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Handler execution failed with a message.
    #[error("Handler execution failed: {0}")]
    Execution(String),

    /// Handler failed while talking to its store.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic error with source.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HandlerError {
    /// Create an execution error from a string.
    pub fn execution(msg: impl Into<String>) -> Self {
        HandlerError::Execution(msg.into())
    }

    /// Create a storage error from a string.
    pub fn storage(msg: impl Into<String>) -> Self {
        HandlerError::Storage(msg.into())
    }
}

/// Capability implemented by every event handler.
///
/// The dispatcher never consumes a handler's return value beyond logging it;
/// delivery is fire-and-forget from the publisher's point of view.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Unique name for this handler (for logging).
    fn name(&self) -> &str;

    /// React to an event.
    async fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError>;
}
