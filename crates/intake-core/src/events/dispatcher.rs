//! Event dispatcher: a name-keyed registry with synchronous, ordered delivery.
//!
//! The dispatcher is built once at startup, subscribed while still
//! exclusively owned, and then shared by reference with request handling.
//! `publish` awaits each matching handler to completion, one at a time, in
//! subscription order, on the caller's task; there is no spawn, no timeout
//! and no cancellation at this level.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::handler::EventHandler;
use super::types::DomainEvent;

/// Registry mapping event names to ordered handler lists.
#[derive(Default)]
pub struct EventDispatcher {
    subscribers: HashMap<String, Vec<Arc<dyn EventHandler>>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
        }
    }

    /// Append a handler to the list for an event name.
    ///
    /// Duplicate subscriptions are kept: a handler subscribed twice runs
    /// once per subscription.
    pub fn subscribe(&mut self, event_name: impl Into<String>, handler: Arc<dyn EventHandler>) {
        let event_name = event_name.into();
        debug!(event = %event_name, handler = %handler.name(), "Subscribed event handler");
        self.subscribers.entry(event_name).or_default().push(handler);
    }

    /// Number of handlers subscribed to an event name.
    pub fn handler_count(&self, event_name: &str) -> usize {
        self.subscribers.get(event_name).map_or(0, Vec::len)
    }

    /// Deliver an event to every handler subscribed to `event.name`.
    ///
    /// The event's own declared name is authoritative. Handlers run
    /// strictly in subscription order, each completing before the next
    /// begins; a handler error is logged and delivery continues. With no
    /// subscribers this is a successful no-op.
    pub async fn publish(&self, event: &DomainEvent) {
        let Some(handlers) = self.subscribers.get(&event.name) else {
            debug!(event = %event.name, "No handlers subscribed");
            return;
        };

        for handler in handlers {
            if let Err(e) = handler.handle(event).await {
                warn!(
                    event = %event.name,
                    handler = %handler.name(),
                    error = %e,
                    "Event handler failed"
                );
            }
        }
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("event_names", &self.subscribers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
