use std::sync::Arc;

use async_trait::async_trait;
use intake_core::{DomainEvent, EventHandler, HandlerError};
use intake_storage::RecordStore;
use tracing::{debug, warn};

/// Writes the event payload to the replica store.
///
/// Same contract as the primary write, against an independent connection
/// target. Replication runs in the publisher's call stack: it is
/// synchronous in execution even though the domain intent is asynchronous
/// DR replication.
pub struct ReplicateRecord {
    store: Arc<dyn RecordStore>,
}

impl ReplicateRecord {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EventHandler for ReplicateRecord {
    fn name(&self) -> &str {
        "replicate_record"
    }

    async fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        match self.store.create(&event.payload).await {
            Ok(()) => {
                debug!(
                    backend = self.store.backend_name(),
                    aggregate_id = ?event.aggregate_id,
                    "Replicated record on replica store"
                );
            }
            Err(e) => {
                warn!(
                    backend = self.store.backend_name(),
                    aggregate_id = ?event.aggregate_id,
                    error = %e,
                    "Failed to replicate record on replica store"
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_db_memory::MemoryRecordStore;

    #[tokio::test]
    async fn test_writes_payload_to_replica() {
        let store = Arc::new(MemoryRecordStore::new());
        let handler = ReplicateRecord::new(store.clone());

        let event = DomainEvent::new("E", serde_json::json!({"id": "2"}));
        handler.handle(&event).await.unwrap();

        assert_eq!(store.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_replica_failure_is_contained() {
        let store = Arc::new(MemoryRecordStore::new());
        store.fail_next_create();
        let handler = ReplicateRecord::new(store);

        let event = DomainEvent::new("E", serde_json::json!({"id": "2"}));
        assert!(handler.handle(&event).await.is_ok());
    }
}
