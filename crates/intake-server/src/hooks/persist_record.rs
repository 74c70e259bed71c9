use std::sync::Arc;

use async_trait::async_trait;
use intake_core::{DomainEvent, EventHandler, HandlerError};
use intake_storage::RecordStore;
use tracing::{debug, warn};

/// Writes the event payload to the primary store.
///
/// A failed write is contained here: it is logged and the handler still
/// reports success, so later handlers run and the publisher never sees it.
pub struct PersistRecord {
    store: Arc<dyn RecordStore>,
}

impl PersistRecord {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EventHandler for PersistRecord {
    fn name(&self) -> &str {
        "persist_record"
    }

    async fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        match self.store.create(&event.payload).await {
            Ok(()) => {
                debug!(
                    backend = self.store.backend_name(),
                    aggregate_id = ?event.aggregate_id,
                    "Persisted record on primary store"
                );
            }
            Err(e) => {
                warn!(
                    backend = self.store.backend_name(),
                    aggregate_id = ?event.aggregate_id,
                    error = %e,
                    "Failed to persist record on primary store"
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
    async fn test_writes_payload_to_store() {
        let store = Arc::new(MemoryRecordStore::new());
        let handler = PersistRecord::new(store.clone());

        let event = DomainEvent::new("E", serde_json::json!({"id": "1"}));
        handler.handle(&event).await.unwrap();

        assert_eq!(store.create_calls(), 1);
        assert_eq!(store.records().await, vec![serde_json::json!({"id": "1"})]);
    }

    #[tokio::test]
    async fn test_store_failure_is_contained() {
        let store = Arc::new(MemoryRecordStore::new());
        store.fail_next_create();
        let handler = PersistRecord::new(store.clone());

        let event = DomainEvent::new("E", serde_json::json!({"id": "1"}));
        assert!(handler.handle(&event).await.is_ok());
        assert_eq!(store.create_calls(), 1);
    }
}
