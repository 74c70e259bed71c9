use async_trait::async_trait;
use intake_core::{DomainEvent, EventHandler, HandlerError};
use tracing::info;

/// Emits a structured log line for every record-created event.
#[derive(Debug, Default)]
pub struct LogRecordCreated;

impl LogRecordCreated {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventHandler for LogRecordCreated {
    fn name(&self) -> &str {
        "log_record_created"
    }

    async fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        info!(
            event = %event.name,
            event_id = %event.id,
            aggregate_id = ?event.aggregate_id,
            "Domain event received"
        );
        Ok(())
    }
}
