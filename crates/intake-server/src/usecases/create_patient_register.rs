use std::sync::Arc;

use intake_core::{ApiResponse, DomainEvent, EventDispatcher, PatientRecord};
use serde_json::Value;

/// Create a patient register record.
///
/// Validates the intake payload, publishes a record-created event, and
/// returns the envelope. Persistence happens entirely in the subscribed
/// handlers; this use case does not know which ones exist.
pub struct CreatePatientRegister {
    dispatcher: Arc<EventDispatcher>,
}

impl CreatePatientRegister {
    pub fn new(dispatcher: Arc<EventDispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn execute(&self, body: &Value) -> ApiResponse {
        let record = match PatientRecord::from_json(body) {
            Ok(record) => record,
            Err(e) => return ApiResponse::error("Data validation error", e.to_json()),
        };

        let payload = record.to_json();
        let event = DomainEvent::record_created(record.id, payload.clone());
        self.dispatcher.publish(&event).await;

        ApiResponse::success("Patient register created successfully", payload)
    }
}
