//! Event types for the domain event system.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

/// Event name published when a patient register record has been accepted.
pub const RECORD_CREATED: &str = "PatientRegisterCreated";

/// An immutable fact produced by a write operation.
///
/// Events are constructed once by the publishing use case and handed to the
/// dispatcher by reference; handlers get a read-only view and must not
/// mutate the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event id, generated at creation.
    pub id: Uuid,
    /// When the event occurred.
    #[serde(with = "time::serde::rfc3339")]
    pub occurred_at: OffsetDateTime,
    /// Event name; the dispatcher routes on this.
    pub name: String,
    /// Aggregate the event belongs to, if any.
    pub aggregate_id: Option<Uuid>,
    /// Event payload as JSON.
    pub payload: Value,
}

impl DomainEvent {
    /// Create a new event with a fresh id and the current UTC timestamp.
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            occurred_at: OffsetDateTime::now_utc(),
            name: name.into(),
            aggregate_id: None,
            payload,
        }
    }

    /// Create a "record created" event for an aggregate.
    pub fn record_created(aggregate_id: Uuid, payload: Value) -> Self {
        Self::new(RECORD_CREATED, payload).with_aggregate(aggregate_id)
    }

    /// Set the aggregate id.
    pub fn with_aggregate(mut self, aggregate_id: Uuid) -> Self {
        self.aggregate_id = Some(aggregate_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_created_event() {
        let aggregate = Uuid::new_v4();
        let event = DomainEvent::record_created(aggregate, serde_json::json!({"a": 1}));
        assert_eq!(event.name, RECORD_CREATED);
        assert_eq!(event.aggregate_id, Some(aggregate));
        assert_eq!(event.payload, serde_json::json!({"a": 1}));
    }

    #[test]
    fn test_event_ids_are_unique() {
        let a = DomainEvent::new("E", Value::Null);
        let b = DomainEvent::new("E", Value::Null);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_event_serialization() {
        let event = DomainEvent::new("SomethingHappened", serde_json::json!({"k": "v"}));
        let json = serde_json::to_string(&event).unwrap();
        let parsed: DomainEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, "SomethingHappened");
        assert_eq!(parsed.id, event.id);
        assert_eq!(parsed.payload, event.payload);
    }
}
