use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use intake_criteria::SqlValue;
use intake_storage::{RecordStore, StorageError};
use serde_json::Value;
use tokio::sync::RwLock;

/// In-memory record store.
///
/// Retains every created record and answers `query` with the retained set,
/// ignoring the SQL text (there is no engine behind it). Call counters make
/// write attempts observable to tests, and `fail_next_create` injects a
/// single create failure.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<Value>>,
    create_calls: AtomicU64,
    query_calls: AtomicU64,
    fail_next_create: AtomicBool,
    last_query: RwLock<Option<(String, Vec<SqlValue>)>>,
}

impl MemoryRecordStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `create` calls seen so far, including failed ones.
    pub fn create_calls(&self) -> u64 {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Number of `query` calls seen so far.
    pub fn query_calls(&self) -> u64 {
        self.query_calls.load(Ordering::SeqCst)
    }

    /// Make the next `create` call fail with a connection error.
    pub fn fail_next_create(&self) {
        self.fail_next_create.store(true, Ordering::SeqCst);
    }

    /// All records created so far.
    pub async fn records(&self) -> Vec<Value> {
        self.records.read().await.clone()
    }

    /// The SQL and parameters of the most recent `query` call.
    pub async fn last_query(&self) -> Option<(String, Vec<SqlValue>)> {
        self.last_query.read().await.clone()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(&self, record: &Value) -> Result<(), StorageError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_next_create.swap(false, Ordering::SeqCst) {
            return Err(StorageError::connection_error("induced create failure"));
        }

        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Value>, StorageError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.write().await = Some((sql.to_string(), params.to_vec()));
        Ok(self.records.read().await.clone())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_retains_records() {
        let store = MemoryRecordStore::new();
        store.create(&json!({"id": "1"})).await.unwrap();
        store.create(&json!({"id": "2"})).await.unwrap();

        assert_eq!(store.create_calls(), 2);
        assert_eq!(store.records().await.len(), 2);
    }

    #[tokio::test]
    async fn test_query_returns_retained_records() {
        let store = MemoryRecordStore::new();
        store.create(&json!({"id": "1"})).await.unwrap();

        let rows = store.query("SELECT * FROM patientregister", &[]).await.unwrap();
        assert_eq!(rows, vec![json!({"id": "1"})]);
        assert_eq!(store.query_calls(), 1);
        assert_eq!(
            store.last_query().await.unwrap().0,
            "SELECT * FROM patientregister"
        );
    }

    #[tokio::test]
    async fn test_fail_next_create_is_one_shot() {
        let store = MemoryRecordStore::new();
        store.fail_next_create();

        assert!(store.create(&json!({"id": "1"})).await.is_err());
        assert!(store.create(&json!({"id": "2"})).await.is_ok());

        // the failed attempt is still counted
        assert_eq!(store.create_calls(), 2);
        assert_eq!(store.records().await.len(), 1);
    }

    #[test]
    fn test_backend_name() {
        assert_eq!(MemoryRecordStore::new().backend_name(), "memory");
    }
}
