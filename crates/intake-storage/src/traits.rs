//! Storage traits for the intake storage abstraction layer.

use async_trait::async_trait;
use intake_criteria::SqlValue;
use serde_json::Value;

use crate::error::StorageError;

/// The opaque record store every backend must implement.
///
/// Implementations must be thread-safe (`Send + Sync`); connection pooling
/// and locking are the backend's concern, consumed rather than implemented
/// by callers.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persists a record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidRecord` if the record cannot be
    /// mapped to the backend's schema, or an infrastructure error.
    async fn create(&self, record: &Value) -> Result<(), StorageError>;

    /// Runs a compiled query with positional bind parameters and returns
    /// the matching rows as JSON objects, in backend order.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure or query issues; an empty
    /// result set is not an error.
    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Value>, StorageError>;

    /// Returns the name of this storage backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time test that RecordStore is object-safe
    fn _assert_store_object_safe(_: &dyn RecordStore) {}
}
