//! Error types for the PostgreSQL storage backend.

use intake_storage::StorageError;
use sqlx_core::error::Error as SqlxError;

/// Errors specific to the PostgreSQL storage backend.
#[derive(Debug, thiserror::Error)]
pub enum PostgresError {
    /// Database error from the driver.
    #[error("Database error: {0}")]
    Database(#[from] sqlx_core::error::Error),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl PostgresError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Convenience result type for backend-internal operations.
pub type Result<T> = std::result::Result<T, PostgresError>;

impl From<PostgresError> for StorageError {
    fn from(err: PostgresError) -> Self {
        match err {
            PostgresError::Database(e) => map_sqlx_error(e),
            PostgresError::Config { message } => StorageError::internal(message),
        }
    }
}

/// Maps a driver error onto the storage error taxonomy.
pub fn map_sqlx_error(err: SqlxError) -> StorageError {
    match &err {
        SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::Io(_) | SqlxError::Tls(_) => {
            StorageError::connection_error(err.to_string())
        }
        SqlxError::Database(_) | SqlxError::ColumnNotFound(_) | SqlxError::ColumnDecode { .. } => {
            StorageError::query_error(err.to_string())
        }
        _ => StorageError::internal(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_maps_to_connection_error() {
        let err = map_sqlx_error(SqlxError::PoolTimedOut);
        assert!(matches!(err, StorageError::ConnectionError { .. }));
    }

    #[test]
    fn test_column_not_found_maps_to_query_error() {
        let err = map_sqlx_error(SqlxError::ColumnNotFound("nope".into()));
        assert!(matches!(err, StorageError::QueryError { .. }));
    }

    #[test]
    fn test_config_error_maps_to_internal() {
        let err: StorageError = PostgresError::config("bad url").into();
        assert!(matches!(err, StorageError::Internal { .. }));
    }
}
