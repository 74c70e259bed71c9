//! PostgreSQL implementation of the RecordStore trait.

use async_trait::async_trait;
use intake_core::PatientRecord;
use intake_criteria::SqlValue;
use intake_storage::{RecordStore, StorageError};
use serde_json::{Map, Value};
use sqlx_core::column::Column;
use sqlx_core::row::Row;
use sqlx_postgres::{PgPool, PgRow, Postgres};
use time::macros::format_description;
use tracing::debug;
use uuid::Uuid;

use crate::config::PostgresConfig;
use crate::error::map_sqlx_error;
use crate::pool;

const INSERT_SQL: &str = "INSERT INTO patientregister \
    (id, first_name, last_name, date_of_birth, email, phone_number, address, \
     emergency_contact, allergies, medical_history, current_medications) \
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)";

/// PostgreSQL record store.
///
/// Primary and replica targets are separate instances of this type, each
/// with its own pool.
#[derive(Debug, Clone)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    /// Creates a new store with its own connection pool.
    pub async fn new(config: &PostgresConfig) -> Result<Self, StorageError> {
        let pool = pool::create_pool(config).await.map_err(StorageError::from)?;
        Ok(Self { pool })
    }

    /// Creates a store from an existing connection pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn create(&self, record: &Value) -> Result<(), StorageError> {
        let record: PatientRecord = serde_json::from_value(record.clone())
            .map_err(|e| StorageError::invalid_record(e.to_string()))?;

        sqlx_core::query::query::<Postgres>(INSERT_SQL)
            .bind(record.id)
            .bind(&record.first_name)
            .bind(&record.last_name)
            .bind(record.date_of_birth)
            .bind(&record.email)
            .bind(&record.phone_number)
            .bind(&record.address)
            .bind(&record.emergency_contact)
            .bind(&record.allergies)
            .bind(&record.medical_history)
            .bind(&record.current_medications)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(id = %record.id, "Inserted patient register record");
        Ok(())
    }

    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Value>, StorageError> {
        let mut query = sqlx_core::query::query::<Postgres>(sql);
        for param in params {
            query = match param {
                SqlValue::Text(s) => query.bind(s.as_str()),
                SqlValue::Integer(i) => query.bind(*i),
                SqlValue::Float(f) => query.bind(*f),
                SqlValue::Boolean(b) => query.bind(*b),
                SqlValue::Null => query.bind(Option::<String>::None),
            };
        }

        let rows = query.fetch_all(&self.pool).await.map_err(map_sqlx_error)?;
        rows.iter().map(row_to_json).collect()
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

/// Re-assembles a row as a JSON object, column by column.
fn row_to_json(row: &PgRow) -> Result<Value, StorageError> {
    let mut object = Map::new();
    for (index, column) in row.columns().iter().enumerate() {
        object.insert(column.name().to_string(), decode_column(row, index)?);
    }
    Ok(Value::Object(object))
}

/// Decodes one column into JSON by trying the types the schema uses.
fn decode_column(row: &PgRow, index: usize) -> Result<Value, StorageError> {
    if let Ok(value) = row.try_get::<Option<Uuid>, _>(index) {
        return Ok(value.map_or(Value::Null, |v| Value::String(v.to_string())));
    }
    if let Ok(value) = row.try_get::<Option<time::Date>, _>(index) {
        let format = format_description!("[year]-[month]-[day]");
        return Ok(value.map_or(Ok(Value::Null), |v| {
            v.format(&format)
                .map(Value::String)
                .map_err(|e| StorageError::internal(e.to_string()))
        })?);
    }
    if let Ok(value) = row.try_get::<Option<String>, _>(index) {
        return Ok(value.map_or(Value::Null, Value::String));
    }
    if let Ok(value) = row.try_get::<Option<i64>, _>(index) {
        return Ok(value.map_or(Value::Null, Value::from));
    }
    if let Ok(value) = row.try_get::<Option<f64>, _>(index) {
        return Ok(value.map_or(Value::Null, Value::from));
    }
    if let Ok(value) = row.try_get::<Option<bool>, _>(index) {
        return Ok(value.map_or(Value::Null, Value::Bool));
    }
    if let Ok(value) = row.try_get::<Option<Vec<String>>, _>(index) {
        return Ok(value.map_or(Value::Null, |v| {
            Value::Array(v.into_iter().map(Value::String).collect())
        }));
    }
    if let Ok(value) = row.try_get::<Option<Value>, _>(index) {
        return Ok(value.unwrap_or(Value::Null));
    }
    Err(StorageError::query_error(format!(
        "unsupported column type at index {index}"
    )))
}
