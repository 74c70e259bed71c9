use std::sync::Arc;

use intake_core::ApiResponse;
use intake_criteria::{compile, Criteria};
use intake_storage::RecordStore;
use serde_json::json;
use tracing::warn;

/// Table queried by the read path.
pub const PATIENT_REGISTER_TABLE: &str = "patientregister";

/// Columns callers may filter or order by. Checked before compilation;
/// ORDER BY fields cannot be parameter-bound, so nothing outside this list
/// ever reaches the compiler.
pub const PATIENT_REGISTER_COLUMNS: &[&str] = &[
    "id",
    "first_name",
    "last_name",
    "date_of_birth",
    "email",
    "phone_number",
    "address",
    "emergency_contact",
];

/// Query patient register records by criteria, against the replica store.
pub struct GetPatientRegister {
    store: Arc<dyn RecordStore>,
}

impl GetPatientRegister {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, criteria: &Criteria) -> ApiResponse {
        if let Err(e) = criteria.validate_fields(PATIENT_REGISTER_COLUMNS) {
            return ApiResponse::error("Invalid query criteria", json!({"detail": e.to_string()}));
        }

        let query = match compile(criteria, PATIENT_REGISTER_TABLE) {
            Ok(query) => query,
            Err(e) => {
                return ApiResponse::error(
                    "Invalid query criteria",
                    json!({"detail": e.to_string()}),
                );
            }
        };

        match self.store.query(&query.sql, &query.params).await {
            Ok(rows) => ApiResponse::success(
                "Patient registers retrieved successfully",
                json!({"patient_registers": rows}),
            ),
            Err(e) => {
                warn!(
                    backend = self.store.backend_name(),
                    error = %e,
                    "Patient register query failed"
                );
                ApiResponse::error("Internal server error", json!({}))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_criteria::{Direction, Filter, Order, Pagination, SqlValue};
    use intake_db_memory::MemoryRecordStore;

    fn criteria_for_smith() -> Criteria {
        let mut criteria = Criteria::new();
        criteria.add_filter(Filter::new(
            "last_name",
            "EQUAL",
            SqlValue::Text("Smith".into()),
        ));
        criteria.set_pagination(Pagination::new(2, 10));
        criteria
    }

    #[tokio::test]
    async fn test_compiled_query_reaches_the_store() {
        let store = Arc::new(MemoryRecordStore::new());
        store.create(&json!({"last_name": "Smith"})).await.unwrap();
        let use_case = GetPatientRegister::new(store.clone());

        let response = use_case.execute(&criteria_for_smith()).await;

        assert_eq!(response.code, 200);
        assert_eq!(
            response.data["patient_registers"],
            json!([{"last_name": "Smith"}])
        );

        let (sql, params) = store.last_query().await.unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM patientregister WHERE last_name = $1 LIMIT $2 OFFSET $3"
        );
        assert_eq!(
            params,
            vec![
                SqlValue::Text("Smith".into()),
                SqlValue::Integer(10),
                SqlValue::Integer(10),
            ]
        );
    }

    #[tokio::test]
    async fn test_unlisted_field_is_rejected_before_any_query() {
        let store = Arc::new(MemoryRecordStore::new());
        let use_case = GetPatientRegister::new(store.clone());

        let mut criteria = Criteria::new();
        criteria.add_filter(Filter::new("ssn", "EQUAL", SqlValue::Text("x".into())));
        let response = use_case.execute(&criteria).await;

        assert_eq!(response.code, 400);
        assert_eq!(store.query_calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_operator_is_rejected_before_any_query() {
        let store = Arc::new(MemoryRecordStore::new());
        let use_case = GetPatientRegister::new(store.clone());

        let mut criteria = Criteria::new();
        criteria.add_filter(Filter::new(
            "last_name",
            "SOUNDS_LIKE",
            SqlValue::Text("Smith".into()),
        ));
        let response = use_case.execute(&criteria).await;

        assert_eq!(response.code, 400);
        assert!(!response.is_success);
        assert_eq!(store.query_calls(), 0);
    }

    #[tokio::test]
    async fn test_order_field_goes_through_allow_list() {
        let store = Arc::new(MemoryRecordStore::new());
        let use_case = GetPatientRegister::new(store.clone());

        let mut criteria = Criteria::new();
        criteria.set_order(Order::new("created_at", Direction::Desc));
        let response = use_case.execute(&criteria).await;

        assert_eq!(response.code, 400);
        assert_eq!(store.query_calls(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_yields_generic_error() {
        struct FailingStore;

        #[async_trait::async_trait]
        impl RecordStore for FailingStore {
            async fn create(
                &self,
                _record: &serde_json::Value,
            ) -> Result<(), intake_storage::StorageError> {
                unreachable!("read path never creates")
            }

            async fn query(
                &self,
                _sql: &str,
                _params: &[SqlValue],
            ) -> Result<Vec<serde_json::Value>, intake_storage::StorageError> {
                Err(intake_storage::StorageError::connection_error("down"))
            }

            fn backend_name(&self) -> &'static str {
                "failing"
            }
        }

        let use_case = GetPatientRegister::new(Arc::new(FailingStore));
        let response = use_case.execute(&Criteria::new()).await;

        assert_eq!(response.code, 400);
        assert_eq!(response.message, "Internal server error");
        assert_eq!(response.data, json!({}));
    }
}
