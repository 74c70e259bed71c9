//! Compiles a [`Criteria`] into a parameterized SQL query.
//!
//! Every caller-supplied value is bound as a `$N` parameter, never
//! interpolated into the query text; that is a correctness invariant, not a
//! style choice. PostgreSQL accepts parameterized LIMIT/OFFSET, so
//! pagination values are bound as well. Field and table tokens cannot be
//! bound, so they are restricted to safe identifiers here and checked
//! against a column allow-list by the caller beforehand.
//!
//! Compilation is pure: the same criteria and table always produce the same
//! query string and parameter list.

use serde::{Deserialize, Serialize};

use crate::criteria::{Criteria, CriteriaError, Operator};

/// SQL value types for parameterized queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl SqlValue {
    /// Get the value as a string for display/debugging.
    pub fn as_display_str(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Null => "NULL".to_string(),
        }
    }
}

/// A compiled query: SQL text plus positional bind parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Validate an identifier (table name, column name).
///
/// Only allows alphanumeric characters and underscores.
fn validate_identifier(name: &str) -> Result<(), CriteriaError> {
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(CriteriaError::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}

/// Translate a criteria into `SELECT * FROM <table> ...` with bound
/// parameters.
///
/// Filters render in insertion order as an `AND` chain; an unknown
/// operator token fails compilation before any query could execute.
pub fn compile(criteria: &Criteria, table: &str) -> Result<BuiltQuery, CriteriaError> {
    validate_identifier(table)?;

    let mut sql = format!("SELECT * FROM {table}");
    let mut params = Vec::new();

    if !criteria.filters.is_empty() {
        let mut clauses = Vec::with_capacity(criteria.filters.len());
        for filter in &criteria.filters {
            validate_identifier(&filter.field)?;
            let operator = Operator::parse(&filter.operator)?;
            params.push(filter.value.clone());
            clauses.push(format!(
                "{} {} ${}",
                filter.field,
                operator.as_sql(),
                params.len()
            ));
        }
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    if let Some(order) = &criteria.order {
        validate_identifier(&order.field)?;
        sql.push_str(&format!(
            " ORDER BY {} {}",
            order.field,
            order.direction.as_sql()
        ));
    }

    if let Some(pagination) = &criteria.pagination {
        params.push(SqlValue::Integer(i64::from(pagination.per_page)));
        sql.push_str(&format!(" LIMIT ${}", params.len()));
        params.push(SqlValue::Integer(i64::from(pagination.offset())));
        sql.push_str(&format!(" OFFSET ${}", params.len()));
    }

    Ok(BuiltQuery { sql, params })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{Direction, Filter, Order, Pagination};

    const TABLE: &str = "patientregister";

    #[test]
    fn test_bare_criteria_compiles_to_plain_select() {
        let query = compile(&Criteria::new(), TABLE).unwrap();
        assert_eq!(query.sql, "SELECT * FROM patientregister");
        assert!(query.params.is_empty());
    }

    #[test]
    fn test_filters_join_with_and_in_insertion_order() {
        let mut criteria = Criteria::new();
        criteria.add_filter(Filter::new(
            "last_name",
            "EQUAL",
            SqlValue::Text("Smith".into()),
        ));
        criteria.add_filter(Filter::new(
            "first_name",
            "NOT_EQUAL",
            SqlValue::Text("Jane".into()),
        ));
        criteria.add_filter(Filter::new(
            "phone_number",
            "GREATER_THAN",
            SqlValue::Text("555".into()),
        ));

        let query = compile(&criteria, TABLE).unwrap();
        assert_eq!(
            query.sql,
            "SELECT * FROM patientregister \
             WHERE last_name = $1 AND first_name != $2 AND phone_number > $3"
        );
        assert_eq!(
            query.params,
            vec![
                SqlValue::Text("Smith".into()),
                SqlValue::Text("Jane".into()),
                SqlValue::Text("555".into()),
            ]
        );
    }

    #[test]
    fn test_unknown_operator_fails_compilation() {
        let mut criteria = Criteria::new();
        criteria.add_filter(Filter::new(
            "last_name",
            "MATCHES",
            SqlValue::Text("Smith".into()),
        ));
        let err = compile(&criteria, TABLE).unwrap_err();
        assert_eq!(err, CriteriaError::InvalidOperator("MATCHES".to_string()));
    }

    #[test]
    fn test_order_clause() {
        let mut criteria = Criteria::new();
        criteria.set_order(Order::new("last_name", Direction::Desc));
        let query = compile(&criteria, TABLE).unwrap();
        assert_eq!(
            query.sql,
            "SELECT * FROM patientregister ORDER BY last_name DESC"
        );
    }

    #[test]
    fn test_pagination_binds_limit_and_offset() {
        let mut criteria = Criteria::new();
        criteria.set_pagination(Pagination::new(3, 25));
        let query = compile(&criteria, TABLE).unwrap();
        assert_eq!(query.sql, "SELECT * FROM patientregister LIMIT $1 OFFSET $2");
        assert_eq!(
            query.params,
            vec![SqlValue::Integer(25), SqlValue::Integer(50)]
        );
    }

    #[test]
    fn test_full_query_shape() {
        // filter + pagination, the shape the read endpoint produces
        let mut criteria = Criteria::new();
        criteria.add_filter(Filter::new(
            "last_name",
            "EQUAL",
            SqlValue::Text("Smith".into()),
        ));
        criteria.set_pagination(Pagination::new(2, 10));

        let query = compile(&criteria, TABLE).unwrap();
        assert_eq!(
            query.sql,
            "SELECT * FROM patientregister WHERE last_name = $1 LIMIT $2 OFFSET $3"
        );
        assert_eq!(
            query.params,
            vec![
                SqlValue::Text("Smith".into()),
                SqlValue::Integer(10),
                SqlValue::Integer(10),
            ]
        );
    }

    #[test]
    fn test_compile_is_referentially_transparent() {
        let mut criteria = Criteria::new();
        criteria.add_filter(Filter::new(
            "email",
            "EQUAL",
            SqlValue::Text("a@b.org".into()),
        ));
        criteria.set_order(Order::new("last_name", Direction::Asc));
        criteria.set_pagination(Pagination::new(1, 10));

        let first = compile(&criteria, TABLE).unwrap();
        let second = compile(&criteria, TABLE).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unsafe_field_identifier_rejected() {
        let mut criteria = Criteria::new();
        criteria.add_filter(Filter::new(
            "last_name; DROP TABLE patientregister",
            "EQUAL",
            SqlValue::Text("x".into()),
        ));
        assert!(matches!(
            compile(&criteria, TABLE),
            Err(CriteriaError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_unsafe_table_identifier_rejected() {
        assert!(matches!(
            compile(&Criteria::new(), "patientregister--"),
            Err(CriteriaError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_unsafe_order_field_rejected() {
        let mut criteria = Criteria::new();
        criteria.set_order(Order::new("last_name DESC; --", Direction::Asc));
        assert!(matches!(
            compile(&criteria, TABLE),
            Err(CriteriaError::InvalidIdentifier(_))
        ));
    }
}
