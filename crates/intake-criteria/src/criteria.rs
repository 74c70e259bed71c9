//! In-memory description of a filter/order/pagination request.
//!
//! A criteria is built up mutably (one filter at a time, in the order the
//! caller supplies them) and treated as immutable once handed to the
//! compiler. Filter insertion order determines the generated `AND` chain.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compiler::SqlValue;

/// Errors raised while validating or compiling a criteria.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CriteriaError {
    /// The operator token is not one of the enumerated set.
    #[error("Invalid filter operator: {0}")]
    InvalidOperator(String),

    /// A field or table token is not a safe SQL identifier.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A field is not in the caller's column allow-list.
    #[error("Field not allowed: {0}")]
    FieldNotAllowed(String),
}

/// Comparison operators accepted in filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl Operator {
    /// Parse a wire token.
    ///
    /// Unknown tokens are a hard error; they must never fall back to
    /// equality.
    pub fn parse(token: &str) -> Result<Self, CriteriaError> {
        match token {
            "EQUAL" => Ok(Self::Equal),
            "NOT_EQUAL" => Ok(Self::NotEqual),
            "LESS_THAN" => Ok(Self::LessThan),
            "LESS_THAN_OR_EQUAL" => Ok(Self::LessThanOrEqual),
            "GREATER_THAN" => Ok(Self::GreaterThan),
            "GREATER_THAN_OR_EQUAL" => Ok(Self::GreaterThanOrEqual),
            other => Err(CriteriaError::InvalidOperator(other.to_string())),
        }
    }

    /// Get the SQL operator string.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
        }
    }
}

/// A single filter predicate.
///
/// The operator is carried as the raw caller-supplied token so that
/// building a criteria can never fail; `Operator::parse` runs at
/// compilation time and rejects unknown tokens there.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub operator: String,
    pub value: SqlValue,
}

impl Filter {
    pub fn new(field: impl Into<String>, operator: impl Into<String>, value: SqlValue) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value,
        }
    }
}

/// Sort direction for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// Parse a direction token, case-insensitively.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Single-key sort specification. At most one per criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub field: String,
    pub direction: Direction,
}

impl Order {
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// Page-based pagination. The offset is derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// Rows to skip: `(page - 1) * per_page`.
    pub fn offset(&self) -> u32 {
        self.page.saturating_sub(1) * self.per_page
    }
}

/// Ordered filters plus an optional order and pagination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub pagination: Option<Pagination>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter; insertion order is preserved through compilation.
    pub fn add_filter(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    pub fn set_order(&mut self, order: Order) {
        self.order = Some(order);
    }

    pub fn set_pagination(&mut self, pagination: Pagination) {
        self.pagination = Some(pagination);
    }

    /// Check every filter field and the order field against a column
    /// allow-list.
    ///
    /// The compiler does not know the schema; callers run this before
    /// compiling. ORDER BY fields in particular cannot be parameter-bound,
    /// so an unlisted field is rejected outright.
    pub fn validate_fields(&self, allowed: &[&str]) -> Result<(), CriteriaError> {
        for filter in &self.filters {
            if !allowed.contains(&filter.field.as_str()) {
                return Err(CriteriaError::FieldNotAllowed(filter.field.clone()));
            }
        }
        if let Some(order) = &self.order {
            if !allowed.contains(&order.field.as_str()) {
                return Err(CriteriaError::FieldNotAllowed(order.field.clone()));
            }
        }
        Ok(())
    }
}
