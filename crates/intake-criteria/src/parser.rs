//! Builds a [`Criteria`] from a flat map of raw query parameters.
//!
//! The parser never fails: malformed or partial input is skipped and the
//! worst case is a criteria with no filters, no order and default
//! pagination.

use std::collections::HashMap;

use crate::compiler::SqlValue;
use crate::criteria::{Criteria, Direction, Filter, Order, Pagination};

/// Default page when absent, non-numeric, or not above the default.
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size when absent, non-numeric, or not above the default.
pub const DEFAULT_PER_PAGE: u32 = 10;
/// Highest filter-triple index scanned (exclusive).
pub const MAX_FILTER_TRIPLES: usize = 10;

/// Convert raw key/value query parameters into a criteria.
///
/// Recognized keys:
/// - `orderBy` + `order`: an order is built only when both are present and
///   the direction token is recognized; anything else is silently ignored.
/// - `{i}_field` / `{i}_operator` / `{i}_value` for `i` in
///   `0..MAX_FILTER_TRIPLES`: an index missing any of the three keys is
///   skipped and scanning continues with the next index.
/// - `page` / `per_page`: numeric strings; a value is adopted only when it
///   is strictly greater than its default, so `page=0` and `per_page=3`
///   both fall back. Pagination is always set on the result.
pub fn parse(query_params: &HashMap<String, String>) -> Criteria {
    let mut criteria = Criteria::new();

    if let (Some(field), Some(direction)) = (query_params.get("orderBy"), query_params.get("order"))
    {
        if let Some(direction) = Direction::parse(direction) {
            criteria.set_order(Order::new(field.clone(), direction));
        }
    }

    for i in 0..MAX_FILTER_TRIPLES {
        let field = query_params.get(&format!("{i}_field"));
        let operator = query_params.get(&format!("{i}_operator"));
        let value = query_params.get(&format!("{i}_value"));
        if let (Some(field), Some(operator), Some(value)) = (field, operator, value) {
            criteria.add_filter(Filter::new(
                field.clone(),
                operator.clone(),
                SqlValue::Text(value.clone()),
            ));
        }
    }

    let page = numeric_param(query_params, "page")
        .filter(|&value| value > DEFAULT_PAGE)
        .unwrap_or(DEFAULT_PAGE);
    let per_page = numeric_param(query_params, "per_page")
        .filter(|&value| value > DEFAULT_PER_PAGE)
        .unwrap_or(DEFAULT_PER_PAGE);
    criteria.set_pagination(Pagination::new(page, per_page));

    criteria
}

/// A parameter counts as numeric only when every character is an ASCII
/// digit; signs, spaces and decimals all fall back to the default.
fn numeric_param(query_params: &HashMap<String, String>, key: &str) -> Option<u32> {
    let raw = query_params.get(key)?;
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
