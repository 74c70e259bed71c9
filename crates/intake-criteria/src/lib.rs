//! Filter/order/pagination criteria, independent of any query language,
//! plus the compiler that turns a criteria into a parameterized SQL query
//! and the parser that builds a criteria from raw query parameters.

pub mod compiler;
pub mod criteria;
pub mod parser;

pub use compiler::{compile, BuiltQuery, SqlValue};
pub use criteria::{Criteria, CriteriaError, Direction, Filter, Operator, Order, Pagination};
pub use parser::{parse, DEFAULT_PAGE, DEFAULT_PER_PAGE, MAX_FILTER_TRIPLES};
