//! PostgreSQL storage backend.
//!
//! Implements [`intake_storage::RecordStore`] on top of sqlx-postgres. The
//! expected table layout is in `schema.sql`; primary and replica targets
//! are just two instances of this backend built from different
//! configurations.

pub mod config;
pub mod error;
pub mod pool;
pub mod store;

pub use config::PostgresConfig;
pub use pool::create_pool;
pub use store::PostgresRecordStore;
