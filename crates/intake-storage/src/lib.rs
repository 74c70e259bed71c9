//! Storage abstraction for the intake server.
//!
//! The persistence engine is an external collaborator consumed through the
//! [`RecordStore`] trait: `create` a record, or run a compiled `query`. The
//! domain layer never depends on a specific engine's wire format.

pub mod error;
pub mod traits;

pub use error::{ErrorCategory, StorageError};
pub use traits::RecordStore;
