//! Event handlers for the record-created fan-out.
//!
//! Three independent side-effect units react to [`RECORD_CREATED`]: a
//! structured log line, the primary-store write, and the replica-store
//! write. Each contains its own store failures; none of them can abort the
//! dispatch loop or surface an error to the publisher.
//!
//! [`RECORD_CREATED`]: intake_core::RECORD_CREATED

pub mod log_record;
pub mod persist_record;
pub mod replicate_record;

pub use log_record::LogRecordCreated;
pub use persist_record::PersistRecord;
pub use replicate_record::ReplicateRecord;
