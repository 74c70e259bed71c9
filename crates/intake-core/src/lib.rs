pub mod error;
pub mod events;
pub mod id;
pub mod record;
pub mod response;
pub mod time;

pub use error::{CoreError, Result};
pub use events::{DomainEvent, EventDispatcher, EventHandler, HandlerError, RECORD_CREATED};
pub use id::generate_id;
pub use record::{PatientRecord, ValidationError};
pub use response::ApiResponse;
pub use time::now_utc;
