//! Application use cases.
//!
//! Thin coordination layers over the domain: the write path validates,
//! publishes, and answers; the read path validates criteria fields,
//! compiles, and queries. Neither knows which event handlers exist or what
//! engine backs the stores.

pub mod create_patient_register;
pub mod get_patient_register;

pub use create_patient_register::CreatePatientRegister;
pub use get_patient_register::{GetPatientRegister, PATIENT_REGISTER_COLUMNS, PATIENT_REGISTER_TABLE};
