//! Uniform response envelope returned by every operation.
//!
//! The domain layer only ever produces two outcomes: a 200 success or a
//! 400 domain/business failure. Anything else is a transport concern.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result envelope `{code, message, is_success, data}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    pub is_success: bool,
    pub data: Value,
}

impl ApiResponse {
    /// Build a 200 success envelope.
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self {
            code: 200,
            message: message.into(),
            is_success: true,
            data,
        }
    }

    /// Build a 400 failure envelope.
    pub fn error(message: impl Into<String>, data: Value) -> Self {
        Self {
            code: 400,
            message: message.into(),
            is_success: false,
            data,
        }
    }
}
