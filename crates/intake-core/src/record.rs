//! Patient register domain model.
//!
//! Intake payloads are checked field by field, in declaration order, and the
//! first invalid field aborts validation (first-failure-wins). Downstream
//! tests and clients rely on exactly one reported property per attempt.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::macros::{date, format_description};
use time::Date;
use uuid::Uuid;

use crate::time::today_utc;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w{2,4}$").expect("valid email pattern"));

/// Earliest accepted date of birth.
const MIN_DATE_OF_BIRTH: Date = date!(1900 - 01 - 01);

/// A single invalid field, reported to the caller as structured data.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Invalid '{property}'")]
pub struct ValidationError {
    /// Name of the first field that failed validation.
    pub property: String,
    /// Message safe to show to end users.
    pub user_message: String,
    /// Message intended for developers/debugging.
    pub developer_message: String,
}

impl ValidationError {
    fn new(property: impl Into<String>, developer_message: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            user_message: "Invalid data".to_string(),
            developer_message: developer_message.into(),
        }
    }

    /// Structured form embedded in the 400 response envelope.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "property": self.property,
            "user_message": self.user_message,
            "developer_message": self.developer_message,
        })
    }
}

/// A validated patient register record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Date,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub emergency_contact: String,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medical_history: Vec<String>,
    #[serde(default)]
    pub current_medications: Vec<String>,
}

impl PatientRecord {
    /// Validate a raw intake payload into a typed record.
    ///
    /// Fields are checked in declaration order and the first failure wins.
    /// A missing `id` gets a generated one; a present `id` must be a UUID.
    pub fn from_json(raw: &Value) -> Result<Self, ValidationError> {
        let obj = raw
            .as_object()
            .ok_or_else(|| ValidationError::new("body", "request body must be a JSON object"))?;

        let id = parse_id(obj)?;
        let first_name = required_text(obj, "first_name", 1, 50)?;
        let last_name = required_text(obj, "last_name", 1, 50)?;
        let date_of_birth = parse_date_of_birth(obj)?;
        let email = parse_email(obj)?;
        let phone_number = required_text(obj, "phone_number", 10, 15)?;
        let address = required_text(obj, "address", 1, 100)?;
        let emergency_contact = required_text(obj, "emergency_contact", 1, 50)?;
        let allergies = string_list(obj, "allergies")?;
        let medical_history = string_list(obj, "medical_history")?;
        let current_medications = string_list(obj, "current_medications")?;

        Ok(Self {
            id,
            first_name,
            last_name,
            date_of_birth,
            email,
            phone_number,
            address,
            emergency_contact,
            allergies,
            medical_history,
            current_medications,
        })
    }

    /// Canonical JSON form, echoed back to callers and used as event payload.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).expect("record serializes to JSON")
    }
}

fn parse_id(obj: &Map<String, Value>) -> Result<Uuid, ValidationError> {
    match obj.get("id") {
        None | Some(Value::Null) => Ok(Uuid::new_v4()),
        Some(Value::String(s)) => Uuid::parse_str(s)
            .map_err(|e| ValidationError::new("id", format!("id must be a UUID: {e}"))),
        Some(_) => Err(ValidationError::new("id", "id must be a UUID string")),
    }
}

fn required_text(
    obj: &Map<String, Value>,
    key: &str,
    min: usize,
    max: usize,
) -> Result<String, ValidationError> {
    let value = obj
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ValidationError::new(key, format!("{key} is required")))?;
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValidationError::new(
            key,
            format!("{key} must be between {min} and {max} characters"),
        ));
    }
    Ok(value.to_string())
}

fn parse_date_of_birth(obj: &Map<String, Value>) -> Result<Date, ValidationError> {
    let raw = obj
        .get("date_of_birth")
        .and_then(Value::as_str)
        .ok_or_else(|| ValidationError::new("date_of_birth", "date_of_birth is required"))?;

    let format = format_description!("[year]-[month]-[day]");
    let parsed = Date::parse(raw, &format).map_err(|e| {
        ValidationError::new(
            "date_of_birth",
            format!("date_of_birth must be a YYYY-MM-DD date: {e}"),
        )
    })?;

    let today = today_utc();
    if parsed < MIN_DATE_OF_BIRTH || parsed > today {
        return Err(ValidationError::new(
            "date_of_birth",
            format!("date_of_birth must be between {MIN_DATE_OF_BIRTH} and {today}"),
        ));
    }
    Ok(parsed)
}

fn parse_email(obj: &Map<String, Value>) -> Result<String, ValidationError> {
    let value = obj
        .get("email")
        .and_then(Value::as_str)
        .ok_or_else(|| ValidationError::new("email", "email is required"))?;
    if !EMAIL_PATTERN.is_match(value) {
        return Err(ValidationError::new(
            "email",
            "email must be a valid address",
        ));
    }
    Ok(value.to_string())
}

fn string_list(obj: &Map<String, Value>, key: &str) -> Result<Vec<String>, ValidationError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    ValidationError::new(key, format!("{key} must be a list of strings"))
                })
            })
            .collect(),
        Some(_) => Err(ValidationError::new(
            key,
            format!("{key} must be a list of strings"),
        )),
    }
}
