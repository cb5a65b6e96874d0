//! Structured validation errors returned by document updates.
//!
//! Validation never fails an update outright; it produces a list of
//! per-field errors so the caller can surface all of them at once while
//! keeping the user's draft intact.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationKind {
    Required,
    Format,
    Range,
}

/// A single field-level validation failure.
///
/// `field` is a dotted path into the resume document (for example
/// `contact.email`), matching the path the editor uses to highlight the
/// offending input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ValidationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl ValidationError {
    pub fn required(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            kind: ValidationKind::Required,
            value: None,
        }
    }

    pub fn format(field: &str, message: &str, value: serde_json::Value) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            kind: ValidationKind::Format,
            value: Some(value),
        }
    }
}
