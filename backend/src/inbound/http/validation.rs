//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    NotAnArray,
    InvalidEntry,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::NotAnArray => "not_an_array",
            ErrorCode::InvalidEntry => "invalid_entry",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

pub(crate) fn not_an_array_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be an array")).with_details(json!({
        "field": field,
        "code": ErrorCode::NotAnArray.as_str(),
    }))
}

pub(crate) fn invalid_entry_error(field: FieldName, index: usize, message: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "index": index,
        "code": ErrorCode::InvalidEntry.as_str(),
    }))
}
