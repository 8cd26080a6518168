//! Schema inference errors
//!
//! These never reach users: a bad field degrades to `{}` and a bad record
//! type degrades to an empty schema document.

use thiserror::Error;

pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Invalid type hint '{hint}': {reason}")]
    InvalidTypeHint { hint: String, reason: String },

    #[error("Unhandled type: {0}")]
    UnhandledType(String),

    #[error("Record field name must not be empty")]
    EmptyFieldName,

    #[error("Duplicate record field '{0}'")]
    DuplicateField(String),
}

impl SchemaError {
    pub(crate) fn invalid_hint(hint: &str, reason: impl Into<String>) -> Self {
        SchemaError::InvalidTypeHint {
            hint: hint.to_string(),
            reason: reason.into(),
        }
    }
}
