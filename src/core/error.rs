use serde_json::Value as JsonValue;
use thiserror::Error;

/// Message shown by the edit form when the submitted text is not JSON.
pub const INVALID_FORM_INPUT: &str = "Enter valid JSON representation of the record.";

/// Message used when text assigned to, or read from, a column is not JSON.
pub const INVALID_COLUMN_INPUT: &str = "Value must be valid JSON.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColumnError {
    /// The raw text is not syntactically valid JSON.
    #[error("{message}")]
    InvalidJson { message: String, value: String },

    /// The value is JSON, but it is not and cannot become the declared record.
    ///
    /// Missing fields and structural cast failures share this variant; the
    /// underlying cause is kept in `reason` and never displayed.
    #[error("Value must be of type {record}")]
    TypeMismatch {
        record: &'static str,
        value: JsonValue,
        reason: String,
    },

    #[error("This field is required.")]
    Required,

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, ColumnError>;

impl ColumnError {
    pub fn invalid_json(message: &str, value: impl Into<String>) -> Self {
        Self::InvalidJson {
            message: message.to_string(),
            value: value.into(),
        }
    }

    pub fn type_mismatch(record: &'static str, value: JsonValue, reason: impl Into<String>) -> Self {
        Self::TypeMismatch {
            record,
            value,
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code, mirroring form error codes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidJson { .. } | Self::TypeMismatch { .. } => "invalid",
            Self::Required => "required",
            Self::Serialization(_) => "serialization",
        }
    }

    /// The input that caused the error, for redisplay next to the message.
    pub fn offending_value(&self) -> Option<JsonValue> {
        match self {
            Self::InvalidJson { value, .. } => Some(JsonValue::String(value.clone())),
            Self::TypeMismatch { value, .. } => Some(value.clone()),
            Self::Required | Self::Serialization(_) => None,
        }
    }

    /// True for errors a user can fix by editing their input.
    pub fn is_validation_error(&self) -> bool {
        !matches!(self, Self::Serialization(_))
    }
}

impl From<serde_json::Error> for ColumnError {
    fn from(err: serde_json::Error) -> Self {
        ColumnError::Serialization(err.to_string())
    }
}
