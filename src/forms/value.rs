use crate::core::{DynRecord, Record, Result};
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// A value travelling through the edit surface.
///
/// `JsonString` marks decoded JSON whose value is a string, so it is never
/// confused with `InvalidJson`, which holds undecodable text kept for redisplay.
#[derive(Debug, Clone)]
pub enum FormValue {
    Empty,
    Raw(String),
    Json(JsonValue),
    JsonString(String),
    InvalidJson(String),
    Record(Arc<dyn DynRecord>),
}

impl FormValue {
    pub fn raw(text: impl Into<String>) -> Self {
        FormValue::Raw(text.into())
    }

    pub fn record<R: Record>(record: R) -> Self {
        FormValue::Record(Arc::new(record))
    }

    /// Values that count as "nothing entered".
    pub fn is_empty_value(&self) -> bool {
        match self {
            FormValue::Empty => true,
            FormValue::Raw(text) => text.trim().is_empty(),
            FormValue::Json(JsonValue::Null) => true,
            FormValue::Json(JsonValue::Array(items)) => items.is_empty(),
            FormValue::Json(JsonValue::Object(map)) => map.is_empty(),
            _ => false,
        }
    }

    /// The JSON value this form value stands for; `None` when empty.
    ///
    /// Text variants stand for JSON strings and records for their mapping.
    pub fn to_json(&self) -> Result<Option<JsonValue>> {
        match self {
            FormValue::Empty => Ok(None),
            FormValue::Json(value) => Ok(Some(value.clone())),
            FormValue::Raw(text) | FormValue::JsonString(text) | FormValue::InvalidJson(text) => {
                Ok(Some(JsonValue::String(text.clone())))
            }
            FormValue::Record(record) => Ok(Some(JsonValue::Object(record.dyn_to_mapping()?))),
        }
    }
}

impl Default for FormValue {
    fn default() -> Self {
        FormValue::Empty
    }
}

impl PartialEq for FormValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FormValue::Empty, FormValue::Empty) => true,
            (FormValue::Raw(a), FormValue::Raw(b))
            | (FormValue::JsonString(a), FormValue::JsonString(b))
            | (FormValue::InvalidJson(a), FormValue::InvalidJson(b)) => a == b,
            (FormValue::Json(a), FormValue::Json(b)) => a == b,
            (FormValue::Record(a), FormValue::Record(b)) => {
                a.dyn_record_name() == b.dyn_record_name()
                    && matches!(
                        (a.dyn_to_mapping(), b.dyn_to_mapping()),
                        (Ok(left), Ok(right)) if left == right
                    )
            }
            _ => false,
        }
    }
}

impl From<JsonValue> for FormValue {
    fn from(value: JsonValue) -> Self {
        FormValue::Json(value)
    }
}

impl From<&str> for FormValue {
    fn from(text: &str) -> Self {
        FormValue::Raw(text.to_string())
    }
}

impl From<String> for FormValue {
    fn from(text: String) -> Self {
        FormValue::Raw(text)
    }
}

impl<T: Into<FormValue>> From<Option<T>> for FormValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FormValue::Empty)
    }
}
