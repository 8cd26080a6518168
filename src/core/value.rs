use serde_json::Value as JsonValue;

/// A value assigned to a record column.
///
/// Application code normally assigns `Record` values; `Json` and `Text` cover
/// mappings and serialized text coming from forms, fixtures or raw queries.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<R> {
    Null,
    Record(R),
    Json(JsonValue),
    Text(String),
}

impl<R> FieldValue<R> {
    pub fn json(value: JsonValue) -> Self {
        FieldValue::Json(value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_record(&self) -> Option<&R> {
        match self {
            FieldValue::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn into_record(self) -> Option<R> {
        match self {
            FieldValue::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl<R> Default for FieldValue<R> {
    fn default() -> Self {
        FieldValue::Null
    }
}

impl<R> From<Option<R>> for FieldValue<R> {
    fn from(value: Option<R>) -> Self {
        match value {
            Some(record) => FieldValue::Record(record),
            None => FieldValue::Null,
        }
    }
}
