//! Record Contracts
//!
//! A record type is a plain struct whose shape is described by an explicit
//! field-descriptor table. `#[derive(Record)]` builds the table from the
//! struct declaration; hand-written impls are supported as well.

use super::error::{ColumnError, Result};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value as JsonValue;
use std::fmt;
use tracing::debug;

/// Insertion-ordered JSON object used as the intermediate form of a record.
pub type JsonMap = serde_json::Map<String, JsonValue>;

/// Describes one declared field of a record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Name of the field in the JSON mapping.
    pub name: String,
    /// Declared type annotation, e.g. `String`, `Option<i64>` or `str | int`.
    pub type_hint: String,
    /// Literal default used when the mapping lacks this field.
    pub default: Option<JsonValue>,
    /// Whether the field is supplied at construction (hydration) time.
    pub init: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, type_hint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_hint: type_hint.into(),
            default: None,
            init: true,
        }
    }

    pub fn with_default(mut self, default: JsonValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Uses the serialized form of `default` as the field's default. A value
    /// that does not serialize leaves the field without one.
    pub fn with_serialized_default<T: Serialize>(self, default: &T) -> Self {
        match serde_json::to_value(default) {
            Ok(value) => self.with_default(value),
            Err(err) => {
                debug!(field = %self.name, error = %err, "field default does not serialize");
                self
            }
        }
    }

    pub fn without_init(mut self) -> Self {
        self.init = false;
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// A constructor field with no default must be present in every mapping.
    pub fn is_required(&self) -> bool {
        self.init && self.default.is_none()
    }
}

/// Core trait for values stored in a record column.
pub trait Record: Serialize + DeserializeOwned + fmt::Debug + Send + Sync + 'static {
    /// Name used in user-facing messages ("Value must be of type <name>").
    fn record_name() -> &'static str;

    /// Declared fields, in declaration order.
    fn fields() -> Vec<FieldDescriptor>;

    fn record_type() -> RecordType {
        RecordType {
            name: Self::record_name().to_string(),
            fields: Self::fields(),
        }
    }

    /// Converts the record into its generic mapping form.
    ///
    /// Nested records and collections become nested JSON values.
    fn to_mapping(&self) -> Result<JsonMap> {
        match serde_json::to_value(self)? {
            JsonValue::Object(mapping) => Ok(mapping),
            other => Err(ColumnError::Serialization(format!(
                "{} serialized to {} instead of an object",
                Self::record_name(),
                json_kind(&other)
            ))),
        }
    }
}

/// Snapshot of a record type's shape, used by reflection and migration tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordType {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl RecordType {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }
}

/// Object-safe view of a record instance whose concrete type is erased.
pub trait DynRecord: fmt::Debug + Send + Sync {
    fn dyn_record_name(&self) -> &'static str;
    fn dyn_to_mapping(&self) -> Result<JsonMap>;
}

impl<R: Record> DynRecord for R {
    fn dyn_record_name(&self) -> &'static str {
        R::record_name()
    }

    fn dyn_to_mapping(&self) -> Result<JsonMap> {
        self.to_mapping()
    }
}

pub(crate) fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
