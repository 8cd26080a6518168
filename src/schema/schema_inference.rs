//! Schema Inference
//!
//! Derives a draft-07 JSON Schema document from a record type's field
//! descriptors. Generation never fails: a field whose type hint cannot be
//! mapped gets an empty `{}` constraint.

use super::error::{SchemaError, SchemaResult};
use super::type_hint::TypeHint;
use crate::core::{FieldDescriptor, JsonMap, Record};
use serde_json::{Value as JsonValue, json};
use std::collections::HashSet;
use tracing::debug;

pub const JSON_SCHEMA_DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// Schema fragment for one type hint, `{}` when the hint cannot be mapped.
pub fn field_fragment(type_hint: &str) -> JsonValue {
    match TypeHint::parse(type_hint).and_then(|hint| hint.to_fragment()) {
        Ok(fragment) => fragment,
        Err(err) => {
            debug!(type_hint, error = %err, "type hint has no schema mapping");
            JsonValue::Object(JsonMap::new())
        }
    }
}

pub fn generate_schema(fields: &[FieldDescriptor]) -> JsonValue {
    let mut properties = JsonMap::new();
    let mut required = Vec::new();

    for field in fields {
        let mut fragment = field_fragment(&field.type_hint);
        if let (Some(default), JsonValue::Object(constraint)) = (&field.default, &mut fragment) {
            constraint.insert("default".to_string(), default.clone());
        }
        properties.insert(field.name.clone(), fragment);

        if field.is_required() {
            required.push(JsonValue::String(field.name.clone()));
        }
    }

    json!({
        "$schema": JSON_SCHEMA_DRAFT_07,
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

pub fn generate_schema_for<R: Record>() -> JsonValue {
    generate_schema(&R::fields())
}

/// Like [`generate_schema_for`], but rejects a misconfigured descriptor table.
pub fn try_generate_schema<R: Record>() -> SchemaResult<JsonValue> {
    let fields = R::fields();
    validate_descriptors(&fields)?;
    Ok(generate_schema(&fields))
}

pub fn validate_descriptors(fields: &[FieldDescriptor]) -> SchemaResult<()> {
    let mut seen = HashSet::new();
    for field in fields {
        if field.name.is_empty() {
            return Err(SchemaError::EmptyFieldName);
        }
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField(field.name.clone()));
        }
    }
    Ok(())
}
