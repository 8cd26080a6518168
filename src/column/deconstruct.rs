use crate::core::{JsonMap, RecordType};
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Constructor arguments of a record column, for migration tooling.
///
/// `record_type` carries the full field table, so a change in the record's
/// shape shows up as a change in the deconstruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deconstruction {
    pub name: Option<String>,
    pub path: &'static str,
    pub args: Vec<JsonValue>,
    pub kwargs: JsonMap,
    pub record_type: RecordType,
}
