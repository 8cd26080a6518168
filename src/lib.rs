// ============================================================================
// record_column Library
// ============================================================================

// Lets `#[derive(Record)]` expand to `::record_column::...` inside this crate too.
extern crate self as record_column;

pub mod column;
pub mod core;
pub mod forms;
pub mod json;
pub mod schema;

// Re-export main types for convenience
pub use crate::core::{
    ColumnError, DynRecord, FieldDescriptor, FieldValue, JsonMap, Record, RecordType, Result,
};
pub use column::{ColumnOptions, Deconstruction, RecordColumn};
pub use forms::{FormFieldOptions, FormValue, JsonWidget, RecordFormField};
pub use json::{JsonDecoder, JsonEncoder, JsonField, PrettyJson, StandardJson};
pub use schema::{SchemaError, generate_schema, generate_schema_for};

pub use record_column_derive::Record;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
