//! Schema Inferencer
//!
//! - `type_hint.rs` - Recursive-descent parser for field type annotations
//! - `schema_inference.rs` - Schema document generation
//! - `error.rs` - Schema errors (always absorbed by callers)

mod error;
mod schema_inference;
mod type_hint;

pub use error::{SchemaError, SchemaResult};
pub use schema_inference::{
    JSON_SCHEMA_DRAFT_07, field_fragment, generate_schema, generate_schema_for, try_generate_schema,
    validate_descriptors,
};
pub use type_hint::{JsonType, TypeHint};
