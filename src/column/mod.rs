//! Column Codec
//!
//! - `record_column.rs` - RecordColumn: record <-> storage conversion and validation
//! - `options.rs` - Column configuration
//! - `deconstruct.rs` - Reflection data for migration tooling

mod deconstruct;
mod options;
mod record_column;

pub use deconstruct::Deconstruction;
pub use options::ColumnOptions;
pub use record_column::{RECORD_COLUMN_PATH, RecordColumn};
