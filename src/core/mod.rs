pub mod error;
pub mod record;
pub mod value;

pub use error::{ColumnError, INVALID_COLUMN_INPUT, INVALID_FORM_INPUT, Result};
pub use record::{DynRecord, FieldDescriptor, JsonMap, Record, RecordType};
pub use value::FieldValue;
