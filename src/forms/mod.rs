//! Form Field Adapter
//!
//! - `widget.rs` - JSON text-area widget carrying the schema attribute
//! - `value.rs` - Values flowing through the edit surface
//! - `options.rs` - Form field configuration
//! - `field.rs` - RecordFormField (parse, redisplay, render, change detection)

mod field;
mod options;
mod value;
mod widget;

pub use field::RecordFormField;
pub use options::FormFieldOptions;
pub use value::FormValue;
pub use widget::{JSON_WIDGET_TEMPLATE, JsonWidget};
