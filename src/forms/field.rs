//! Record Form Field
//!
//! Text-oriented edit surface for a record column. It converts between the
//! widget's text and JSON values, decides whether an edit changed anything,
//! and reports bad input as a field error instead of failing.

use super::options::FormFieldOptions;
use super::value::FormValue;
use super::widget::JsonWidget;
use crate::core::{ColumnError, INVALID_FORM_INPUT, Result};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone)]
pub struct RecordFormField {
    options: FormFieldOptions,
    widget: JsonWidget,
}

impl RecordFormField {
    pub fn new(options: FormFieldOptions) -> Self {
        let mut attrs = options.widget_attrs.clone();
        let schema = options
            .schema
            .as_ref()
            .map(JsonValue::to_string)
            .unwrap_or_else(|| JsonValue::Null.to_string());
        attrs.insert("schema".to_string(), schema);

        Self {
            widget: JsonWidget::new(Some(attrs)),
            options,
        }
    }

    pub fn widget(&self) -> &JsonWidget {
        &self.widget
    }

    pub fn options(&self) -> &FormFieldOptions {
        &self.options
    }

    pub fn required(&self) -> bool {
        self.options.required
    }

    pub fn disabled(&self) -> bool {
        self.options.disabled
    }

    pub fn initial(&self) -> &FormValue {
        &self.options.initial
    }

    pub fn label(&self) -> Option<&str> {
        self.options.label.as_deref()
    }

    pub fn help_text(&self) -> Option<&str> {
        self.options.help_text.as_deref()
    }

    pub fn schema(&self) -> Option<&JsonValue> {
        self.options.schema.as_ref()
    }

    /// Normalizes submitted input into a JSON form value.
    pub fn to_python(&self, value: &FormValue) -> Result<FormValue> {
        if self.options.disabled {
            return Ok(value.clone());
        }
        if value.is_empty_value() {
            return Ok(FormValue::Empty);
        }

        match value {
            FormValue::Raw(text) | FormValue::InvalidJson(text) => self.decode_input(text),
            other => Ok(other.clone()),
        }
    }

    fn decode_input(&self, text: &str) -> Result<FormValue> {
        match self.options.decoder.decode(text) {
            Ok(JsonValue::String(decoded)) => Ok(FormValue::JsonString(decoded)),
            Ok(decoded) => Ok(FormValue::Json(decoded)),
            Err(_) => Err(ColumnError::invalid_json(INVALID_FORM_INPUT, text)),
        }
    }

    /// The value to show again after a submission; undecodable text is kept verbatim.
    pub fn bound_data(&self, data: &FormValue, initial: &FormValue) -> FormValue {
        if self.options.disabled {
            return initial.clone();
        }

        match data {
            FormValue::Empty => FormValue::Empty,
            FormValue::Raw(text) | FormValue::InvalidJson(text) => {
                match self.options.decoder.decode(text) {
                    Ok(decoded) => FormValue::Json(decoded),
                    Err(_) => FormValue::InvalidJson(text.clone()),
                }
            }
            other => other.clone(),
        }
    }

    /// Renders a value as widget text.
    pub fn prepare_value(&self, value: &FormValue) -> Result<String> {
        if let FormValue::InvalidJson(text) = value {
            return Ok(text.clone());
        }
        let json = value.to_json()?.unwrap_or(JsonValue::Null);
        self.options.encoder.encode(&json, false)
    }

    /// Semantic change detection: key order never counts as a change,
    /// and `true` never equals `1`.
    pub fn has_changed(&self, initial: &FormValue, data: &FormValue) -> bool {
        if self.generic_has_changed(initial, data) {
            return true;
        }

        let initial = match initial.to_json() {
            Ok(value) => value.unwrap_or(JsonValue::Null),
            Err(_) => return true,
        };
        let data = match self.to_python(data).and_then(|value| value.to_json()) {
            Ok(value) => value.unwrap_or(JsonValue::Null),
            Err(_) => return true,
        };

        let encoder = &self.options.encoder;
        match (encoder.encode(&initial, true), encoder.encode(&data, true)) {
            (Ok(left), Ok(right)) => left != right,
            _ => true,
        }
    }

    fn generic_has_changed(&self, initial: &FormValue, data: &FormValue) -> bool {
        if self.options.disabled {
            return false;
        }

        let data = match self.to_python(data).and_then(|value| value.to_json()) {
            Ok(value) => value,
            Err(_) => return true,
        };
        let initial = match initial.to_json() {
            Ok(value) => value,
            Err(_) => return true,
        };

        normalize_blank(initial) != normalize_blank(data)
    }

    /// `to_python` followed by the required check.
    pub fn clean(&self, value: &FormValue) -> Result<FormValue> {
        let value = self.to_python(value)?;
        if self.options.required && value.is_empty_value() {
            return Err(ColumnError::Required);
        }
        Ok(value)
    }
}

/// JSON `null` and "no value" both compare as the empty string.
fn normalize_blank(value: Option<JsonValue>) -> JsonValue {
    match value {
        None | Some(JsonValue::Null) => JsonValue::String(String::new()),
        Some(value) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::PrettyJson;
    use serde_json::json;
    use std::sync::Arc;

    fn field() -> RecordFormField {
        RecordFormField::new(FormFieldOptions::new())
    }

    #[test]
    fn empty_inputs_become_empty() {
        let field = field();
        for input in [FormValue::Empty, FormValue::raw(""), FormValue::raw("   ")] {
            assert_eq!(field.to_python(&input).unwrap(), FormValue::Empty);
        }
    }

    #[test]
    fn invalid_json_is_a_field_error() {
        let err = field().to_python(&FormValue::raw("{not json")).unwrap_err();
        assert_eq!(err, ColumnError::invalid_json(INVALID_FORM_INPUT, "{not json"));
        assert_eq!(err.offending_value(), Some(json!("{not json")));
    }

    #[test]
    fn decoded_strings_are_tagged() {
        let field = field();
        assert_eq!(
            field.to_python(&FormValue::raw(r#""hello""#)).unwrap(),
            FormValue::JsonString("hello".into())
        );
        assert_eq!(
            field.to_python(&FormValue::raw(r#"{"a": 1}"#)).unwrap(),
            FormValue::Json(json!({"a": 1}))
        );
    }

    #[test]
    fn native_values_pass_through() {
        let field = field();
        let value = FormValue::Json(json!({"a": [1, 2]}));
        assert_eq!(field.to_python(&value).unwrap(), value);
        let tagged = FormValue::JsonString("x".into());
        assert_eq!(field.to_python(&tagged).unwrap(), tagged);
    }

    #[test]
    fn disabled_field_returns_input_unchanged() {
        let field = RecordFormField::new(FormFieldOptions::new().disabled(true));
        let raw = FormValue::raw("{not json");
        assert_eq!(field.to_python(&raw).unwrap(), raw);
        assert_eq!(
            field.bound_data(&raw, &FormValue::Json(json!({"a": 1}))),
            FormValue::Json(json!({"a": 1}))
        );
        assert!(!field.has_changed(&FormValue::Json(json!(1)), &FormValue::Json(json!(1))));
    }

    #[test]
    fn bound_data_keeps_invalid_text_for_redisplay() {
        let field = field();
        assert_eq!(field.bound_data(&FormValue::Empty, &FormValue::Empty), FormValue::Empty);
        assert_eq!(
            field.bound_data(&FormValue::raw("[1]"), &FormValue::Empty),
            FormValue::Json(json!([1]))
        );
        let bound = field.bound_data(&FormValue::raw("{oops"), &FormValue::Empty);
        assert_eq!(bound, FormValue::InvalidJson("{oops".into()));
        assert_eq!(field.prepare_value(&bound).unwrap(), "{oops");
    }

    #[test]
    fn prepare_value_serializes_for_display() {
        let field = field();
        assert_eq!(field.prepare_value(&FormValue::Empty).unwrap(), "null");
        assert_eq!(
            field.prepare_value(&FormValue::Json(json!({"name": "Müller"}))).unwrap(),
            r#"{"name":"Müller"}"#
        );
        assert_eq!(field.prepare_value(&FormValue::JsonString("x".into())).unwrap(), r#""x""#);
    }

    #[test]
    fn prepare_value_uses_configured_encoder() {
        let field = RecordFormField::new(FormFieldOptions::new().encoder(Arc::new(PrettyJson)));
        assert_eq!(
            field.prepare_value(&FormValue::Json(json!({"a": 1}))).unwrap(),
            "{\n  \"a\": 1\n}"
        );
    }

    #[test]
    fn key_order_is_not_a_change() {
        let field = field();
        assert!(!field.has_changed(
            &FormValue::Json(json!({"a": 1, "b": 2})),
            &FormValue::raw(r#"{"b":2,"a":1}"#)
        ));
    }

    #[test]
    fn bool_and_number_differ() {
        let field = field();
        assert!(field.has_changed(&FormValue::Json(json!(true)), &FormValue::raw("1")));
        assert!(!field.has_changed(&FormValue::Json(json!(true)), &FormValue::raw("true")));
    }

    #[test]
    fn empty_initial_and_empty_data_are_unchanged() {
        let field = field();
        assert!(!field.has_changed(&FormValue::Empty, &FormValue::raw("")));
        assert!(field.has_changed(&FormValue::Empty, &FormValue::raw("{\"a\": 1}")));
    }

    #[test]
    fn json_null_counts_as_no_value() {
        let field = field();
        assert!(!field.has_changed(&FormValue::Json(json!(null)), &FormValue::raw("")));
        assert!(!field.has_changed(&FormValue::Empty, &FormValue::raw("null")));
        assert!(!field.has_changed(&FormValue::Json(json!(null)), &FormValue::raw("null")));
        assert!(field.has_changed(&FormValue::Json(json!(null)), &FormValue::raw("0")));
    }

    #[test]
    fn invalid_data_counts_as_changed() {
        assert!(field().has_changed(&FormValue::Json(json!({})), &FormValue::raw("{nope")));
    }

    #[test]
    fn clean_enforces_required() {
        let required = field();
        assert_eq!(required.clean(&FormValue::raw(" ")).unwrap_err(), ColumnError::Required);

        let optional = RecordFormField::new(FormFieldOptions::new().required(false));
        assert_eq!(optional.clean(&FormValue::raw("")).unwrap(), FormValue::Empty);
    }

    #[test]
    fn schema_is_carried_by_the_widget() {
        let schema = json!({"type": "object"});
        let field = RecordFormField::new(FormFieldOptions::new().schema(schema.clone()));
        assert_eq!(field.widget().schema(), Some(schema));
        assert_eq!(field.widget().attr("cols"), Some("40"));

        assert_eq!(RecordFormField::new(FormFieldOptions::new()).widget().attr("schema"), Some("null"));
    }
}
