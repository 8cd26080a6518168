use super::value::FormValue;
use crate::json::{JsonDecoder, JsonEncoder, default_decoder, default_encoder};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Form field configuration
#[derive(Debug, Clone)]
pub struct FormFieldOptions {
    /// Reject empty input on clean
    pub required: bool,

    /// Ignore submitted data and keep the initial value
    pub disabled: bool,

    /// Value shown before any submission
    pub initial: FormValue,

    pub label: Option<String>,

    pub help_text: Option<String>,

    /// Encoder used for display and change detection
    pub encoder: Arc<dyn JsonEncoder>,

    /// Decoder used for submitted text
    pub decoder: Arc<dyn JsonDecoder>,

    /// Schema document handed to the widget as a rendering hint
    pub schema: Option<JsonValue>,

    /// Extra widget attributes
    pub widget_attrs: BTreeMap<String, String>,
}

impl FormFieldOptions {
    pub fn new() -> Self {
        Self {
            required: true,
            disabled: false,
            initial: FormValue::Empty,
            label: None,
            help_text: None,
            encoder: default_encoder(),
            decoder: default_decoder(),
            schema: None,
            widget_attrs: BTreeMap::new(),
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn initial(mut self, initial: impl Into<FormValue>) -> Self {
        self.initial = initial.into();
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn help_text(mut self, help_text: &str) -> Self {
        self.help_text = Some(help_text.to_string());
        self
    }

    pub fn encoder(mut self, encoder: Arc<dyn JsonEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn decoder(mut self, decoder: Arc<dyn JsonDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn schema(mut self, schema: JsonValue) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn widget_attr(mut self, name: &str, value: &str) -> Self {
        self.widget_attrs.insert(name.to_string(), value.to_string());
        self
    }
}

impl Default for FormFieldOptions {
    fn default() -> Self {
        Self::new()
    }
}
