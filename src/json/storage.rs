//! JSON Column Storage Primitive
//!
//! The plain JSON column a record column is layered over: it serializes a
//! JSON value to the stored text and parses stored text back. It knows
//! nothing about records.

use super::codec::{JsonDecoder, JsonEncoder, default_decoder, default_encoder};
use crate::core::{ColumnError, INVALID_COLUMN_INPUT, Result};
use serde_json::Value as JsonValue;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct JsonField {
    encoder: Arc<dyn JsonEncoder>,
    decoder: Arc<dyn JsonDecoder>,
}

impl JsonField {
    pub fn new() -> Self {
        Self {
            encoder: default_encoder(),
            decoder: default_decoder(),
        }
    }

    pub fn with_encoder(mut self, encoder: Arc<dyn JsonEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn with_decoder(mut self, decoder: Arc<dyn JsonDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn encoder(&self) -> &Arc<dyn JsonEncoder> {
        &self.encoder
    }

    pub fn decoder(&self) -> &Arc<dyn JsonDecoder> {
        &self.decoder
    }

    /// Serializes a value for storage.
    pub fn get_prep_value(&self, value: &JsonValue) -> Result<String> {
        self.encoder.encode(value, false)
    }

    /// Parses stored text. SQL NULL (`None`) stays `None`; JSON `null` is `Some(Null)`.
    pub fn from_db_value(&self, stored: Option<&str>) -> Result<Option<JsonValue>> {
        let Some(text) = stored else {
            return Ok(None);
        };
        self.parse(text).map(Some)
    }

    /// Parses text assigned to the column.
    pub fn parse(&self, text: &str) -> Result<JsonValue> {
        self.decoder
            .decode(text)
            .map_err(|_| ColumnError::invalid_json(INVALID_COLUMN_INPUT, text))
    }
}

impl Default for JsonField {
    fn default() -> Self {
        Self::new()
    }
}
