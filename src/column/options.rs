use crate::json::{JsonDecoder, JsonEncoder, default_decoder, default_encoder};
use std::sync::Arc;

/// Record column configuration
#[derive(Debug, Clone)]
pub struct ColumnOptions {
    /// Column name on the owning model
    pub name: Option<String>,

    /// Whether the database column accepts NULL
    pub null: bool,

    /// Whether forms may leave the field empty
    pub blank: bool,

    /// Encoder used when writing to storage
    pub encoder: Arc<dyn JsonEncoder>,

    /// Decoder used when reading from storage or parsing assigned text
    pub decoder: Arc<dyn JsonDecoder>,
}

impl ColumnOptions {
    pub fn new() -> Self {
        Self {
            name: None,
            null: false,
            blank: false,
            encoder: default_encoder(),
            decoder: default_decoder(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn null(mut self, null: bool) -> Self {
        self.null = null;
        self
    }

    pub fn blank(mut self, blank: bool) -> Self {
        self.blank = blank;
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
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self::new()
    }
}
