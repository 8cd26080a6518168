//! JSON Encoder/Decoder Seam
//!
//! Every parse and serialize call in the crate goes through these traits so
//! a column or form field can be configured with custom JSON handling.

use super::canonical::canonicalize;
use crate::core::Result;
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

/// Serializes JSON values to text.
pub trait JsonEncoder: fmt::Debug + Send + Sync {
    /// Encode `value`; with `sort_keys` set, object keys are emitted sorted at every depth.
    fn encode(&self, value: &JsonValue, sort_keys: bool) -> Result<String>;
}

/// Parses text into JSON values.
pub trait JsonDecoder: fmt::Debug + Send + Sync {
    fn decode(&self, text: &str) -> std::result::Result<JsonValue, serde_json::Error>;
}

/// Compact `serde_json` output. Non-ASCII characters are emitted as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardJson;

impl JsonEncoder for StandardJson {
    fn encode(&self, value: &JsonValue, sort_keys: bool) -> Result<String> {
        if sort_keys {
            Ok(serde_json::to_string(&canonicalize(value))?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl JsonDecoder for StandardJson {
    fn decode(&self, text: &str) -> std::result::Result<JsonValue, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Indented output, useful for edit widgets.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyJson;

impl JsonEncoder for PrettyJson {
    fn encode(&self, value: &JsonValue, sort_keys: bool) -> Result<String> {
        if sort_keys {
            Ok(serde_json::to_string_pretty(&canonicalize(value))?)
        } else {
            Ok(serde_json::to_string_pretty(value)?)
        }
    }
}

pub fn default_encoder() -> Arc<dyn JsonEncoder> {
    Arc::new(StandardJson)
}

pub fn default_decoder() -> Arc<dyn JsonDecoder> {
    Arc::new(StandardJson)
}
