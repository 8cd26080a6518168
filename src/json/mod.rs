//! JSON Primitive Services
//!
//! Parsing and serialization are treated as primitives supplied by
//! `serde_json`; this module wraps them behind configurable seams.
//!
//! # Architecture
//!
//! - `codec.rs` - Encoder/decoder traits and the standard implementations
//! - `storage.rs` - JSON column storage primitive (JsonField)
//! - `canonical.rs` - Key-sorted canonical form used for change detection

mod canonical;
mod codec;
mod storage;

pub use canonical::canonicalize;
pub use codec::{JsonDecoder, JsonEncoder, PrettyJson, StandardJson, default_decoder, default_encoder};
pub use storage::JsonField;
