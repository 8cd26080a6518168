//! Record Column
//!
//! Stores a typed record in a JSON column. Outbound, a record becomes its
//! generic mapping and the JSON storage primitive serializes it; inbound,
//! stored text is parsed and hydrated back into the record type.

use super::deconstruct::Deconstruction;
use super::options::ColumnOptions;
use crate::core::record::json_kind;
use crate::core::{ColumnError, FieldValue, JsonMap, Record, Result};
use crate::forms::{FormFieldOptions, FormValue, RecordFormField};
use crate::json::JsonField;
use crate::schema::try_generate_schema;
use serde_json::Value as JsonValue;
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, warn};

pub const RECORD_COLUMN_PATH: &str = "record_column::RecordColumn";

pub struct RecordColumn<R: Record> {
    options: ColumnOptions,
    storage: JsonField,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> RecordColumn<R> {
    pub fn new() -> Self {
        Self::with_options(ColumnOptions::new())
    }

    pub fn with_options(options: ColumnOptions) -> Self {
        let storage = JsonField::new()
            .with_encoder(options.encoder.clone())
            .with_decoder(options.decoder.clone());
        Self {
            options,
            storage,
            _record: PhantomData,
        }
    }

    pub fn description(&self) -> &'static str {
        "Map Rust records to JSON model fields"
    }

    pub fn options(&self) -> &ColumnOptions {
        &self.options
    }

    pub fn storage(&self) -> &JsonField {
        &self.storage
    }

    /// Hydrates a generic JSON value into the record type.
    ///
    /// Declared defaults fill in absent keys before deserialization. Every
    /// failure is reported as a type mismatch naming the record.
    pub fn hydrate(&self, value: JsonValue) -> Result<R> {
        let mut mapping = match value {
            JsonValue::Object(mapping) => mapping,
            other => {
                let reason = format!("expected an object, found {}", json_kind(&other));
                return Err(self.type_mismatch(other, reason));
            }
        };

        // Only constructor fields are fed to deserialization.
        for field in R::fields().into_iter().filter(|field| field.init) {
            if let Some(default) = field.default {
                if !mapping.contains_key(&field.name) {
                    mapping.insert(field.name, default);
                }
            }
        }

        let value = JsonValue::Object(mapping);
        match R::deserialize(&value) {
            Ok(record) => Ok(record),
            Err(err) => Err(self.type_mismatch(value, err.to_string())),
        }
    }

    fn type_mismatch(&self, value: JsonValue, reason: String) -> ColumnError {
        debug!(record = R::record_name(), %reason, "value does not hydrate into record");
        ColumnError::type_mismatch(R::record_name(), value, reason)
    }

    /// Converts a record into its generic mapping.
    pub fn to_mapping(&self, record: &R) -> Result<JsonMap> {
        record.to_mapping()
    }

    /// Converts an assigned value into the record type.
    pub fn to_python(&self, value: FieldValue<R>) -> Result<Option<R>> {
        match value {
            FieldValue::Null => Ok(None),
            FieldValue::Record(record) => Ok(Some(record)),
            FieldValue::Text(text) => {
                let parsed = self.storage.parse(&text)?;
                self.hydrate(parsed).map(Some)
            }
            FieldValue::Json(json) => self.hydrate(json).map(Some),
        }
    }

    /// Checks the assigned value is null or already a record. No coercion is tried.
    pub fn validate(&self, value: &FieldValue<R>) -> Result<()> {
        match value {
            FieldValue::Null | FieldValue::Record(_) => Ok(()),
            FieldValue::Json(json) => Err(ColumnError::type_mismatch(
                R::record_name(),
                json.clone(),
                "assigned value is not a record instance",
            )),
            FieldValue::Text(text) => Err(ColumnError::type_mismatch(
                R::record_name(),
                JsonValue::String(text.clone()),
                "assigned value is not a record instance",
            )),
        }
    }

    /// `to_python` followed by `validate`.
    pub fn clean(&self, value: FieldValue<R>) -> Result<Option<R>> {
        let record = self.to_python(value)?;
        let checked = FieldValue::from(record);
        self.validate(&checked)?;
        Ok(checked.into_record())
    }

    /// Converts a submitted form value into the record type.
    pub fn clean_form_value(&self, value: &FormValue) -> Result<Option<R>> {
        let assigned = match value {
            FormValue::Empty => FieldValue::Null,
            FormValue::Raw(text) | FormValue::InvalidJson(text) => FieldValue::Text(text.clone()),
            other => match other.to_json()? {
                Some(json) => FieldValue::Json(json),
                None => FieldValue::Null,
            },
        };
        self.clean(assigned)
    }

    /// Converts a value for storage.
    ///
    /// Records are converted directly. Anything else must hydrate
    /// successfully, but the storage primitive receives the original value.
    pub fn get_prep_value(&self, value: &FieldValue<R>) -> Result<Option<String>> {
        let prepared = match value {
            FieldValue::Null => return Ok(None),
            FieldValue::Record(record) => JsonValue::Object(record.to_mapping()?),
            FieldValue::Json(json) => {
                self.hydrate(json.clone())?;
                json.clone()
            }
            FieldValue::Text(text) => {
                let parsed = self.storage.parse(text)?;
                self.hydrate(parsed.clone())?;
                parsed
            }
        };
        self.storage.get_prep_value(&prepared).map(Some)
    }

    /// Converts stored text into the record type. SQL NULL and JSON `null` give `None`.
    pub fn from_db_value(&self, stored: Option<&str>) -> Result<Option<R>> {
        match self.storage.from_db_value(stored)? {
            None | Some(JsonValue::Null) => Ok(None),
            Some(value) => self.hydrate(value).map(Some),
        }
    }

    /// Text used when dumping the column's value to fixtures.
    pub fn value_to_string(&self, value: &FieldValue<R>) -> Result<Option<String>> {
        self.get_prep_value(value)
    }

    /// Schema document for the edit widget; `{}` if the record type is misconfigured.
    pub fn schema(&self) -> JsonValue {
        match try_generate_schema::<R>() {
            Ok(schema) => schema,
            Err(err) => {
                warn!(record = R::record_name(), error = %err, "schema generation failed, widget gets an empty schema");
                JsonValue::Object(JsonMap::new())
            }
        }
    }

    pub fn formfield(&self) -> RecordFormField {
        self.formfield_with(|options| options)
    }

    /// Builds the edit field. `customize` runs over the column defaults; the
    /// generated schema is attached afterwards.
    pub fn formfield_with(
        &self,
        customize: impl FnOnce(FormFieldOptions) -> FormFieldOptions,
    ) -> RecordFormField {
        let defaults = FormFieldOptions::new()
            .required(!self.options.blank)
            .encoder(self.options.encoder.clone())
            .decoder(self.options.decoder.clone());
        let options = customize(defaults).schema(self.schema());
        RecordFormField::new(options)
    }

    /// Form value for an existing record, for use as a form's initial value.
    pub fn initial_form_value(&self, value: FieldValue<R>) -> FormValue {
        match value {
            FieldValue::Null => FormValue::Empty,
            FieldValue::Record(record) => FormValue::record(record),
            FieldValue::Json(json) => FormValue::Json(json),
            FieldValue::Text(text) => FormValue::Raw(text),
        }
    }

    /// Constructor arguments including the record type, for migration tooling.
    pub fn deconstruct(&self) -> Deconstruction {
        let mut kwargs = JsonMap::new();
        if self.options.null {
            kwargs.insert("null".to_string(), JsonValue::Bool(true));
        }
        if self.options.blank {
            kwargs.insert("blank".to_string(), JsonValue::Bool(true));
        }
        kwargs.insert(
            "record_type".to_string(),
            JsonValue::String(R::record_name().to_string()),
        );

        Deconstruction {
            name: self.options.name.clone(),
            path: RECORD_COLUMN_PATH,
            args: Vec::new(),
            kwargs,
            record_type: R::record_type(),
        }
    }

    /// Attributes whose change never requires altering the database column.
    pub fn non_db_attrs(&self) -> &'static [&'static str] {
        &["blank", "encoder", "decoder", "record_type"]
    }
}

impl<R: Record> Default for RecordColumn<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Clone for RecordColumn<R> {
    fn clone(&self) -> Self {
        Self {
            options: self.options.clone(),
            storage: self.storage.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> fmt::Debug for RecordColumn<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordColumn")
            .field("record", &R::record_name())
            .field("options", &self.options)
            .finish()
    }
}
