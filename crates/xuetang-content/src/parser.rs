//! YAML text to validated records.
//!
//! Parsing happens in two steps: the text is read into an untyped YAML tree
//! (syntax failures become [`Error::Yaml`]), then the tree is validated
//! against the record's [`Schema`] (failures become [`Error::Validation`]
//! carrying every violation).

use serde::Serialize;
use serde_yaml::Value;
use xuetang_core::{Error, Result};

use crate::schema::{Schema, SchemaContext};

/// Parse and validate a record using the local clock as the reference year.
pub fn parse<T: Schema>(text: &str) -> Result<T> {
    parse_with(text, SchemaContext::current())
}

/// Parse and validate a record with an explicit validation context.
pub fn parse_with<T: Schema>(text: &str, context: SchemaContext) -> Result<T> {
    let value: Value = serde_yaml::from_str(text).map_err(|e| Error::yaml(e.to_string()))?;
    parse_value(&value, context)
}

/// Validate an already-parsed YAML tree.
pub fn parse_value<T: Schema>(value: &Value, context: SchemaContext) -> Result<T> {
    Ok(T::validate_with(value, context)?)
}

/// Serialize a record back to YAML.
///
/// The output uses the same field names the parser accepts, so parsing it
/// again yields an equal record.
pub fn to_yaml<T: Serialize>(record: &T) -> Result<String> {
    serde_yaml::to_string(record).map_err(|e| Error::yaml(format!("serialization failed: {e}")))
}
