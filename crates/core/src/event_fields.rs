//! Decoding of the per-event monitoring-module fields.
//!
//! Monitoring modules attach a JSON object to each event they report. It is
//! stored verbatim in `events.fields_data` and decoded on read.

use serde_json::{Map, Value};

use crate::error::CoreError;

const DECODE_ERROR: &str = "Cannot decode fields data.";

/// Decode stored fields data into a JSON object.
///
/// Missing, empty, malformed or non-object data yields
/// [`CoreError::FieldsNotValid`].
pub fn decode_details(fields_data: Option<&str>) -> Result<Map<String, Value>, CoreError> {
    let raw = fields_data.ok_or_else(|| CoreError::FieldsNotValid(DECODE_ERROR.into()))?;
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(CoreError::FieldsNotValid(DECODE_ERROR.into())),
    }
}

/// Look up a single field, falling back to `default` when the data cannot be
/// decoded or the field is absent.
pub fn get_field(fields_data: Option<&str>, name: &str, default: Value) -> Value {
    match decode_details(fields_data) {
        Ok(mut fields) => fields.remove(name).unwrap_or(default),
        Err(_) => default,
    }
}

/// Strict lookup: invalid data is an error and so is a missing field.
pub fn require_field(fields_data: Option<&str>, name: &str) -> Result<Value, CoreError> {
    let mut fields = decode_details(fields_data)?;
    fields
        .remove(name)
        .ok_or_else(|| CoreError::FieldNotFound(name.to_string()))
}
