//! Payload field extraction
//!
//! A resource's own fields come from its payload. A payload type can shape
//! them itself by implementing [`FieldMapper`]; any other `Serialize` type
//! goes through [`extract_fields`], which follows the type's serde metadata:
//!
//! - `#[serde(rename = "key")]` sets the output key, otherwise the field name
//! - `#[serde(skip)]` leaves the field out
//! - `#[serde(skip_serializing_if = "...")]` keeps the normal key and lets
//!   the serializer decide whether the value is empty
//!
//! The metadata is fixed by `#[derive(Serialize)]` at compile time, so the
//! same payload type always yields the same key set.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::HalError;

/// A flat HAL document map: payload fields plus the reserved keys
pub type Entry = Map<String, Value>;

/// Payloads that supply their own HAL field projection
///
/// The returned map is authoritative: keys can be renamed, dropped or
/// nested freely.
pub trait FieldMapper {
    fn field_map(&self) -> Entry;
}

impl FieldMapper for Entry {
    fn field_map(&self) -> Entry {
        self.clone()
    }
}

/// Source of a resource's payload fields
pub(crate) trait PayloadFields: Send + Sync {
    fn fields(&self) -> Result<Entry, HalError>;
}

/// Payload that maps its own fields
pub(crate) struct Mapped<P>(pub(crate) P);

impl<P: FieldMapper + Send + Sync> PayloadFields for Mapped<P> {
    fn fields(&self) -> Result<Entry, HalError> {
        Ok(self.0.field_map())
    }
}

/// Payload whose fields are read from its `Serialize` implementation
pub(crate) struct Extracted<P>(pub(crate) P);

impl<P: Serialize + Send + Sync> PayloadFields for Extracted<P> {
    fn fields(&self) -> Result<Entry, HalError> {
        extract_fields(&self.0)
    }
}

/// Build the field map of a payload from its serde representation
///
/// Unit values, `None` and field-less structs give an empty map. Payloads
/// that serialize to anything other than an object are rejected.
pub fn extract_fields<P: Serialize + ?Sized>(payload: &P) -> Result<Entry, HalError> {
    match serde_json::to_value(payload)? {
        Value::Object(fields) => Ok(fields),
        Value::Null => Ok(Entry::new()),
        other => Err(HalError::UnsupportedPayload(value_kind(&other))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
