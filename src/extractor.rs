//! This module extracts typed fields out of the JSON tree of a machine description.
//!
//! Every field is mandatory: an absent member yields [`ValidationError::MissingField`],
//! a member of the wrong JSON type yields [`ValidationError::InvalidType`]. Both carry
//! the full path of the field, such as `transitions.scanright[1].read`.

use crate::document::Document;
use crate::types::ValidationError;
use serde_json::{Map, Value};

/// An object whose members can be looked up by key.
pub trait Fields {
    fn field(&self, key: &str) -> Option<&Value>;
}

impl Fields for Document {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl Fields for Map<String, Value> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// Returns the member `key` of `source`, failing with `MissingField(path)` when absent.
pub fn required<'a, F: Fields + ?Sized>(
    source: &'a F,
    key: &str,
    path: &str,
) -> Result<&'a Value, ValidationError> {
    source
        .field(key)
        .ok_or_else(|| ValidationError::MissingField(path.to_string()))
}

/// Extracts the string member `key`.
pub fn string_field<F: Fields + ?Sized>(
    source: &F,
    key: &str,
    path: &str,
) -> Result<String, ValidationError> {
    as_string(required(source, key, path)?, path)
}

/// Extracts the member `key` as a list of strings.
pub fn string_list_field<F: Fields + ?Sized>(
    source: &F,
    key: &str,
    path: &str,
) -> Result<Vec<String>, ValidationError> {
    as_string_list(required(source, key, path)?, path)
}

/// Extracts the member `key` as an array.
pub fn array_field<'a, F: Fields + ?Sized>(
    source: &'a F,
    key: &str,
    path: &str,
) -> Result<&'a [Value], ValidationError> {
    as_array(required(source, key, path)?, path)
}

/// Extracts the member `key` as an object.
pub fn object_field<'a, F: Fields + ?Sized>(
    source: &'a F,
    key: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ValidationError> {
    as_object(required(source, key, path)?, path)
}

/// Extracts the object member `key` of `document` with its own members kept in
/// document order, repeated keys included.
pub fn members_field<'a>(
    document: &'a Document,
    key: &str,
    path: &str,
) -> Result<&'a Document, ValidationError> {
    object_field(document, key, path)?;

    document
        .members(key)
        .ok_or_else(|| invalid_type(path, "an object"))
}

pub fn as_string(value: &Value, path: &str) -> Result<String, ValidationError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid_type(path, "a string"))
}

/// Coerces an array of strings; the first non-string element is reported by index.
pub fn as_string_list(value: &Value, path: &str) -> Result<Vec<String>, ValidationError> {
    as_array(value, path)?
        .iter()
        .enumerate()
        .map(|(i, item)| as_string(item, &format!("{path}[{i}]")))
        .collect()
}

pub fn as_array<'a>(value: &'a Value, path: &str) -> Result<&'a [Value], ValidationError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| invalid_type(path, "an array"))
}

pub fn as_object<'a>(
    value: &'a Value,
    path: &str,
) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| invalid_type(path, "an object"))
}

fn invalid_type(path: &str, expected: &'static str) -> ValidationError {
    ValidationError::InvalidType {
        field: path.to_string(),
        expected,
    }
}
