//! The Logic JSON interchange format.

use crate::ast::Document;
use crate::errors::Result;
use serde_json::Value;

/// Parses a Logic JSON document.
pub fn from_str(s: &str) -> Result<Document> {
    Ok(serde_json::from_str(s)?)
}

/// Converts a document to its JSON value.
pub fn to_value(doc: &Document) -> Result<Value> {
    Ok(serde_json::to_value(doc)?)
}

/// Serializes a document to canonical JSON: sorted keys, two-space
/// indentation, no trailing newline.
pub fn to_string(doc: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_value(doc)?)?)
}

/// The shape of a document with every node identifier removed,
/// used to compare trees regardless of their identifiers.
pub fn structure(doc: &Document) -> Result<Value> {
    let mut value = to_value(doc)?;
    strip_ids(&mut value);
    Ok(value)
}

fn strip_ids(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.remove("id");
            map.values_mut().for_each(strip_ids);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_ids),
        _ => {}
    }
}

/// Numbers with no fractional part are written as integers.
pub mod number {
    use serde::{Deserialize, Deserializer, Serializer};

    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
            serializer.serialize_i64(*value as i64)
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        f64::deserialize(deserializer)
    }
}
