use serde_json::Value;

use crate::foundation::error::{VttError, VttResult};
use crate::schema::canonical::CanonicalDocument;
use crate::schema::legacy::LegacyDocument;

/// Structural classification of a parsed document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    Legacy,
    Canonical,
    Unrecognized,
}

/// A document that passed classification, in its typed source form.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceDocument {
    Legacy(LegacyDocument),
    Canonical(CanonicalDocument),
}

/// Parse raw file bytes as UTF-8 JSON.
pub fn parse_document(bytes: &[u8]) -> VttResult<Value> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Classify a document. Legacy is checked first; the schemas share no required keys.
pub fn detect(value: &Value) -> SchemaKind {
    if is_legacy(value) {
        SchemaKind::Legacy
    } else if is_canonical(value) {
        SchemaKind::Canonical
    } else {
        SchemaKind::Unrecognized
    }
}

fn is_legacy(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    let numeric = |key: &str| obj.get(key).is_some_and(Value::is_number);
    if !numeric("grid") || !numeric("gridDistance") {
        return false;
    }
    let Some(walls) = obj.get("walls").and_then(Value::as_array) else {
        return false;
    };
    walls.iter().all(|wall| {
        wall.get("c")
            .and_then(Value::as_array)
            .is_some_and(|c| c.len() == 4 && c.iter().all(Value::is_number))
    })
}

fn is_canonical(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    obj.get("format").is_some_and(Value::is_number)
        && obj.get("resolution").is_some_and(Value::is_object)
        && (obj.get("line_of_sight").is_some_and(Value::is_array)
            || obj.get("objects_line_of_sight").is_some_and(Value::is_array))
}

/// Return `true` when the document carries a non-empty `image` string.
pub fn has_map_image(value: &Value) -> bool {
    value
        .get("image")
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty())
}

/// Remove the `image` field in place. Returns `true` if one was present.
pub fn strip_image(value: &mut Value) -> bool {
    value
        .as_object_mut()
        .and_then(|obj| obj.remove("image"))
        .is_some()
}

impl SourceDocument {
    /// Classify `value` and deserialize it into the matching typed record.
    pub fn from_value(value: Value) -> VttResult<Self> {
        match detect(&value) {
            SchemaKind::Legacy => serde_json::from_value(value)
                .map(Self::Legacy)
                .map_err(|e| VttError::unsupported_format(format!("malformed wall export: {e}"))),
            SchemaKind::Canonical => serde_json::from_value(value)
                .map(Self::Canonical)
                .map_err(|e| VttError::unsupported_format(format!("malformed uvtt document: {e}"))),
            SchemaKind::Unrecognized => Err(VttError::unsupported_format(
                "expected a UVTT, DD2VTT, or FoundryVTT JSON document",
            )),
        }
    }

    pub fn kind(&self) -> SchemaKind {
        match self {
            Self::Legacy(_) => SchemaKind::Legacy,
            Self::Canonical(_) => SchemaKind::Canonical,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/detect.rs"]
mod tests;
