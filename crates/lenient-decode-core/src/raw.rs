//! Raw decoded values — what a loosely-typed source hands back for one field.
//!
//! Exactly one variant is populated per decode attempt. Callers never declare
//! the variant; the field decoder infers it by trying the container's typed
//! reads in a fixed order.

use serde_json::Value;

/// The source-side kind of a raw value, used in reported outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawKind {
    Null,
    String,
    Int,
    Float,
    Bool,
}

impl RawKind {
    pub fn name(&self) -> &'static str {
        match self {
            RawKind::Null => "null",
            RawKind::String => "string",
            RawKind::Int => "int",
            RawKind::Float => "float",
            RawKind::Bool => "bool",
        }
    }
}

/// A single raw field value from a loosely-typed source.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDecoded {
    Null,
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl RawDecoded {
    /// Classify a JSON value as raw field material.
    ///
    /// Arrays and objects are container-shaped, not field-shaped — they
    /// return `None` and are left to the host decode framework.
    pub fn from_json(value: &Value) -> Option<RawDecoded> {
        match value {
            Value::Null => Some(RawDecoded::Null),
            Value::String(s) => Some(RawDecoded::Str(s.clone())),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(RawDecoded::Int(i))
                } else {
                    n.as_f64().map(RawDecoded::Float)
                }
            }
            Value::Bool(b) => Some(RawDecoded::Bool(*b)),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn kind(&self) -> RawKind {
        match self {
            RawDecoded::Null => RawKind::Null,
            RawDecoded::Str(_) => RawKind::String,
            RawDecoded::Int(_) => RawKind::Int,
            RawDecoded::Float(_) => RawKind::Float,
            RawDecoded::Bool(_) => RawKind::Bool,
        }
    }

    /// Textual rendering of the raw value for diagnostic samples.
    pub fn sample_text(&self) -> String {
        match self {
            RawDecoded::Null => "null".to_string(),
            RawDecoded::Str(s) => s.clone(),
            RawDecoded::Int(i) => i.to_string(),
            RawDecoded::Float(d) => d.to_string(),
            RawDecoded::Bool(b) => b.to_string(),
        }
    }
}
