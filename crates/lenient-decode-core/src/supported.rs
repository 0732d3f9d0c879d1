//! The closed set of target types the decoder understands, and the typed
//! values it produces.
//!
//! `SupportedType` is deliberately a closed enum rather than runtime type
//! identity: every conversion path in the engine is an exhaustive match, so
//! adding a member forces every dispatch site to consider it.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Target types a field can be decoded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportedType {
    String,
    Int,
    Double,
    Float,
    Bool,
    Decimal,
    Date,
    Url,
}

impl SupportedType {
    /// Every member of the closed set, in declaration order.
    /// Used by totality tests over the default registry.
    pub const ALL: [SupportedType; 8] = [
        SupportedType::String,
        SupportedType::Int,
        SupportedType::Double,
        SupportedType::Float,
        SupportedType::Bool,
        SupportedType::Decimal,
        SupportedType::Date,
        SupportedType::Url,
    ];

    /// Stable name used in reported outcomes.
    pub fn name(&self) -> &'static str {
        match self {
            SupportedType::String => "string",
            SupportedType::Int => "int",
            SupportedType::Double => "double",
            SupportedType::Float => "float",
            SupportedType::Bool => "bool",
            SupportedType::Decimal => "decimal",
            SupportedType::Date => "date",
            SupportedType::Url => "url",
        }
    }
}

impl fmt::Display for SupportedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A successfully decoded (or defaulted) field value.
///
/// Exactly one variant per [`SupportedType`]. Encoding back to JSON is the
/// identity: no coercion happens on encode.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Double(f64),
    Float(f32),
    Bool(bool),
    Decimal(Decimal),
    Date(DateTime<Utc>),
    Url(Url),
}

impl FieldValue {
    /// The target type this value belongs to.
    pub fn supported_type(&self) -> SupportedType {
        match self {
            FieldValue::Str(_) => SupportedType::String,
            FieldValue::Int(_) => SupportedType::Int,
            FieldValue::Double(_) => SupportedType::Double,
            FieldValue::Float(_) => SupportedType::Float,
            FieldValue::Bool(_) => SupportedType::Bool,
            FieldValue::Decimal(_) => SupportedType::Decimal,
            FieldValue::Date(_) => SupportedType::Date,
            FieldValue::Url(_) => SupportedType::Url,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FieldValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_url(&self) -> Option<&Url> {
        match self {
            FieldValue::Url(u) => Some(u),
            _ => None,
        }
    }

    /// Encode this value as JSON — the identity direction.
    ///
    /// `Date` and `Url` encode as their canonical strings (RFC 3339 and the
    /// serialized URL) since JSON has no native representation for them.
    /// `Decimal` encodes as a JSON number when `f64` can carry it, falling
    /// back to its canonical string for precision that would not survive.
    /// Non-finite floats encode as null — JSON cannot represent them.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Str(s) => Value::String(s.clone()),
            FieldValue::Int(i) => Value::Number((*i).into()),
            FieldValue::Double(d) => serde_json::Number::from_f64(*d)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Float(f) => serde_json::Number::from_f64(f64::from(*f))
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Decimal(d) => d
                .to_f64()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(d.to_string())),
            FieldValue::Date(d) => Value::String(d.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            FieldValue::Url(u) => Value::String(u.as_str().to_string()),
        }
    }
}
