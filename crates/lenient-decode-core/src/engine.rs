//! Coercion engine — converts a raw value into a target type when the
//! source's literal type does not already match.
//!
//! Dispatch is raw-kind first, then target type, in a fixed priority order;
//! the first success wins. Every path is gated by [`CoercionConfig`], and a
//! gate that is disabled (or a raw/target pairing with no conversion) yields
//! [`CoercionResult::Unsupported`] — a normal, expected outcome, never an
//! error.
//!
//! | Raw    | Target            | Conversion                                        |
//! |--------|-------------------|---------------------------------------------------|
//! | string | string            | identity (still counted as coerced — see decoder) |
//! | string | int/double/float/decimal | numeric literal parse                      |
//! | string | bool              | literal sets, then nonzero number                 |
//! | string | date              | ISO-8601 → custom formats → numeric timestamp     |
//! | string | url               | URL parse; `""` may signal absence                |
//! | int/float | numeric types  | direct cast; float→Float only if it stays finite  |
//! | int/float | string         | stringify                                         |
//! | int/float | bool           | nonzero                                           |
//! | int/float | date           | Unix seconds; floats ≥ 1×10¹² as milliseconds     |
//! | bool   | string            | `"true"` / `"false"`                              |
//! | bool   | numeric types     | 1 / 0                                             |

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use url::Url;

use crate::config::CoercionConfig;
use crate::raw::{RawDecoded, RawKind};
use crate::supported::{FieldValue, SupportedType};

/// Magnitude at and above which a float timestamp reads as Unix
/// milliseconds rather than seconds (13-digit values).
pub const MILLIS_MAGNITUDE_THRESHOLD: f64 = 1e12;

/// Result of one coercion attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercionResult {
    /// A value of the target type was produced; `from` identifies the raw
    /// kind for the reported outcome.
    Coerced { value: FieldValue, from: RawKind },
    /// The value is designed-as-absent (empty string where a URL was
    /// expected, with the absent-URL policy enabled). Distinct from
    /// `Unsupported`: no failure is reported for this path.
    Absent,
    /// No coercion path applies — wrong raw kind for the target, or the
    /// relevant gate is disabled.
    Unsupported,
}

/// Attempt to coerce a raw value into the target type.
pub fn coerce(raw: &RawDecoded, target: SupportedType, config: &CoercionConfig) -> CoercionResult {
    match raw {
        // Null never coerces; the field decoder handles it before reaching
        // the engine.
        RawDecoded::Null => CoercionResult::Unsupported,
        RawDecoded::Str(s) => coerce_string(s, target, config),
        RawDecoded::Int(i) => coerce_int(*i, target, config),
        RawDecoded::Float(d) => coerce_float(*d, target, config),
        RawDecoded::Bool(b) => coerce_bool(*b, target, config),
    }
}

fn coerced(value: FieldValue, from: RawKind) -> CoercionResult {
    CoercionResult::Coerced { value, from }
}

// ---------------------------------------------------------------------------
// String → target
// ---------------------------------------------------------------------------

fn coerce_string(raw: &str, target: SupportedType, config: &CoercionConfig) -> CoercionResult {
    let s = if config.trim_strings { raw.trim() } else { raw };

    match target {
        // Identity: the value is already a string, but reaching the engine
        // means the container's typed decode failed upstream, so this is
        // still a coercion.
        SupportedType::String => coerced(FieldValue::Str(s.to_string()), RawKind::String),
        SupportedType::Int => {
            if !config.allow_string_to_number {
                return CoercionResult::Unsupported;
            }
            match s.parse::<i64>() {
                Ok(i) => coerced(FieldValue::Int(i), RawKind::String),
                Err(_) => CoercionResult::Unsupported,
            }
        }
        SupportedType::Double => {
            if !config.allow_string_to_number {
                return CoercionResult::Unsupported;
            }
            match s.parse::<f64>() {
                Ok(d) if d.is_finite() => coerced(FieldValue::Double(d), RawKind::String),
                _ => CoercionResult::Unsupported,
            }
        }
        SupportedType::Float => {
            if !config.allow_string_to_number {
                return CoercionResult::Unsupported;
            }
            match s.parse::<f32>() {
                Ok(f) if f.is_finite() => coerced(FieldValue::Float(f), RawKind::String),
                _ => CoercionResult::Unsupported,
            }
        }
        SupportedType::Decimal => {
            if !config.allow_string_to_number {
                return CoercionResult::Unsupported;
            }
            match parse_decimal(s) {
                Some(d) => coerced(FieldValue::Decimal(d), RawKind::String),
                None => CoercionResult::Unsupported,
            }
        }
        SupportedType::Bool => {
            if !config.allow_string_to_bool {
                return CoercionResult::Unsupported;
            }
            if let Some(b) = config.classify_bool_literal(s) {
                return coerced(FieldValue::Bool(b), RawKind::String);
            }
            // Not a known literal — a numeric string coerces via nonzero.
            match s.parse::<f64>() {
                Ok(n) if n.is_finite() => coerced(FieldValue::Bool(n != 0.0), RawKind::String),
                _ => CoercionResult::Unsupported,
            }
        }
        SupportedType::Date => match date_from_string(s, config) {
            Some(date) => coerced(FieldValue::Date(date), RawKind::String),
            None => CoercionResult::Unsupported,
        },
        SupportedType::Url => {
            if s.is_empty() && config.treat_empty_string_as_absent_url {
                return CoercionResult::Absent;
            }
            if !config.allow_url_from_string {
                return CoercionResult::Unsupported;
            }
            match Url::parse(s) {
                Ok(url) => coerced(FieldValue::Url(url), RawKind::String),
                Err(_) => CoercionResult::Unsupported,
            }
        }
    }
}

/// String → Date strategy chain: ISO-8601 first, then each custom format in
/// list order (first match wins), then the string as a stringified Unix
/// timestamp, which recurses into the numeric interpretation.
fn date_from_string(s: &str, config: &CoercionConfig) -> Option<DateTime<Utc>> {
    if config.date_iso8601 {
        if let Ok(date) = DateTime::parse_from_rfc3339(s) {
            return Some(date.with_timezone(&Utc));
        }
    }

    for format in &config.custom_date_formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
        // Date-only formats (e.g. "%Y-%m-%d") carry no time component.
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Some(naive.and_utc());
            }
        }
    }

    if config.date_numeric_strings {
        if let Ok(ts) = s.parse::<f64>() {
            return date_from_unix(ts, config);
        }
    }

    None
}

/// Numeric timestamp → Date, disambiguating seconds from milliseconds by
/// magnitude.
fn date_from_unix(ts: f64, config: &CoercionConfig) -> Option<DateTime<Utc>> {
    if !ts.is_finite() {
        return None;
    }
    if ts.abs() >= MILLIS_MAGNITUDE_THRESHOLD && config.date_unix_millis {
        return DateTime::from_timestamp_millis(ts as i64);
    }
    if config.date_unix_seconds {
        // Route through milliseconds to keep fractional seconds.
        return DateTime::from_timestamp_millis((ts * 1000.0) as i64);
    }
    None
}

/// Decimal literal parse, accepting scientific notation as a fallback.
fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}

// ---------------------------------------------------------------------------
// Int → target
// ---------------------------------------------------------------------------

fn coerce_int(i: i64, target: SupportedType, config: &CoercionConfig) -> CoercionResult {
    match target {
        // Same-family numerics: direct cast, always allowed.
        SupportedType::Int => coerced(FieldValue::Int(i), RawKind::Int),
        SupportedType::Double => coerced(FieldValue::Double(i as f64), RawKind::Int),
        SupportedType::Float => coerced(FieldValue::Float(i as f32), RawKind::Int),
        SupportedType::Decimal => coerced(FieldValue::Decimal(Decimal::from(i)), RawKind::Int),
        SupportedType::String => {
            if config.allow_number_to_string {
                coerced(FieldValue::Str(i.to_string()), RawKind::Int)
            } else {
                CoercionResult::Unsupported
            }
        }
        SupportedType::Bool => {
            if config.allow_number_to_bool {
                coerced(FieldValue::Bool(i != 0), RawKind::Int)
            } else {
                CoercionResult::Unsupported
            }
        }
        // Integers only ever read as Unix seconds.
        SupportedType::Date => {
            if config.date_unix_seconds {
                match DateTime::from_timestamp(i, 0) {
                    Some(date) => coerced(FieldValue::Date(date), RawKind::Int),
                    None => CoercionResult::Unsupported,
                }
            } else {
                CoercionResult::Unsupported
            }
        }
        SupportedType::Url => CoercionResult::Unsupported,
    }
}

// ---------------------------------------------------------------------------
// Float → target
// ---------------------------------------------------------------------------

fn coerce_float(d: f64, target: SupportedType, config: &CoercionConfig) -> CoercionResult {
    match target {
        // Same-family numerics: direct cast, always allowed.
        SupportedType::Double => coerced(FieldValue::Double(d), RawKind::Float),
        SupportedType::Float => {
            let f = d as f32;
            if f.is_finite() {
                coerced(FieldValue::Float(f), RawKind::Float)
            } else {
                CoercionResult::Unsupported
            }
        }
        SupportedType::Int => coerced(FieldValue::Int(d as i64), RawKind::Float),
        SupportedType::Decimal => match Decimal::from_f64(d) {
            Some(dec) => coerced(FieldValue::Decimal(dec), RawKind::Float),
            None => CoercionResult::Unsupported,
        },
        SupportedType::String => {
            if config.allow_number_to_string {
                coerced(FieldValue::Str(d.to_string()), RawKind::Float)
            } else {
                CoercionResult::Unsupported
            }
        }
        SupportedType::Bool => {
            if config.allow_number_to_bool && d.is_finite() {
                coerced(FieldValue::Bool(d != 0.0), RawKind::Float)
            } else {
                CoercionResult::Unsupported
            }
        }
        SupportedType::Date => match date_from_unix(d, config) {
            Some(date) => coerced(FieldValue::Date(date), RawKind::Float),
            None => CoercionResult::Unsupported,
        },
        SupportedType::Url => CoercionResult::Unsupported,
    }
}

// ---------------------------------------------------------------------------
// Bool → target
// ---------------------------------------------------------------------------

fn coerce_bool(b: bool, target: SupportedType, config: &CoercionConfig) -> CoercionResult {
    match target {
        // Identity, same as String → String: only reachable when the
        // container's typed decode failed upstream.
        SupportedType::Bool => coerced(FieldValue::Bool(b), RawKind::Bool),
        SupportedType::String => {
            if config.allow_bool_to_string {
                coerced(FieldValue::Str(b.to_string()), RawKind::Bool)
            } else {
                CoercionResult::Unsupported
            }
        }
        SupportedType::Int => {
            if config.allow_bool_to_number {
                coerced(FieldValue::Int(i64::from(b)), RawKind::Bool)
            } else {
                CoercionResult::Unsupported
            }
        }
        SupportedType::Double => {
            if config.allow_bool_to_number {
                coerced(FieldValue::Double(if b { 1.0 } else { 0.0 }), RawKind::Bool)
            } else {
                CoercionResult::Unsupported
            }
        }
        SupportedType::Float => {
            if config.allow_bool_to_number {
                coerced(FieldValue::Float(if b { 1.0 } else { 0.0 }), RawKind::Bool)
            } else {
                CoercionResult::Unsupported
            }
        }
        SupportedType::Decimal => {
            if config.allow_bool_to_number {
                let dec = if b { Decimal::ONE } else { Decimal::ZERO };
                coerced(FieldValue::Decimal(dec), RawKind::Bool)
            } else {
                CoercionResult::Unsupported
            }
        }
        SupportedType::Date | SupportedType::Url => CoercionResult::Unsupported,
    }
}
