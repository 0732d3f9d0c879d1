//! Field decoder — orchestrates exact decode, null handling, coercion, and
//! the terminal fallback, emitting at most one outcome per field.
//!
//! The decision tree is fixed: `TryExact → TryNull → TryCoerce → Resolve`.
//! The non-optional and optional variants share it and differ only in the
//! terminal: a registered default versus absence. Bad data never propagates
//! as an error — callers needing strict validation inspect the reported
//! outcomes instead.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use url::Url;

use crate::config::CoercionConfig;
use crate::defaults::DefaultRegistry;
use crate::engine::{self, CoercionResult};
use crate::error::DecodeError;
use crate::outcome::{truncate_sample, FallbackReason, FieldOutcome};
use crate::path::CodingPath;
use crate::raw::{RawDecoded, RawKind};
use crate::reporter::{self, OutcomeReporter};
use crate::supported::{FieldValue, SupportedType};

/// Per-field container supplied by the host decode framework.
///
/// The decoder calls these in a fixed order: a typed decode first, then a
/// null test, then the raw reads (string, int, float, bool) feeding the
/// coercion engine.
pub trait FieldContainer {
    /// Attempt a typed decode exploiting the source format's native typing
    /// (e.g. a JSON number that is already an integer).
    fn decode_exact(&self, target: SupportedType) -> Option<FieldValue>;

    /// Whether the raw value is literally null.
    fn is_null(&self) -> bool;

    /// Attempt to read the raw value as a string.
    fn as_string(&self) -> Option<String>;

    /// Attempt to read the raw value as an integer.
    fn as_int(&self) -> Option<i64>;

    /// Attempt to read the raw value as a float.
    fn as_float(&self) -> Option<f64>;

    /// Attempt to read the raw value as a boolean.
    fn as_bool(&self) -> Option<bool>;
}

/// Reference [`FieldContainer`] over a borrowed JSON value.
///
/// Exactness follows the source's native typing: numbers decode exactly to
/// the numeric targets, strings to `String`, and — since JSON has no date
/// or URL type — a string in the canonical encoded form (RFC 3339, a
/// parseable URL) decodes exactly to `Date`/`Url`. Anything else goes
/// through the coercion engine and is reported.
#[derive(Debug, Clone, Copy)]
pub struct JsonContainer<'a> {
    value: &'a Value,
}

impl<'a> JsonContainer<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }
}

impl FieldContainer for JsonContainer<'_> {
    fn decode_exact(&self, target: SupportedType) -> Option<FieldValue> {
        match target {
            SupportedType::String => self.value.as_str().map(|s| FieldValue::Str(s.to_string())),
            SupportedType::Int => self.value.as_i64().map(FieldValue::Int),
            SupportedType::Double => match self.value {
                Value::Number(n) => n.as_f64().map(FieldValue::Double),
                _ => None,
            },
            // A finite f64 past the f32 range casts to infinity; that is
            // not an exact decode, so it falls through to coercion.
            SupportedType::Float => match self.value {
                Value::Number(n) => n
                    .as_f64()
                    .map(|d| d as f32)
                    .filter(|f| f.is_finite())
                    .map(FieldValue::Float),
                _ => None,
            },
            SupportedType::Bool => self.value.as_bool().map(FieldValue::Bool),
            // Parse the literal text, not an f64 detour, so scale survives.
            SupportedType::Decimal => match self.value {
                Value::Number(n) => {
                    let text = n.to_string();
                    Decimal::from_str(&text)
                        .ok()
                        .or_else(|| Decimal::from_scientific(&text).ok())
                        .map(FieldValue::Decimal)
                }
                _ => None,
            },
            SupportedType::Date => self.value.as_str().and_then(|s| {
                DateTime::parse_from_rfc3339(s)
                    .ok()
                    .map(|d| FieldValue::Date(d.with_timezone(&Utc)))
            }),
            SupportedType::Url => self
                .value
                .as_str()
                .and_then(|s| Url::parse(s).ok().map(FieldValue::Url)),
        }
    }

    fn is_null(&self) -> bool {
        self.value.is_null()
    }

    fn as_string(&self) -> Option<String> {
        self.value.as_str().map(str::to_string)
    }

    fn as_int(&self) -> Option<i64> {
        self.value.as_i64()
    }

    fn as_float(&self) -> Option<f64> {
        self.value.as_f64()
    }

    fn as_bool(&self) -> Option<bool> {
        self.value.as_bool()
    }
}

/// How a field resolved internally, before the variant-specific terminal.
#[derive(Debug)]
enum Resolution {
    Exact(FieldValue),
    Null,
    Coerced {
        value: FieldValue,
        from: RawKind,
        raw_sample: String,
    },
    Absent,
    NoCoercion,
}

/// Decodes fields against one configuration snapshot.
///
/// The config is captured for the decoder's lifetime; mutate between decode
/// passes by building a new `Decoder`. Without an explicit reporter, events
/// go to the process-wide slot installed via [`crate::set_reporter`].
#[derive(Clone)]
pub struct Decoder {
    config: CoercionConfig,
    defaults: DefaultRegistry,
    reporter: Option<Arc<dyn OutcomeReporter>>,
}

impl Decoder {
    /// Build a decoder over a configuration snapshot. Fails only if the
    /// default registry's sentinels cannot be constructed.
    pub fn new(config: CoercionConfig) -> Result<Self, DecodeError> {
        Ok(Self {
            config,
            defaults: DefaultRegistry::new()?,
            reporter: None,
        })
    }

    /// Route outcomes to an explicit reporter instead of the process-wide
    /// slot.
    pub fn with_reporter(mut self, reporter: Arc<dyn OutcomeReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn config(&self) -> &CoercionConfig {
        &self.config
    }

    pub fn defaults(&self) -> &DefaultRegistry {
        &self.defaults
    }

    /// Decode a non-optional field: exact, coerced, or the registered
    /// default. Never fails; every non-exact outcome is reported.
    pub fn decode_field<C: FieldContainer>(
        &self,
        container: &C,
        path: &CodingPath,
        target: SupportedType,
    ) -> FieldValue {
        match self.resolve(container, target) {
            Resolution::Exact(value) => value,
            Resolution::Null => {
                self.emit(FieldOutcome::Defaulted {
                    expected: target,
                    path: path.to_string(),
                    reason: FallbackReason::Null,
                });
                self.defaults.default_for(target)
            }
            Resolution::Coerced {
                value,
                from,
                raw_sample,
            } => {
                self.emit(FieldOutcome::Coerced {
                    from,
                    to: target,
                    path: path.to_string(),
                    raw_sample,
                });
                value
            }
            // Designed-as-absent, but a non-optional field still needs a
            // value; the default substitution is always reported.
            Resolution::Absent => {
                self.emit(FieldOutcome::Defaulted {
                    expected: target,
                    path: path.to_string(),
                    reason: FallbackReason::EmptyUrlString,
                });
                self.defaults.default_for(target)
            }
            Resolution::NoCoercion => {
                self.emit(FieldOutcome::Defaulted {
                    expected: target,
                    path: path.to_string(),
                    reason: FallbackReason::CoercionFailed,
                });
                self.defaults.default_for(target)
            }
        }
    }

    /// Decode an optional field: exact, coerced, or absent. Null and the
    /// designed-as-absent URL path resolve to `None` silently; only a real
    /// coercion failure reports.
    pub fn decode_optional_field<C: FieldContainer>(
        &self,
        container: &C,
        path: &CodingPath,
        target: SupportedType,
    ) -> Option<FieldValue> {
        match self.resolve(container, target) {
            Resolution::Exact(value) => Some(value),
            // Null → absent is the expected, non-noisy path.
            Resolution::Null => None,
            Resolution::Coerced {
                value,
                from,
                raw_sample,
            } => {
                self.emit(FieldOutcome::Coerced {
                    from,
                    to: target,
                    path: path.to_string(),
                    raw_sample,
                });
                Some(value)
            }
            Resolution::Absent => None,
            Resolution::NoCoercion => {
                self.emit(FieldOutcome::Failed {
                    expected: target,
                    path: path.to_string(),
                    reason: FallbackReason::CoercionFailed,
                });
                None
            }
        }
    }

    /// Shared decision tree: `TryExact → TryNull → TryCoerce`.
    fn resolve<C: FieldContainer>(&self, container: &C, target: SupportedType) -> Resolution {
        if let Some(value) = container.decode_exact(target) {
            tracing::trace!(target = target.name(), "exact decode");
            return Resolution::Exact(value);
        }

        if container.is_null() {
            return Resolution::Null;
        }

        // Reinterpret the raw value as string, then int, then float, then
        // bool; the first reinterpretation whose coercion succeeds wins.
        let reinterpretations = [
            container.as_string().map(RawDecoded::Str),
            container.as_int().map(RawDecoded::Int),
            container.as_float().map(RawDecoded::Float),
            container.as_bool().map(RawDecoded::Bool),
        ];

        for raw in reinterpretations.into_iter().flatten() {
            match engine::coerce(&raw, target, &self.config) {
                CoercionResult::Coerced { value, from } => {
                    tracing::trace!(
                        from = from.name(),
                        to = target.name(),
                        "coerced decode"
                    );
                    return Resolution::Coerced {
                        value,
                        from,
                        raw_sample: truncate_sample(&raw.sample_text()),
                    };
                }
                CoercionResult::Absent => return Resolution::Absent,
                CoercionResult::Unsupported => {}
            }
        }

        Resolution::NoCoercion
    }

    fn emit(&self, outcome: FieldOutcome) {
        match &self.reporter {
            Some(reporter) => reporter.report(&outcome),
            None => reporter::report_global(&outcome),
        }
    }
}

/// Encode a decoded field value back to JSON. Always the identity — no
/// coercion happens on encode.
pub fn encode_field(value: &FieldValue) -> Value {
    value.to_json()
}

/// Encode an optional field value; absence encodes as null.
pub fn encode_optional_field(value: Option<&FieldValue>) -> Value {
    value.map(FieldValue::to_json).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::RecordingReporter;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn decoder_with_recorder() -> (Decoder, Arc<RecordingReporter>) {
        let recorder = Arc::new(RecordingReporter::new());
        let decoder = Decoder::new(CoercionConfig::default())
            .unwrap()
            .with_reporter(recorder.clone());
        (decoder, recorder)
    }

    fn path() -> CodingPath {
        CodingPath::root().child("field")
    }

    // --- TryExact ---

    #[test]
    fn exact_decode_is_silent() {
        let (decoder, recorder) = decoder_with_recorder();
        let value = json!(42);
        let decoded =
            decoder.decode_field(&JsonContainer::new(&value), &path(), SupportedType::Int);
        assert_eq!(decoded, FieldValue::Int(42));
        assert!(recorder.is_empty());
    }

    #[test]
    fn exact_decode_date_from_rfc3339_is_silent() {
        let (decoder, recorder) = decoder_with_recorder();
        let value = json!("2023-11-14T22:13:20Z");
        let decoded =
            decoder.decode_field(&JsonContainer::new(&value), &path(), SupportedType::Date);
        assert_eq!(
            decoded,
            FieldValue::Date(DateTime::from_timestamp(1_700_000_000, 0).unwrap())
        );
        assert!(recorder.is_empty());
    }

    #[test]
    fn exact_float_rejects_numbers_past_f32_range() {
        let value = json!(1e300);
        assert_eq!(
            JsonContainer::new(&value).decode_exact(SupportedType::Float),
            None
        );
    }

    // --- TryNull ---

    #[test]
    fn null_required_defaults_with_event() {
        let (decoder, recorder) = decoder_with_recorder();
        let value = json!(null);
        let decoded =
            decoder.decode_field(&JsonContainer::new(&value), &path(), SupportedType::String);
        assert_eq!(decoded, FieldValue::Str(String::new()));
        assert_eq!(
            recorder.take(),
            vec![FieldOutcome::Defaulted {
                expected: SupportedType::String,
                path: "/field".to_string(),
                reason: FallbackReason::Null,
            }]
        );
    }

    #[test]
    fn null_optional_is_silent_absence() {
        let (decoder, recorder) = decoder_with_recorder();
        let value = json!(null);
        let decoded = decoder.decode_optional_field(
            &JsonContainer::new(&value),
            &path(),
            SupportedType::String,
        );
        assert_eq!(decoded, None);
        assert!(recorder.is_empty());
    }

    // --- TryCoerce ---

    #[test]
    fn coercion_emits_exactly_one_event() {
        let (decoder, recorder) = decoder_with_recorder();
        let value = json!("42");
        let decoded =
            decoder.decode_field(&JsonContainer::new(&value), &path(), SupportedType::Int);
        assert_eq!(decoded, FieldValue::Int(42));
        assert_eq!(
            recorder.take(),
            vec![FieldOutcome::Coerced {
                from: RawKind::String,
                to: SupportedType::Int,
                path: "/field".to_string(),
                raw_sample: "42".to_string(),
            }]
        );
    }

    #[test]
    fn reinterpretation_order_prefers_string() {
        // A JSON string only reads back as a string; a JSON int reads as
        // int (and float), never as string. The order matters for raw-kind
        // attribution in events.
        let (decoder, recorder) = decoder_with_recorder();
        let value = json!(1);
        let decoded =
            decoder.decode_field(&JsonContainer::new(&value), &path(), SupportedType::Bool);
        assert_eq!(decoded, FieldValue::Bool(true));
        match recorder.take().as_slice() {
            [FieldOutcome::Coerced { from, .. }] => assert_eq!(*from, RawKind::Int),
            other => panic!("unexpected outcomes: {other:?}"),
        }
    }

    // --- Resolve fallbacks ---

    #[test]
    fn coercion_failure_required_defaults_with_event() {
        let (decoder, recorder) = decoder_with_recorder();
        let value = json!("not a number");
        let decoded =
            decoder.decode_field(&JsonContainer::new(&value), &path(), SupportedType::Int);
        assert_eq!(decoded, FieldValue::Int(0));
        assert_eq!(
            recorder.take(),
            vec![FieldOutcome::Defaulted {
                expected: SupportedType::Int,
                path: "/field".to_string(),
                reason: FallbackReason::CoercionFailed,
            }]
        );
    }

    #[test]
    fn coercion_failure_optional_fails_with_event() {
        let (decoder, recorder) = decoder_with_recorder();
        let value = json!("not a number");
        let decoded = decoder.decode_optional_field(
            &JsonContainer::new(&value),
            &path(),
            SupportedType::Int,
        );
        assert_eq!(decoded, None);
        assert_eq!(
            recorder.take(),
            vec![FieldOutcome::Failed {
                expected: SupportedType::Int,
                path: "/field".to_string(),
                reason: FallbackReason::CoercionFailed,
            }]
        );
    }

    #[test]
    fn container_shaped_values_cannot_coerce() {
        let (decoder, recorder) = decoder_with_recorder();
        let value = json!({"nested": true});
        let decoded =
            decoder.decode_field(&JsonContainer::new(&value), &path(), SupportedType::String);
        assert_eq!(decoded, FieldValue::Str(String::new()));
        assert_eq!(recorder.len(), 1);
    }

    // --- Encode ---

    #[test]
    fn encode_is_identity() {
        assert_eq!(encode_field(&FieldValue::Int(7)), json!(7));
        assert_eq!(encode_optional_field(None), Value::Null);
        assert_eq!(
            encode_optional_field(Some(&FieldValue::Bool(true))),
            json!(true)
        );
    }
}
