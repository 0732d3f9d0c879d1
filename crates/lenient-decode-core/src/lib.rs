//! Lenient typed-field decoding for loosely-typed JSON-like data.
//!
//! Upstream sources routinely hand back the wrong literal type for a field —
//! `"42"` where an integer was expected, `1` where a boolean was, a Unix
//! timestamp where a date was. This crate decodes such values into a closed
//! set of target types anyway, applying a configurable set of coercion
//! rules, and reports every non-exact outcome to an audit sink.
//!
//! Decoding one field walks a fixed decision tree:
//!
//! 1. **Exact** — the container's typed decode succeeds; silent.
//! 2. **Null** — non-optional fields take their registered default (reported),
//!    optional fields become absent (silent).
//! 3. **Coerce** — the engine tries the raw value as string, int, float,
//!    then bool against the target type, gated by [`CoercionConfig`];
//!    success is reported as [`FieldOutcome::Coerced`].
//! 4. **Resolve** — otherwise non-optional fields default
//!    ([`FieldOutcome::Defaulted`]) and optional fields become absent
//!    ([`FieldOutcome::Failed`]).
//!
//! A single field decode never errors and never reports more than one
//! outcome. Callers that need strict validation install an
//! [`OutcomeReporter`] and inspect what it received.
//!
//! ```
//! use lenient_decode_core::{
//!     CodingPath, CoercionConfig, Decoder, FieldValue, JsonContainer, SupportedType,
//! };
//! use serde_json::json;
//!
//! let decoder = Decoder::new(CoercionConfig::default()).unwrap();
//! let raw = json!("42");
//! let value = decoder.decode_field(
//!     &JsonContainer::new(&raw),
//!     &CodingPath::root().child("age"),
//!     SupportedType::Int,
//! );
//! assert_eq!(value, FieldValue::Int(42));
//! ```

pub mod config;
pub mod decoder;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod path;
pub mod raw;
pub mod reporter;
pub mod supported;

pub use config::CoercionConfig;
pub use decoder::{
    encode_field, encode_optional_field, Decoder, FieldContainer, JsonContainer,
};
pub use defaults::{DefaultRegistry, PLACEHOLDER_URL};
pub use engine::{coerce, CoercionResult, MILLIS_MAGNITUDE_THRESHOLD};
pub use error::DecodeError;
pub use outcome::{truncate_sample, FallbackReason, FieldOutcome, MAX_RAW_SAMPLE_CHARS};
pub use path::{escape_pointer_segment, CodingPath};
pub use raw::{RawDecoded, RawKind};
pub use reporter::{
    clear_reporter, set_reporter, OutcomeReporter, RecordingReporter, TracingReporter,
};
pub use supported::{FieldValue, SupportedType};
