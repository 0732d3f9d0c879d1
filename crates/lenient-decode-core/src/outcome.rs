//! Outcome taxonomy — the events reported for every non-exact field decode.
//!
//! An exact decode is the non-newsworthy default path and emits nothing.
//! Everything else reports exactly one outcome: a successful coercion, a
//! default fallback (non-optional fields), or a terminal failure (optional
//! fields). Outcomes are constructed and reported synchronously within the
//! decode call that discovers them and are not retained by the decoder.

use serde::{Deserialize, Serialize};

use crate::raw::RawKind;
use crate::supported::SupportedType;

/// Raw samples are truncated to this many characters to avoid leaking large
/// upstream payloads into logs.
pub const MAX_RAW_SAMPLE_CHARS: usize = 100;

/// Why a field fell back to its default or to absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackReason {
    /// The raw value was literally null.
    Null,
    /// No coercion path produced a value of the target type.
    CoercionFailed,
    /// An empty string stood where a URL was required and the config treats
    /// that as designed absence.
    EmptyUrlString,
}

/// One reported decode outcome, keyed by the field's coding path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldOutcome {
    /// A non-exact decode succeeded through the coercion engine.
    Coerced {
        /// Source-side kind of the raw value.
        from: RawKind,
        /// Target type the value was coerced into.
        to: SupportedType,
        /// Rendered coding path (e.g. `/users/0/email`).
        path: String,
        /// Truncated rendering of the raw value for diagnostics.
        raw_sample: String,
    },
    /// A non-optional field resolved to its registered default.
    Defaulted {
        expected: SupportedType,
        path: String,
        reason: FallbackReason,
    },
    /// An optional field resolved to absent after a real coercion failure.
    Failed {
        expected: SupportedType,
        path: String,
        reason: FallbackReason,
    },
}

impl FieldOutcome {
    /// The rendered coding path this outcome refers to.
    pub fn path(&self) -> &str {
        match self {
            FieldOutcome::Coerced { path, .. }
            | FieldOutcome::Defaulted { path, .. }
            | FieldOutcome::Failed { path, .. } => path,
        }
    }
}

/// Truncate a raw sample for diagnostics.
pub fn truncate_sample(raw: &str) -> String {
    if raw.chars().count() <= MAX_RAW_SAMPLE_CHARS {
        raw.to_string()
    } else {
        let preview: String = raw.chars().take(MAX_RAW_SAMPLE_CHARS).collect();
        format!("{preview}...")
    }
}
