//! Configuration for lenient decoding.
//!
//! A `CoercionConfig` is a plain value object: the decoder takes a snapshot
//! for the duration of a decode pass, so mutation is only meaningful between
//! passes. There is deliberately no global config singleton.
//!
//! ## Serialization Format
//!
//! Fields are serialized in `kebab-case` (e.g., `allow-string-to-number`).
//! This naming convention is part of the public API contract for config files.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Gates and strategies controlling which coercions the engine may apply.
///
/// The defaults are conservative-lenient: every coercion family enabled,
/// string trimming enabled, ISO-8601 dates enabled, and the empty string
/// treated as an absent URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CoercionConfig {
    /// String → Int/Double/Float/Decimal via numeric literal parsing.
    pub allow_string_to_number: bool,
    /// String → Bool via the literal sets, then numeric fallback.
    pub allow_string_to_bool: bool,
    /// Int/Float → String via stringification.
    pub allow_number_to_string: bool,
    /// Int/Float → Bool via nonzero.
    pub allow_number_to_bool: bool,
    /// Bool → String as `"true"` / `"false"`.
    pub allow_bool_to_string: bool,
    /// Bool → numeric types as 1 / 0.
    pub allow_bool_to_number: bool,
    /// String → Url via URL parsing.
    pub allow_url_from_string: bool,
    /// Trim surrounding whitespace before string coercions.
    pub trim_strings: bool,
    /// Treat `""` as an absent URL rather than a failed one.
    pub treat_empty_string_as_absent_url: bool,

    /// String → Date via ISO-8601 / RFC 3339.
    pub date_iso8601: bool,
    /// Int/Float → Date as Unix seconds.
    pub date_unix_seconds: bool,
    /// Float → Date as Unix milliseconds when magnitude ≥ 1×10¹².
    pub date_unix_millis: bool,
    /// String → Date by parsing the string as a numeric timestamp first.
    pub date_numeric_strings: bool,
    /// Custom `chrono` format strings tried in list order, first match wins.
    /// Consulted after ISO-8601 and before the numeric-string strategy.
    pub custom_date_formats: Vec<String>,

    /// Literals accepted as `true` (matched case-insensitively).
    pub bool_true_literals: HashSet<String>,
    /// Literals accepted as `false` (matched case-insensitively).
    pub bool_false_literals: HashSet<String>,
}

impl Default for CoercionConfig {
    fn default() -> Self {
        Self {
            allow_string_to_number: true,
            allow_string_to_bool: true,
            allow_number_to_string: true,
            allow_number_to_bool: true,
            allow_bool_to_string: true,
            allow_bool_to_number: true,
            allow_url_from_string: true,
            trim_strings: true,
            treat_empty_string_as_absent_url: true,
            date_iso8601: true,
            date_unix_seconds: true,
            date_unix_millis: true,
            date_numeric_strings: true,
            custom_date_formats: Vec::new(),
            bool_true_literals: ["true", "yes", "y", "1"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            bool_false_literals: ["false", "no", "n", "0"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl CoercionConfig {
    /// Classify a string against the boolean literal sets.
    ///
    /// The true set is checked first, so a literal present in both sets
    /// reads as `true` ("true wins"). Callers that consider overlap a
    /// misconfiguration should run [`CoercionConfig::validate`] at startup.
    pub fn classify_bool_literal(&self, s: &str) -> Option<bool> {
        if self.is_true_literal(s) {
            Some(true)
        } else if self.is_false_literal(s) {
            Some(false)
        } else {
            None
        }
    }

    pub fn is_true_literal(&self, s: &str) -> bool {
        self.bool_true_literals
            .iter()
            .any(|l| l.eq_ignore_ascii_case(s))
    }

    pub fn is_false_literal(&self, s: &str) -> bool {
        self.bool_false_literals
            .iter()
            .any(|l| l.eq_ignore_ascii_case(s))
    }

    /// Check the literal sets for case-insensitive overlap.
    ///
    /// Decoding itself never fails on overlap (true wins); this is for
    /// application startup code that wants to reject ambiguous configs.
    pub fn validate(&self) -> Result<(), DecodeError> {
        let mut overlap: Vec<String> = self
            .bool_true_literals
            .iter()
            .filter(|t| self.is_false_literal(t))
            .map(|t| t.to_ascii_lowercase())
            .collect();
        if overlap.is_empty() {
            Ok(())
        } else {
            overlap.sort();
            overlap.dedup();
            Err(DecodeError::LiteralOverlap { literals: overlap })
        }
    }
}
