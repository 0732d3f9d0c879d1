//! Error types for decoder construction and configuration.
//!
//! Per-field bad data never surfaces as an error — it degrades to a default
//! or absent value plus a reported [`crate::FieldOutcome`]. These variants
//! only cover programming errors in the decoder's own setup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    /// A registered default value could not be constructed. Fatal at
    /// startup — must never surface per-field.
    #[error("invalid default for {type_name}: {message}")]
    InvalidDefault {
        type_name: &'static str,
        message: String,
    },

    /// The truthy and falsy literal sets share at least one literal.
    /// Returned by `CoercionConfig::validate()` for callers that treat
    /// overlap as a misconfiguration instead of relying on true-wins.
    #[error("boolean literal sets overlap: {literals:?}")]
    LiteralOverlap { literals: Vec<String> },
}
