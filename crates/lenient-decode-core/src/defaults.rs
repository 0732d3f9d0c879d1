//! Default Registry — the total map from target type to its zero/sentinel
//! value.
//!
//! Totality is compiler-enforced: `default_for` is an exhaustive match over
//! [`SupportedType`], so a new member cannot ship without a default. The only
//! runtime-constructed sentinels (placeholder URL, distant-past date) are
//! built once in `new()`; failure there is a construction-time error, never
//! a per-field one.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use url::Url;

use crate::error::DecodeError;
use crate::supported::{FieldValue, SupportedType};

/// Sentinel URL substituted when a non-optional URL field cannot be decoded.
pub const PLACEHOLDER_URL: &str = "about:blank";

/// Pure lookup from target type to its designated default value.
#[derive(Debug, Clone)]
pub struct DefaultRegistry {
    placeholder_url: Url,
    distant_past: DateTime<Utc>,
}

impl DefaultRegistry {
    /// Build the registry, constructing the runtime sentinels.
    ///
    /// An error here indicates a programming error in the decoder's own
    /// setup and must abort startup, not surface per-field.
    pub fn new() -> Result<Self, DecodeError> {
        let placeholder_url =
            Url::parse(PLACEHOLDER_URL).map_err(|e| DecodeError::InvalidDefault {
                type_name: SupportedType::Url.name(),
                message: e.to_string(),
            })?;
        // Distant past rather than the Unix epoch, so defaulted dates are
        // unmistakable in downstream data.
        let distant_past = Utc
            .with_ymd_and_hms(1, 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| DecodeError::InvalidDefault {
                type_name: SupportedType::Date.name(),
                message: "distant-past sentinel out of range".to_string(),
            })?;
        Ok(Self {
            placeholder_url,
            distant_past,
        })
    }

    /// The default value for a target type. Total over [`SupportedType`];
    /// no failure mode.
    pub fn default_for(&self, target: SupportedType) -> FieldValue {
        match target {
            SupportedType::String => FieldValue::Str(String::new()),
            SupportedType::Int => FieldValue::Int(0),
            SupportedType::Double => FieldValue::Double(0.0),
            SupportedType::Float => FieldValue::Float(0.0),
            SupportedType::Bool => FieldValue::Bool(false),
            SupportedType::Decimal => FieldValue::Decimal(Decimal::ZERO),
            SupportedType::Date => FieldValue::Date(self.distant_past),
            SupportedType::Url => FieldValue::Url(self.placeholder_url.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_construction_succeeds() {
        DefaultRegistry::new().unwrap();
    }

    #[test]
    fn default_is_defined_and_well_typed_for_every_member() {
        let registry = DefaultRegistry::new().unwrap();
        for ty in SupportedType::ALL {
            let value = registry.default_for(ty);
            assert_eq!(value.supported_type(), ty, "default for {ty} has wrong type");
        }
    }

    #[test]
    fn scalar_defaults_are_zero_values() {
        let registry = DefaultRegistry::new().unwrap();
        assert_eq!(registry.default_for(SupportedType::String).as_str(), Some(""));
        assert_eq!(registry.default_for(SupportedType::Int).as_i64(), Some(0));
        assert_eq!(registry.default_for(SupportedType::Bool).as_bool(), Some(false));
        assert_eq!(
            registry.default_for(SupportedType::Decimal).as_decimal(),
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn date_default_is_distant_past() {
        let registry = DefaultRegistry::new().unwrap();
        let date = registry.default_for(SupportedType::Date).as_date().unwrap();
        assert_eq!(date.to_rfc3339(), "0001-01-01T00:00:00+00:00");
    }

    #[test]
    fn url_default_is_placeholder() {
        let registry = DefaultRegistry::new().unwrap();
        let value = registry.default_for(SupportedType::Url);
        assert_eq!(value.as_url().unwrap().as_str(), PLACEHOLDER_URL);
    }
}
