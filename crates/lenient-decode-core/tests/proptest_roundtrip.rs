//! Property-based test for the decode→encode→re-decode invariant.
//!
//! For any raw scalar and any target type, the first decode may coerce or
//! fall back, but whatever value it produces must re-decode exactly (no
//! reported outcome) from its own encoding — post-coercion state is always
//! "exact" on the next pass.

use std::sync::Arc;

use proptest::prelude::*;
use serde_json::{json, Value};

use lenient_decode_core::{
    encode_field, CodingPath, CoercionConfig, Decoder, JsonContainer, RecordingReporter,
    SupportedType,
};

/// Raw scalar material a loosely-typed source could produce.
fn arb_raw_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(|i| json!(i)),
        (-1.0e9f64..1.0e9f64).prop_map(|d| json!(d)),
        // Millisecond-magnitude timestamps (≥ 1×10¹²)
        (1.0e12f64..1.0e15f64).prop_map(|d| json!(d)),
        // Finite numbers past the f32 range
        (-1.0e300f64..1.0e300f64).prop_map(|d| json!(d)),
        // Numeric-looking strings exercise string→number/date paths
        any::<i32>().prop_map(|i| json!(i.to_string())),
        // Free-form strings mostly fail coercion and exercise fallbacks
        "[a-z]{0,12}".prop_map(|s| json!(s)),
        Just(json!("2024-06-01T12:00:00Z")),
        Just(json!("https://example.com/path")),
        Just(json!("")),
    ]
}

fn arb_target() -> impl Strategy<Value = SupportedType> {
    prop_oneof![
        Just(SupportedType::String),
        Just(SupportedType::Int),
        Just(SupportedType::Double),
        Just(SupportedType::Float),
        Just(SupportedType::Bool),
        Just(SupportedType::Decimal),
        Just(SupportedType::Date),
        Just(SupportedType::Url),
    ]
}

proptest! {
    #[test]
    fn required_decode_round_trips_to_exact(raw in arb_raw_scalar(), target in arb_target()) {
        let recorder = Arc::new(RecordingReporter::new());
        let decoder = Decoder::new(CoercionConfig::default())
            .unwrap()
            .with_reporter(recorder.clone());
        let path = CodingPath::root().child("f");

        let first = decoder.decode_field(&JsonContainer::new(&raw), &path, target);
        prop_assert_eq!(first.supported_type(), target);
        prop_assert!(recorder.take().len() <= 1);

        let encoded = encode_field(&first);
        let second = decoder.decode_field(&JsonContainer::new(&encoded), &path, target);

        prop_assert_eq!(&second, &first, "re-decode of {} as {}", encoded, target);
        prop_assert!(
            recorder.take().is_empty(),
            "second pass of {} as {} was not exact",
            encoded,
            target
        );
    }

    #[test]
    fn optional_decode_round_trips_to_exact(raw in arb_raw_scalar(), target in arb_target()) {
        let recorder = Arc::new(RecordingReporter::new());
        let decoder = Decoder::new(CoercionConfig::default())
            .unwrap()
            .with_reporter(recorder.clone());
        let path = CodingPath::root().child("f");

        let first = decoder.decode_optional_field(&JsonContainer::new(&raw), &path, target);
        prop_assert!(recorder.take().len() <= 1);

        if let Some(first) = first {
            let encoded = encode_field(&first);
            let second = decoder.decode_optional_field(&JsonContainer::new(&encoded), &path, target);
            prop_assert_eq!(second.as_ref(), Some(&first));
            prop_assert!(recorder.take().is_empty());
        }
    }

    /// Null input: required targets always resolve to the registered default
    /// with exactly one Defaulted outcome; optional targets are silently absent.
    #[test]
    fn null_contract_holds_for_every_target(target in arb_target()) {
        let recorder = Arc::new(RecordingReporter::new());
        let decoder = Decoder::new(CoercionConfig::default())
            .unwrap()
            .with_reporter(recorder.clone());
        let path = CodingPath::root().child("f");
        let raw = Value::Null;

        let value = decoder.decode_field(&JsonContainer::new(&raw), &path, target);
        prop_assert_eq!(value, decoder.defaults().default_for(target));
        prop_assert_eq!(recorder.take().len(), 1);

        let absent = decoder.decode_optional_field(&JsonContainer::new(&raw), &path, target);
        prop_assert_eq!(absent, None);
        prop_assert!(recorder.take().is_empty());
    }
}
