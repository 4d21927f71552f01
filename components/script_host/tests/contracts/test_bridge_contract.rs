//! Conversion rules exercised through ScriptHeap

use date_value::DateValue;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use script_host::{ScriptHeap, ScriptValue};
use tagged_value::{BridgeConfig, HandleLifetime, TaggedValue};

type Value = TaggedValue<ScriptValue>;

#[test]
fn test_primitives_classify_by_kind() {
    let heap = ScriptHeap::new();
    let bridge = heap.bridge(BridgeConfig::default());

    assert_eq!(bridge.classify(&ScriptValue::Empty), Value::Undefined);
    assert_eq!(bridge.classify(&ScriptValue::undefined()), Value::Undefined);
    assert_eq!(bridge.classify(&ScriptValue::null()), Value::Null);
    assert_eq!(bridge.classify(&ScriptValue::boolean(true)), Value::Boolean(true));
    assert_eq!(bridge.classify(&ScriptValue::BooleanObject(false)), Value::Boolean(false));
    assert_eq!(bridge.classify(&ScriptValue::number(3.0)), Value::Integer(3));
    assert_eq!(bridge.classify(&ScriptValue::NumberObject(0.5)), Value::Number(0.5));
    assert_eq!(
        bridge.classify(&ScriptValue::number(9_999_999_999.0)),
        Value::Long(9_999_999_999)
    );
    assert_eq!(bridge.classify(&ScriptValue::string("hi")), Value::from("hi"));
    assert_eq!(
        bridge.classify(&ScriptValue::StringObject("boxed".into())),
        Value::from("boxed")
    );
}

#[test]
fn test_dates_round_trip() {
    let heap = ScriptHeap::new();
    let bridge = heap.bridge(BridgeConfig::default());
    let script = ScriptValue::date(784_887_151_000.0);

    let value = bridge.classify(&script);
    assert_eq!(
        value.as_date().map(DateValue::to_gmt_string),
        Some("Tue, 15 Nov 1994 08:12:31 GMT".to_string())
    );
    assert_eq!(bridge.to_handle(&value), script);
}

#[test]
fn test_invalid_date_becomes_empty_and_back_to_nan() {
    let heap = ScriptHeap::new();
    let bridge = heap.bridge(BridgeConfig::default());

    let value = bridge.classify(&ScriptValue::date(f64::NAN));
    assert!(value.as_date().is_some_and(DateValue::is_empty));
    match bridge.to_handle(&value) {
        ScriptValue::Date(ms) => assert!(ms.is_nan()),
        other => panic!("expected date, got {other:?}"),
    }
}

#[test]
fn test_registered_object_round_trips_to_same_wrapper() {
    let mut heap = ScriptHeap::new();
    let (id, wrapper) = heap.register();
    let bridge = heap.bridge(BridgeConfig::default());

    let value = bridge.classify(&wrapper);
    assert_eq!(value, Value::Object(id));
    assert_eq!(bridge.to_handle(&value), wrapper);
}

#[test]
fn test_released_object_converts_to_null() {
    let mut heap = ScriptHeap::new();
    let (id, _wrapper) = heap.register();
    let value = Value::Object(id);
    heap.release(id).unwrap();

    let bridge = heap.bridge(BridgeConfig::default());
    assert_eq!(bridge.to_handle(&value), ScriptValue::Null);
}

#[test]
fn test_unknown_objects_become_handles() {
    let heap = ScriptHeap::new();
    let plain = ScriptValue::object();

    let transient = heap.bridge(BridgeConfig::default()).classify(&plain);
    assert_eq!(transient, Value::TransientHandle(plain.clone()));

    let persistent = heap
        .bridge(BridgeConfig::default())
        .with_lifetime(HandleLifetime::Persistent)
        .classify(&plain);
    assert!(persistent.is_persistent());
    assert_eq!(persistent.as_handle(), Some(&plain));
}

#[test]
fn test_persistent_function_outlives_call_and_releases_once() {
    let heap = ScriptHeap::new();
    let bridge = heap.bridge(BridgeConfig::persistent());
    let callback = ScriptValue::function("twice", |args| {
        ScriptValue::number(args.first().map_or(0.0, |a| match a {
            ScriptValue::Number(n) => n * 2.0,
            _ => f64::NAN,
        }))
    });

    let mut stored = bridge.classify(&callback);
    assert_eq!(callback.ref_count(), Some(2));

    let copy = stored.clone();
    // Clones share one persistent reference
    assert_eq!(callback.ref_count(), Some(2));

    let handle = bridge.to_handle(&copy);
    assert_eq!(handle.call(&[ScriptValue::number(21.0)]), Some(ScriptValue::number(42.0)));
    drop(handle);
    drop(copy);
    assert_eq!(callback.ref_count(), Some(2));

    bridge.assign(&mut stored, &ScriptValue::null());
    assert_eq!(callback.ref_count(), Some(1));
    assert_eq!(stored, Value::Null);
}

#[test]
fn test_long_and_number_go_back_as_numbers() {
    let heap = ScriptHeap::new();
    let bridge = heap.bridge(BridgeConfig::default());
    assert_eq!(bridge.to_handle(&Value::Long(1 << 40)), ScriptValue::number(1_099_511_627_776.0));
    assert_eq!(bridge.to_handle(&Value::Integer(-1)), ScriptValue::number(-1.0));
    assert_eq!(bridge.to_handle(&Value::Type), ScriptValue::Null);
    assert_eq!(bridge.to_handle(&Value::PersistentMarker), ScriptValue::Null);
}

proptest! {
    #[test]
    fn finite_numbers_round_trip_bit_identical(n in any::<f64>().prop_filter("finite", |n| n.is_finite())) {
        let heap = ScriptHeap::new();
        let bridge = heap.bridge(BridgeConfig::default());
        match bridge.to_handle(&bridge.classify(&ScriptValue::number(n))) {
            // -0.0 classifies as Integer(0) and comes back as +0.0
            ScriptValue::Number(back) => prop_assert!(back == n),
            other => prop_assert!(false, "expected number, got {:?}", other),
        }
    }

    #[test]
    fn strings_round_trip(s in ".*") {
        let heap = ScriptHeap::new();
        let bridge = heap.bridge(BridgeConfig::default());
        let value = bridge.classify(&ScriptValue::string(s.clone()));
        prop_assert_eq!(value.as_str(), Some(s.as_str()));
        prop_assert_eq!(bridge.to_handle(&value), ScriptValue::string(s));
    }
}
