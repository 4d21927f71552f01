//! Unit tests for TaggedValue ownership and accessors

use tagged_value::{DateValue, ObjectId, PersistentHandle, TaggedValue, ValueKind};

type Value = TaggedValue<&'static str>;

mod value_creation_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_undefined() {
        let val = Value::Undefined;
        assert!(matches!(val, Value::Undefined));
        assert_eq!(val.kind(), ValueKind::Undefined);
    }

    #[test]
    fn test_value_integer_extremes() {
        assert!(matches!(Value::from(i32::MAX), Value::Integer(n) if n == i32::MAX));
        assert!(matches!(Value::from(i32::MIN), Value::Integer(n) if n == i32::MIN));
    }

    #[test]
    fn test_value_long_from_native_setter() {
        // The native i64 setter never narrows
        assert_eq!(Value::from(1_i64).kind(), ValueKind::Long);
        assert_eq!(Value::from_integer(1).kind(), ValueKind::Integer);
    }

    #[test]
    fn test_value_date() {
        let d = DateValue::utc(2021, 0, 1, 0, 0, 0, 0);
        let val = Value::from(d);
        assert_eq!(val.as_date(), Some(&d));
        assert_eq!(val.kind(), ValueKind::Date);
    }

    #[test]
    fn test_value_object() {
        let val = Value::from(ObjectId(12));
        assert_eq!(val.as_object(), Some(ObjectId(12)));
        assert!(!val.has_content());
    }
}

mod value_ownership_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reassign_string_to_integer() {
        let mut val = Value::from("owned");
        assert_eq!(val.as_str(), Some("owned"));
        val = Value::Integer(1);
        assert_eq!(val, Value::Integer(1));
    }

    #[test]
    fn test_copy_of_string_is_independent() {
        let original = Value::from(String::from("left"));
        let mut copy = original.clone();
        copy.as_mut_string().unwrap().replace_range(.., "right");
        assert_eq!(original.as_str(), Some("left"));
        assert_eq!(copy.as_str(), Some("right"));
    }

    #[test]
    fn test_copy_of_persistent_adds_reference() {
        let val = Value::PersistentHandle(PersistentHandle::new("fn"));
        let copy = val.clone();
        let Value::PersistentHandle(p) = &copy else {
            panic!("expected persistent handle");
        };
        assert_eq!(p.ref_count(), 2);
        drop(val);
        assert_eq!(p.ref_count(), 1);
    }

    #[test]
    fn test_reassign_persistent_decrements_once() {
        let shared = PersistentHandle::new("fn");
        let mut val = Value::PersistentHandle(shared.clone());
        assert_eq!(shared.ref_count(), 2);
        val = Value::Null;
        assert_eq!(shared.ref_count(), 1);
        assert!(val.is_null());
        val = Value::Boolean(true);
        assert_eq!(shared.ref_count(), 1);
        assert_eq!(val, Value::Boolean(true));
    }

    #[test]
    fn test_transient_handle_is_held_by_value() {
        let val = Value::TransientHandle("local");
        assert_eq!(val.as_handle(), Some(&"local"));
        assert!(!val.is_persistent());
    }

    #[test]
    fn test_clear() {
        let mut val = Value::from("text");
        val.clear();
        assert!(val.is_undefined());
    }
}

mod value_rendering_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_undefined_renders_without_content() {
        assert_eq!(Value::Undefined.render(), ("undefined".to_string(), false));
    }

    #[test]
    fn test_placeholders_render_null() {
        for val in [Value::Null, Value::Type, Value::PersistentMarker] {
            assert_eq!(val.render(), ("null".to_string(), false));
        }
    }

    #[test]
    fn test_numbers_render_with_content() {
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::Long(-9_999_999_999).to_string(), "-9999999999");
        assert_eq!(Value::Number(1250.5).to_string(), "1250.5");
        assert!(Value::Number(f64::NAN).has_content());
    }

    #[test]
    fn test_date_renders_gmt() {
        let val = Value::from(DateValue::from_millis(0.0));
        assert_eq!(val.render(), ("Thu, 01 Jan 1970 00:00:00 GMT".to_string(), true));
    }

    #[test]
    fn test_handles_render_empty() {
        assert_eq!(Value::TransientHandle("h").render(), (String::new(), false));
    }
}
