//! Classification and round-trip properties

use proptest::prelude::*;
use tagged_value::{format_number, parse_numeric_literal, NumericLiteral, TaggedValue};

type Value = TaggedValue<()>;

const MAX_EXACT: i64 = 1 << 53;

/// Largest magnitude whose sixteen-digit text does not round past `f64::MAX`.
const MAX_SIXTEEN_DIGITS: f64 = 1.797693134862315e308;

fn long_outside_int32() -> impl Strategy<Value = i64> {
    prop_oneof![
        (i64::from(i32::MAX) + 1)..=MAX_EXACT,
        -MAX_EXACT..=(i64::from(i32::MIN) - 1),
    ]
}

fn fractional() -> impl Strategy<Value = f64> {
    (-1e15_f64..1e15).prop_filter("has a fraction", |f| f.fract() != 0.0)
}

/// Magnitudes that render in fixed notation with every digit kept.
fn fixed_notation() -> impl Strategy<Value = f64> {
    (1e-3_f64..1e15, any::<bool>())
        .prop_filter("has a fraction", |(f, _)| f.fract() != 0.0)
        .prop_map(|(f, negative)| if negative { -f } else { f })
}

proptest! {
    #[test]
    fn int32_floats_classify_as_integer(n in any::<i32>()) {
        prop_assert_eq!(Value::classify_number(f64::from(n)), Value::Integer(n));
    }

    #[test]
    fn exact_wide_floats_classify_as_long(n in long_outside_int32()) {
        prop_assert_eq!(Value::classify_number(n as f64), Value::Long(n));
    }

    #[test]
    fn fractional_floats_stay_bit_identical(f in fractional()) {
        match Value::classify_number(f) {
            Value::Number(out) => prop_assert_eq!(out.to_bits(), f.to_bits()),
            other => prop_assert!(false, "expected Number, got {:?}", other),
        }
    }

    #[test]
    fn integer_text_round_trips(n in any::<i32>()) {
        let text = Value::Integer(n).to_string();
        prop_assert_eq!(parse_numeric_literal(&text), NumericLiteral::Integer(n));
    }

    #[test]
    fn long_text_round_trips(n in any::<i64>().prop_filter("outside int32", |n| i32::try_from(*n).is_err())) {
        let text = Value::Long(n).to_string();
        prop_assert_eq!(parse_numeric_literal(&text), NumericLiteral::Long(n));
    }

    #[test]
    fn number_text_round_trips_to_sixteen_digits(f in fixed_notation()) {
        let text = format_number(f);
        // Sixteen digits may round a tiny fraction away, leaving integer text
        let back = match parse_numeric_literal(&text) {
            NumericLiteral::Number(v) => v,
            NumericLiteral::Integer(v) => f64::from(v),
            NumericLiteral::Long(v) => v as f64,
        };
        let tolerance = f.abs() * 1e-15;
        prop_assert!((back - f).abs() <= tolerance, "{} -> {} -> {}", f, text, back);
    }

    #[test]
    fn number_text_round_trips_at_any_magnitude(f in any::<f64>().prop_filter("finite", |f| f.abs() < MAX_SIXTEEN_DIGITS)) {
        let text = format_number(f);
        let back = match parse_numeric_literal(&text) {
            NumericLiteral::Number(v) => v,
            NumericLiteral::Integer(v) => f64::from(v),
            NumericLiteral::Long(v) => v as f64,
        };
        // Sixteen digits stay within 5e-16 relative; the nearest float is no farther
        let tolerance = f.abs() * 1e-15;
        prop_assert!((back - f).abs() <= tolerance, "{:e} -> {} -> {:e}", f, text, back);
    }
}
