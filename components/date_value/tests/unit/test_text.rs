//! Formatting and parsing of the fixed text layouts

use date_value::{DateParseError, DateValue};
use pretty_assertions::assert_eq;

fn sample() -> DateValue {
    DateValue::utc(2009, 1, 13, 23, 31, 30, 250)
}

#[test]
fn test_all_layouts() {
    let d = sample();
    assert_eq!(d.to_gmt_string(), "Fri, 13 Feb 2009 23:31:30 GMT");
    assert_eq!(d.to_x509_string(), "20090213233130");
    assert_eq!(d.sql_string(), "2009-02-13 23:31:30");
    assert_eq!(d.stamp(), "20090213233130250");
}

#[test]
fn test_second_layouts_round_trip_to_the_second() {
    let mut whole = sample();
    whole.fix(date_value::DatePart::Second);
    for text in [sample().to_gmt_string(), sample().to_x509_string(), sample().sql_string()] {
        let back: DateValue = text.parse().unwrap();
        assert_eq!(back, whole, "{text}");
    }
}

#[test]
fn test_stamp_round_trips_milliseconds() {
    let back: DateValue = sample().stamp().parse().unwrap();
    assert_eq!(back, sample());
}

#[test]
fn test_lenient_parse_on_garbage() {
    let mut d = sample();
    d.parse("2009-02-13 23:61:00");
    assert!(d.is_empty());
}

#[test]
fn test_strict_parse_reports_field() {
    assert_eq!(
        DateValue::try_parse("2009-02-13 23:61:00"),
        Err(DateParseError::FieldOutOfRange { field: "minute", value: 61 })
    );
}

#[test]
fn test_parse_bytes_with_explicit_length() {
    let mut d = DateValue::empty();
    d.parse_bytes(b"20090213233130250", Some(14));
    assert_eq!(d, DateValue::utc(2009, 1, 13, 23, 31, 30, 0));
}
