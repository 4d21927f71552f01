//! Calendar arithmetic, truncation and timezone shifts

use date_value::{DatePart, DateValue, FixedZone, HostClock};
use pretty_assertions::assert_eq;

struct StoppedClock(f64);

impl HostClock for StoppedClock {
    fn current_time_millis(&self) -> f64 {
        self.0
    }
}

#[test]
fn test_february_28_plus_one_day_is_march_first() {
    let mut d = DateValue::utc(2021, 1, 28, 0, 0, 0, 0);
    d.add(1, DatePart::Day);
    let f = d.fields().unwrap();
    assert_eq!((f.year, f.month, f.day), (2021, 2, 1));
}

#[test]
fn test_leap_february_28_plus_one_day() {
    let mut d = DateValue::utc(2024, 1, 28, 0, 0, 0, 0);
    d.add(1, DatePart::Day);
    let f = d.fields().unwrap();
    assert_eq!((f.month, f.day), (1, 29));
}

#[test]
fn test_month_end_sequence() {
    // Each step clamps independently from the running value
    let mut d = DateValue::utc(2021, 0, 31, 0, 0, 0, 0);
    let mut days = Vec::new();
    for _ in 0..4 {
        d.add(1, DatePart::Month);
        days.push(d.fields().unwrap().day);
    }
    assert_eq!(days, vec![28, 28, 28, 28]);
}

#[test]
fn test_add_months_across_year() {
    let mut d = DateValue::utc(2021, 10, 30, 6, 0, 0, 0);
    d.add(3, DatePart::Month);
    assert_eq!(d, DateValue::utc(2022, 1, 28, 6, 0, 0, 0));
}

#[test]
fn test_add_negative_days() {
    let mut d = DateValue::utc(2021, 2, 1, 0, 0, 0, 0);
    d.add(-1, DatePart::Day);
    assert_eq!(d, DateValue::utc(2021, 1, 28, 0, 0, 0, 0));
}

#[test]
fn test_fix_then_add_buckets() {
    let mut d = DateValue::utc(2021, 5, 15, 23, 59, 59, 999);
    d.fix(DatePart::Hour);
    d.add(1, DatePart::Hour);
    assert_eq!(d, DateValue::utc(2021, 5, 16, 0, 0, 0, 0));
}

#[test]
fn test_local_day_bucket() {
    // 2021-01-01T20:00Z is already Jan 2 in UTC+8
    let zone = FixedZone::east(480);
    let mut d = DateValue::utc(2021, 0, 1, 20, 0, 0, 0);
    d.to_local_in(&zone);
    d.fix(DatePart::Day);
    d.to_utc_in(&zone);
    assert_eq!(d, DateValue::utc(2021, 0, 1, 16, 0, 0, 0));
}

#[test]
fn test_western_zone_shift() {
    let zone = FixedZone::east(-300);
    let mut d = DateValue::utc(2021, 0, 1, 3, 0, 0, 0);
    d.to_local_in(&zone);
    let f = d.fields().unwrap();
    assert_eq!((f.day, f.hour), (31, 22));
}

#[test]
fn test_now_from_stopped_clock() {
    let mut d = DateValue::empty();
    d.now_from(&StoppedClock(86_400_000.0));
    assert_eq!(d.sql_string(), "1970-01-02 00:00:00");
}

#[test]
fn test_now_from_broken_clock_is_empty() {
    let mut d = DateValue::from_millis(0.0);
    d.now_from(&StoppedClock(f64::NAN));
    assert!(d.is_empty());
}

#[test]
fn test_empty_degenerate_results() {
    let mut d = DateValue::empty();
    d.add(5, DatePart::Year);
    d.fix(DatePart::Month);
    d.to_local_in(&FixedZone::east(60));
    assert!(d.is_empty());
    assert_eq!(d.fields(), None);
    assert_eq!(d.diff(&DateValue::utc(2021, 0, 1, 0, 0, 0, 0)), None);
    assert_eq!(d.to_gmt_string(), "");
}
