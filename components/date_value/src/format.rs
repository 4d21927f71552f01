//! Fixed UTC text layouts.
//!
//! Every formatter is a pure function of the instant. An empty value, or one
//! outside the calendar range, renders as the empty string.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::date::DateValue;

pub(crate) const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub(crate) const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_sunday() as usize]
}

/// At least four year digits, with the sign in front of the padding.
fn year(dt: &NaiveDateTime) -> String {
    let y = dt.year();
    if y < 0 {
        format!("-{:04}", y.unsigned_abs())
    } else {
        format!("{y:04}")
    }
}

fn millisecond(dt: &NaiveDateTime) -> u32 {
    dt.nanosecond() / 1_000_000
}

impl DateValue {
    /// HTTP date, e.g. `Tue, 15 Nov 1994 08:12:31 GMT`.
    pub fn to_gmt_string(&self) -> String {
        self.render(|dt| {
            format!(
                "{}, {:02} {} {} {:02}:{:02}:{:02} GMT",
                weekday_name(dt.weekday()),
                dt.day(),
                MONTH_NAMES[dt.month0() as usize],
                year(dt),
                dt.hour(),
                dt.minute(),
                dt.second()
            )
        })
    }

    /// Certificate validity layout `YYYYMMDDhhmmss`.
    pub fn to_x509_string(&self) -> String {
        self.render(|dt| {
            format!(
                "{}{:02}{:02}{:02}{:02}{:02}",
                year(dt),
                dt.month(),
                dt.day(),
                dt.hour(),
                dt.minute(),
                dt.second()
            )
        })
    }

    /// SQL literal body `YYYY-MM-DD hh:mm:ss` (no quotes).
    pub fn sql_string(&self) -> String {
        self.render(|dt| {
            format!(
                "{}-{:02}-{:02} {:02}:{:02}:{:02}",
                year(dt),
                dt.month(),
                dt.day(),
                dt.hour(),
                dt.minute(),
                dt.second()
            )
        })
    }

    /// Compact timestamp `YYYYMMDDhhmmssSSS`.
    pub fn stamp(&self) -> String {
        self.render(|dt| {
            format!(
                "{}{:02}{:02}{:02}{:02}{:02}{:03}",
                year(dt),
                dt.month(),
                dt.day(),
                dt.hour(),
                dt.minute(),
                dt.second(),
                millisecond(dt)
            )
        })
    }

    fn render(&self, layout: impl FnOnce(&NaiveDateTime) -> String) -> String {
        self.naive().map(|dt| layout(&dt)).unwrap_or_default()
    }
}
