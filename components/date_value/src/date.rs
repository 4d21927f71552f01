//! The instant type and its calendar arithmetic.
//!
//! A `DateValue` is a single `f64` of milliseconds since the Unix epoch.
//! NaN marks the empty value. Calendar fields are always derived from the
//! stored instant on demand and are interpreted in UTC; use
//! [`DateValue::to_local`] / [`DateValue::to_utc`] to shift between wall
//! clocks.

use std::fmt;

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::host::{HostClock, LocalZone, SystemClock, TimeZoneSource};

pub(crate) const MS_PER_SECOND: f64 = 1_000.0;
pub(crate) const MS_PER_MINUTE: f64 = 60_000.0;
pub(crate) const MS_PER_HOUR: f64 = 3_600_000.0;
pub(crate) const MS_PER_DAY: f64 = 86_400_000.0;

/// Calendar field selector for [`DateValue::add`] and [`DateValue::fix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DatePart {
    /// Calendar year
    Year,
    /// Calendar month
    Month,
    /// Day of month
    Day,
    /// Hour of day
    Hour,
    /// Minute of hour
    Minute,
    /// Second of minute
    #[default]
    Second,
}

/// Calendar decomposition of an instant (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFields {
    /// Full year, e.g. 2024
    pub year: i32,
    /// Month, 0-indexed (0 = January)
    pub month: u32,
    /// Day of month (1-31)
    pub day: u32,
    /// Hours (0-23)
    pub hour: u32,
    /// Minutes (0-59)
    pub minute: u32,
    /// Seconds (0-59)
    pub second: u32,
    /// Milliseconds (0-999)
    pub millisecond: u32,
    /// Day of week (0 = Sunday)
    pub weekday: u32,
}

/// An instant in epoch milliseconds, or empty.
///
/// # Examples
///
/// ```
/// use date_value::{DatePart, DateValue};
///
/// let mut d = DateValue::utc(2021, 1, 28, 0, 0, 0, 0);
/// d.add(1, DatePart::Day);
/// assert_eq!(d, DateValue::utc(2021, 2, 1, 0, 0, 0, 0));
/// ```
#[derive(Clone, Copy)]
pub struct DateValue {
    ms: f64,
}

impl DateValue {
    /// The empty value.
    pub const fn empty() -> Self {
        DateValue { ms: f64::NAN }
    }

    /// Wrap an instant. Non-finite input yields the empty value.
    pub fn from_millis(ms: f64) -> Self {
        if ms.is_finite() {
            DateValue { ms }
        } else {
            DateValue::empty()
        }
    }

    /// Build an instant from UTC calendar fields (see [`DateValue::create`]).
    #[allow(clippy::too_many_arguments)]
    pub fn utc(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
    ) -> Self {
        let mut date = DateValue::empty();
        date.create(year, month, day, hour, minute, second, millisecond);
        date
    }

    /// The current instant according to the host clock.
    pub fn current() -> Self {
        let mut date = DateValue::empty();
        date.now();
        date
    }

    /// Raw milliseconds; NaN when empty.
    pub fn millis(&self) -> f64 {
        self.ms
    }

    /// Whether this holds no instant.
    pub fn is_empty(&self) -> bool {
        self.ms.is_nan()
    }

    /// Reset to the empty value.
    pub fn clear(&mut self) {
        self.ms = f64::NAN;
    }

    /// Set from the host wall clock.
    pub fn now(&mut self) {
        self.now_from(&SystemClock);
    }

    /// Set from the given clock.
    pub fn now_from(&mut self, clock: &impl HostClock) {
        *self = DateValue::from_millis(clock.current_time_millis());
    }

    /// Set from UTC calendar fields.
    ///
    /// `month` is 0-indexed. Out-of-range fields carry into the next larger
    /// unit: month 12 is January of the following year, day 0 is the last
    /// day of the previous month, hour 24 is midnight of the next day.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &mut self,
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
    ) {
        self.ms = compose(year, month, day, hour, minute, second, millisecond).unwrap_or(f64::NAN);
    }

    /// `self - other` in milliseconds; `None` if either side is empty.
    pub fn diff(&self, other: &DateValue) -> Option<f64> {
        if self.is_empty() || other.is_empty() {
            None
        } else {
            Some(self.ms - other.ms)
        }
    }

    /// Add `num` units of `part`.
    ///
    /// Years and months move the calendar date and clamp the day to the end
    /// of the target month (Jan 31 + 1 month = Feb 28/29). Smaller parts are
    /// plain millisecond arithmetic. No-op on an empty value.
    pub fn add(&mut self, num: i32, part: DatePart) {
        if self.is_empty() {
            return;
        }
        match part {
            DatePart::Year => self.add_months(i64::from(num) * 12),
            DatePart::Month => self.add_months(i64::from(num)),
            DatePart::Day => self.ms += f64::from(num) * MS_PER_DAY,
            DatePart::Hour => self.ms += f64::from(num) * MS_PER_HOUR,
            DatePart::Minute => self.ms += f64::from(num) * MS_PER_MINUTE,
            DatePart::Second => self.ms += f64::from(num) * MS_PER_SECOND,
        }
    }

    /// Add `num` seconds.
    pub fn add_seconds(&mut self, num: i32) {
        self.add(num, DatePart::default());
    }

    fn add_months(&mut self, months: i64) {
        let Some(start) = self.naive() else {
            self.clear();
            return;
        };
        let fraction = self.ms - self.ms.floor();
        let shifted = u32::try_from(months.unsigned_abs())
            .ok()
            .and_then(|n| {
                if months >= 0 {
                    start.checked_add_months(Months::new(n))
                } else {
                    start.checked_sub_months(Months::new(n))
                }
            });
        match shifted {
            Some(dt) => self.ms = Utc.from_utc_datetime(&dt).timestamp_millis() as f64 + fraction,
            None => self.clear(),
        }
    }

    /// Truncate every field finer than `part` to its start.
    ///
    /// `fix(DatePart::Day)` yields midnight (UTC) of the same day. No-op on an
    /// empty value.
    pub fn fix(&mut self, part: DatePart) {
        if self.is_empty() {
            return;
        }
        match part {
            DatePart::Year | DatePart::Month => {
                let Some(dt) = self.naive() else {
                    self.clear();
                    return;
                };
                let month = if part == DatePart::Year { 1 } else { dt.month() };
                self.ms = NaiveDate::from_ymd_opt(dt.year(), month, 1)
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|d| Utc.from_utc_datetime(&d).timestamp_millis() as f64)
                    .unwrap_or(f64::NAN);
            }
            DatePart::Day => self.truncate_to(MS_PER_DAY),
            DatePart::Hour => self.truncate_to(MS_PER_HOUR),
            DatePart::Minute => self.truncate_to(MS_PER_MINUTE),
            DatePart::Second => self.truncate_to(MS_PER_SECOND),
        }
    }

    fn truncate_to(&mut self, unit: f64) {
        self.ms -= self.ms.rem_euclid(unit);
    }

    /// Shift from UTC to the host's local wall clock.
    pub fn to_local(&mut self) {
        self.to_local_in(&LocalZone);
    }

    /// Shift from the host's local wall clock back to UTC.
    pub fn to_utc(&mut self) {
        self.to_utc_in(&LocalZone);
    }

    /// Shift from UTC to the wall clock of `zone`.
    pub fn to_local_in(&mut self, zone: &impl TimeZoneSource) {
        if self.is_empty() {
            return;
        }
        self.ms += zone.offset_millis(self.ms);
    }

    /// Shift from the wall clock of `zone` back to UTC.
    pub fn to_utc_in(&mut self, zone: &impl TimeZoneSource) {
        if self.is_empty() {
            return;
        }
        // Offsets are looked up by UTC instant, so re-query at the estimate.
        let estimate = self.ms - zone.offset_millis(self.ms);
        self.ms -= zone.offset_millis(estimate);
    }

    /// UTC calendar fields; `None` when empty or outside the calendar range.
    pub fn fields(&self) -> Option<DateFields> {
        let dt = self.naive()?;
        Some(DateFields {
            year: dt.year(),
            month: dt.month0(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            millisecond: dt.nanosecond() / 1_000_000,
            weekday: dt.weekday().num_days_from_sunday(),
        })
    }

    pub(crate) fn naive(&self) -> Option<NaiveDateTime> {
        if !self.ms.is_finite() {
            return None;
        }
        DateTime::from_timestamp_millis(self.ms.floor() as i64).map(|dt| dt.naive_utc())
    }
}

#[allow(clippy::too_many_arguments)]
fn compose(
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
    second: i32,
    millisecond: i32,
) -> Option<f64> {
    let year = year.checked_add(month.div_euclid(12))?;
    let month = month.rem_euclid(12) as u32 + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
    let base = Utc.from_utc_datetime(&first).timestamp_millis() as f64;
    Some(
        base + (f64::from(day) - 1.0) * MS_PER_DAY
            + f64::from(hour) * MS_PER_HOUR
            + f64::from(minute) * MS_PER_MINUTE
            + f64::from(second) * MS_PER_SECOND
            + f64::from(millisecond),
    )
}

impl Default for DateValue {
    fn default() -> Self {
        DateValue::empty()
    }
}

impl PartialEq for DateValue {
    fn eq(&self, other: &Self) -> bool {
        (self.is_empty() && other.is_empty()) || self.ms == other.ms
    }
}

impl fmt::Debug for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "DateValue(empty)")
        } else {
            f.debug_tuple("DateValue").field(&self.ms).finish()
        }
    }
}

impl From<f64> for DateValue {
    fn from(ms: f64) -> Self {
        DateValue::from_millis(ms)
    }
}
