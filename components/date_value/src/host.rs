//! Host collaborators: the wall clock and the timezone offset source.
//!
//! Both are passed as values so tests and embedders can pin them; the
//! `System*`/`Local*` implementations read the real host.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Source of the current wall-clock time.
pub trait HostClock {
    /// Milliseconds since the Unix epoch.
    fn current_time_millis(&self) -> f64;
}

/// The host's real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl HostClock for SystemClock {
    fn current_time_millis(&self) -> f64 {
        Utc::now().timestamp_millis() as f64
    }
}

/// Signed offset of a timezone from UTC, in milliseconds.
///
/// The offset may depend on the instant (daylight saving), so the
/// instant being converted is passed in.
pub trait TimeZoneSource {
    /// Offset (local minus UTC) in effect at `instant_ms`.
    fn offset_millis(&self, instant_ms: f64) -> f64;
}

/// The host's configured timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalZone;

impl TimeZoneSource for LocalZone {
    fn offset_millis(&self, instant_ms: f64) -> f64 {
        if !instant_ms.is_finite() {
            return 0.0;
        }
        match DateTime::from_timestamp_millis(instant_ms as i64) {
            Some(utc) => {
                let offset = Local.offset_from_utc_datetime(&utc.naive_utc());
                f64::from(offset.local_minus_utc()) * 1000.0
            }
            None => 0.0,
        }
    }
}

/// A constant offset, in minutes east of UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedZone {
    minutes: i32,
}

impl FixedZone {
    /// Zone `minutes` east of UTC (negative for west).
    pub const fn east(minutes: i32) -> Self {
        FixedZone { minutes }
    }

    /// UTC itself.
    pub const fn utc() -> Self {
        FixedZone { minutes: 0 }
    }

    /// Offset in minutes east of UTC.
    pub const fn minutes(&self) -> i32 {
        self.minutes
    }
}

impl TimeZoneSource for FixedZone {
    fn offset_millis(&self, _instant_ms: f64) -> f64 {
        f64::from(self.minutes) * 60_000.0
    }
}
