//! Calendar instants for values crossing the script boundary.
//!
//! This crate provides [`DateValue`], an instant stored as epoch
//! milliseconds with an explicit empty state, together with:
//!
//! - [`DatePart`] - field selector for calendar arithmetic and truncation
//! - [`DateFields`] - UTC calendar decomposition
//! - [`HostClock`] / [`TimeZoneSource`] - host collaborators, passed as values
//! - [`DateParseError`] - reasons strict parsing rejects text
//!
//! # Examples
//!
//! ```
//! use date_value::{DatePart, DateValue};
//!
//! let mut d = DateValue::utc(2021, 0, 31, 12, 0, 0, 0);
//! d.add(1, DatePart::Month);
//! assert_eq!(d.sql_string(), "2021-02-28 12:00:00");
//!
//! d.fix(DatePart::Day);
//! assert_eq!(d.to_gmt_string(), "Sun, 28 Feb 2021 00:00:00 GMT");
//!
//! let back: DateValue = d.to_gmt_string().parse().unwrap();
//! assert_eq!(back, d);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod date;
mod error;
mod format;
mod host;
mod parse;

pub use date::{DateFields, DatePart, DateValue};
pub use error::DateParseError;
pub use host::{FixedZone, HostClock, LocalZone, SystemClock, TimeZoneSource};
