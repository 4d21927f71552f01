//! Errors reported by strict date parsing.

use thiserror::Error;

/// Why a piece of text could not be read as a date.
///
/// Only [`DateValue::try_parse`](crate::DateValue::try_parse) surfaces these;
/// the lenient [`DateValue::parse`](crate::DateValue::parse) degrades to the
/// empty value instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    /// Input was blank
    #[error("empty date text")]
    Empty,
    /// A word or symbol that is not part of any recognized layout
    #[error("unexpected token `{0}` in date text")]
    UnexpectedToken(String),
    /// A required calendar field was not present
    #[error("date text is missing the {0}")]
    MissingField(&'static str),
    /// A field was present but outside its valid range
    #[error("{field} {value} is out of range")]
    FieldOutOfRange {
        /// Field name
        field: &'static str,
        /// Value as written
        value: i64,
    },
    /// Fields are valid but the instant is outside the calendar range
    #[error("date is outside the representable range")]
    Unrepresentable,
}
