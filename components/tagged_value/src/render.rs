//! Textual rendering of tagged values.

use std::fmt;

use crate::value::TaggedValue;

/// Significant digits used when rendering a `Number`.
const NUMBER_PRECISION: usize = 16;

/// Render `n` like C's `%.16g`.
///
/// Non-finite values render as `NaN`, `Infinity` and `-Infinity`.
///
/// # Examples
///
/// ```
/// use tagged_value::format_number;
///
/// assert_eq!(format_number(0.1), "0.1");
/// assert_eq!(format_number(1.0 / 3.0), "0.3333333333333333");
/// assert_eq!(format_number(1e20), "1e+20");
/// ```
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return if n.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // The exponent after rounding to the target precision picks the style
    let scientific = format!("{:.*e}", NUMBER_PRECISION - 1, n);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= NUMBER_PRECISION as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (NUMBER_PRECISION as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{n:.decimals$}")).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

impl<H> TaggedValue<H> {
    /// Render as text, with a flag telling real content from placeholders.
    ///
    /// The flag is false for `Undefined`, null-like kinds, objects and
    /// handles; those have no canonical text of their own.
    pub fn render(&self) -> (String, bool) {
        match self {
            TaggedValue::Undefined => ("undefined".to_string(), false),
            TaggedValue::Null | TaggedValue::Type | TaggedValue::PersistentMarker => {
                ("null".to_string(), false)
            }
            TaggedValue::Boolean(b) => (b.to_string(), true),
            TaggedValue::Integer(n) => (n.to_string(), true),
            TaggedValue::Long(n) => (n.to_string(), true),
            TaggedValue::Number(n) => (format_number(*n), true),
            TaggedValue::Date(d) => (d.to_gmt_string(), true),
            TaggedValue::String(s) => (s.clone(), true),
            TaggedValue::Object(_)
            | TaggedValue::TransientHandle(_)
            | TaggedValue::PersistentHandle(_) => (String::new(), false),
        }
    }

    /// Whether [`TaggedValue::render`] yields real content.
    pub fn has_content(&self) -> bool {
        self.render().1
    }
}

/// Writes the text half of [`TaggedValue::render`].
///
/// # Examples
///
/// ```
/// use tagged_value::TaggedValue;
///
/// assert_eq!(TaggedValue::<()>::Undefined.to_string(), "undefined");
/// assert_eq!(TaggedValue::<()>::Type.to_string(), "null");
/// assert_eq!(TaggedValue::<()>::Long(9_999_999_999).to_string(), "9999999999");
/// ```
impl<H> fmt::Display for TaggedValue<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaggedValue::String(s) => f.write_str(s),
            other => f.write_str(&other.render().0),
        }
    }
}
