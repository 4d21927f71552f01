//! Lenient numeric literal parsing.
//!
//! The parser never fails: it consumes the longest prefix that looks like
//! `-?digits(.digits)?([eE][+-]?digits)?` and classifies what it read.

use crate::value::TaggedValue;

/// Exponent accumulation saturates here; anything larger is already
/// infinite or zero in `f64`.
const MAX_EXPONENT: i32 = 100_000;

/// A classified numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericLiteral {
    /// Integer in 32-bit range
    Integer(i32),
    /// Integer outside 32-bit range
    Long(i64),
    /// Value with a fraction, an exponent, or beyond `i64`
    Number(f64),
}

impl<H> From<NumericLiteral> for TaggedValue<H> {
    fn from(n: NumericLiteral) -> Self {
        match n {
            NumericLiteral::Integer(v) => TaggedValue::Integer(v),
            NumericLiteral::Long(v) => TaggedValue::Long(v),
            NumericLiteral::Number(v) => TaggedValue::Number(v),
        }
    }
}

struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn digit(&mut self) -> Option<u8> {
        match self.peek() {
            Some(c @ b'0'..=b'9') => {
                self.pos += 1;
                Some(c - b'0')
            }
            _ => None,
        }
    }
}

/// Parse a numeric literal from `text`.
pub fn parse_numeric_literal(text: &str) -> NumericLiteral {
    parse_numeric_bytes(text.as_bytes(), Some(text.len()))
}

/// Parse a numeric literal from a raw buffer.
///
/// With `len`, at most `len` bytes are read; without it the buffer is read
/// up to the first NUL. Bytes past that boundary are never examined.
pub fn parse_numeric_bytes(buf: &[u8], len: Option<usize>) -> NumericLiteral {
    let end = match len {
        Some(len) => len.min(buf.len()),
        None => buf.iter().position(|&b| b == 0).unwrap_or(buf.len()),
    };
    let mut cur = Cursor {
        buf: &buf[..end],
        pos: 0,
    };

    let negative = cur.eat(b'-');

    let int_start = cur.pos;
    let mut int_exact: Option<u64> = Some(0);
    while let Some(d) = cur.digit() {
        int_exact = int_exact
            .and_then(|acc| acc.checked_mul(10))
            .and_then(|acc| acc.checked_add(u64::from(d)));
    }
    let int_digits = &cur.buf[int_start..cur.pos];

    let mut frac_digits: &[u8] = &[];
    if cur.eat(b'.') {
        let frac_start = cur.pos;
        while cur.digit().is_some() {}
        frac_digits = &cur.buf[frac_start..cur.pos];
    }

    let mut exp = 0_i32;
    if cur.eat(b'e') || cur.eat(b'E') {
        let exp_negative = if cur.eat(b'+') { false } else { cur.eat(b'-') };
        while let Some(d) = cur.digit() {
            exp = (exp * 10 + i32::from(d)).min(MAX_EXPONENT);
        }
        if exp_negative {
            exp = -exp;
        }
    }

    if frac_digits.is_empty() && exp == 0 {
        let signed = int_exact.map(|acc| if negative { -i128::from(acc) } else { i128::from(acc) });
        if let Some(n) = signed {
            if let Ok(small) = i32::try_from(n) {
                return NumericLiteral::Integer(small);
            }
            if let Ok(wide) = i64::try_from(n) {
                return NumericLiteral::Long(wide);
            }
        }
    }

    NumericLiteral::Number(decimal_value(negative, int_digits, frac_digits, exp))
}

/// Correctly rounded value of `-?int.frac e exp`.
///
/// The pieces are re-assembled into a canonical literal for the standard
/// float parser, so subnormals and huge exponents round like any other
/// value instead of overflowing an intermediate power of ten.
fn decimal_value(negative: bool, int_digits: &[u8], frac_digits: &[u8], exp: i32) -> f64 {
    let mut literal = String::with_capacity(int_digits.len() + frac_digits.len() + 10);
    if negative {
        literal.push('-');
    }
    literal.push('0');
    literal.extend(int_digits.iter().map(|&b| char::from(b)));
    literal.push('.');
    literal.extend(frac_digits.iter().map(|&b| char::from(b)));
    literal.push('e');
    literal.push_str(&exp.to_string());
    literal.parse().unwrap_or(f64::NAN)
}

impl<H> TaggedValue<H> {
    /// Parse `text` leniently into `Integer`, `Long` or `Number`.
    pub fn parse_number(text: &str) -> Self {
        parse_numeric_literal(text).into()
    }

    /// [`TaggedValue::parse_number`] over a raw buffer with optional length.
    pub fn parse_number_bytes(buf: &[u8], len: Option<usize>) -> Self {
        parse_numeric_bytes(buf, len).into()
    }
}
