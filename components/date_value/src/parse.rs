//! Lenient date text parser.
//!
//! Reads every layout the formatters produce plus the usual machine
//! formats (ISO 8601, slash dates, month-name dates, HTTP dates with zone
//! words and numeric offsets). Text without a zone is taken as UTC.

use std::str::FromStr;

use chrono::{NaiveDate, TimeZone, Utc};

use crate::date::{DateValue, MS_PER_MINUTE};
use crate::error::DateParseError;
use crate::format::{MONTH_NAMES, WEEKDAY_NAMES};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'a> {
    Number(&'a str),
    Word(&'a str),
    Symbol(char),
    /// `-` opening a field: at the start or after whitespace, before a digit
    LeadingMinus,
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = text;
    let mut after_space = true;
    while let Some(c) = rest.chars().next() {
        let starts_field = after_space;
        after_space = c.is_whitespace();
        if c.is_whitespace() {
            rest = &rest[c.len_utf8()..];
        } else if c == '-' && starts_field && rest[1..].starts_with(|ch: char| ch.is_ascii_digit()) {
            tokens.push(Token::LeadingMinus);
            rest = &rest[1..];
        } else if c.is_ascii_digit() {
            let end = rest.find(|ch: char| !ch.is_ascii_digit()).unwrap_or(rest.len());
            tokens.push(Token::Number(&rest[..end]));
            rest = &rest[end..];
        } else if c.is_ascii_alphabetic() {
            let end = rest.find(|ch: char| !ch.is_ascii_alphabetic()).unwrap_or(rest.len());
            tokens.push(Token::Word(&rest[..end]));
            rest = &rest[end..];
        } else {
            tokens.push(Token::Symbol(c));
            rest = &rest[c.len_utf8()..];
        }
    }
    tokens
}

#[derive(Debug, Clone, Copy)]
struct Field {
    value: i64,
    digits: usize,
    negative: bool,
}

impl Field {
    fn read(text: &str) -> Field {
        Field {
            value: text.parse().unwrap_or(i64::MAX),
            digits: text.len(),
            negative: false,
        }
    }

    fn year(value: i64, digits: usize, negative: bool) -> Field {
        Field {
            value: if negative { -value } else { value },
            digits,
            negative,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Clock {
    hour: i64,
    minute: i64,
    second: i64,
    millisecond: i64,
}

#[derive(Debug, Default)]
struct Scan {
    numbers: Vec<Field>,
    month: Option<i64>,
    clock: Option<Clock>,
    offset_minutes: Option<i64>,
    pm: Option<bool>,
    minus_pending: bool,
}

/// Fractional-second digits scaled to milliseconds, extra digits dropped.
fn fraction_millis(digits: &str) -> i64 {
    let head: String = digits.chars().take(3).collect();
    let scale = 10_i64.pow(3 - head.len() as u32);
    head.parse::<i64>().unwrap_or(0) * scale
}

fn slice_field(text: &str, range: std::ops::Range<usize>) -> i64 {
    text.get(range).and_then(|s| s.parse().ok()).unwrap_or(0)
}

/// Year width of an all-digit layout: `YYYYMMDD`, `YYYYMMDDhhmm`, X.509 or stamp.
fn compact_year_digits(len: usize) -> Option<usize> {
    match len {
        8 | 12 => Some(4),
        14..=16 => Some(len - 10),
        17..=19 => Some(len - 13),
        _ => None,
    }
}

fn lookup(names: &[&str], word: &str) -> Option<usize> {
    if word.len() < 3 {
        return None;
    }
    let prefix = word[..3].to_ascii_lowercase();
    names.iter().position(|name| name.to_ascii_lowercase() == prefix)
}

impl Scan {
    /// Collect fields from `tokens`. Lenient scans skip words they do not
    /// recognize instead of rejecting the text.
    fn run(tokens: &[Token<'_>], lenient: bool) -> Result<Scan, DateParseError> {
        let mut scan = Scan::default();
        let mut i = 0;
        while i < tokens.len() {
            match tokens[i] {
                Token::Number(text) => {
                    let negative = std::mem::take(&mut scan.minus_pending);
                    if tokens.get(i + 1) == Some(&Token::Symbol(':')) {
                        if negative {
                            return Err(DateParseError::UnexpectedToken("-".to_string()));
                        }
                        i = scan.read_clock(tokens, i)?;
                        continue;
                    }
                    match compact_year_digits(text.len()) {
                        Some(year_digits) if scan.is_blank() => {
                            scan.read_compact(text, year_digits, negative);
                        }
                        _ if scan.numbers.len() < 3 => {
                            let field = Field::read(text);
                            scan.numbers.push(if negative {
                                Field::year(field.value, field.digits, true)
                            } else {
                                field
                            });
                        }
                        _ => return Err(DateParseError::UnexpectedToken(text.to_string())),
                    }
                }
                Token::Word(word) => {
                    if let Err(err) = scan.read_word(word) {
                        if !lenient {
                            return Err(err);
                        }
                        tracing::trace!(word, "skipping unknown word in date text");
                    }
                }
                Token::LeadingMinus => {
                    if scan.clock.is_some() {
                        i = scan.read_offset(tokens, i, '-')?;
                        continue;
                    }
                    scan.minus_pending = true;
                }
                Token::Symbol(sign @ ('+' | '-')) => {
                    if scan.clock.is_some() {
                        if let Some(Token::Number(_)) = tokens.get(i + 1) {
                            i = scan.read_offset(tokens, i, sign)?;
                            continue;
                        }
                    }
                    if sign == '+' {
                        return Err(DateParseError::UnexpectedToken(sign.to_string()));
                    }
                }
                Token::Symbol('(') => {
                    // Trailing zone comments such as "(Coordinated Universal Time)"
                    while i < tokens.len() && tokens[i] != Token::Symbol(')') {
                        i += 1;
                    }
                }
                Token::Symbol('/' | ',' | '.') => {}
                Token::Symbol(other) => {
                    return Err(DateParseError::UnexpectedToken(other.to_string()));
                }
            }
            i += 1;
        }
        Ok(scan)
    }

    fn is_blank(&self) -> bool {
        self.numbers.is_empty() && self.clock.is_none() && self.month.is_none()
    }

    fn read_compact(&mut self, text: &str, year_digits: usize, negative: bool) {
        let y = year_digits;
        self.numbers = vec![
            Field::year(slice_field(text, 0..y), y, negative),
            Field::read(text.get(y..y + 2).unwrap_or("0")),
            Field::read(text.get(y + 2..y + 4).unwrap_or("0")),
        ];
        if text.len() > y + 4 {
            self.clock = Some(Clock {
                hour: slice_field(text, y + 4..y + 6),
                minute: slice_field(text, y + 6..y + 8),
                second: slice_field(text, y + 8..y + 10),
                millisecond: slice_field(text, y + 10..y + 13),
            });
        }
    }

    fn read_clock(&mut self, tokens: &[Token<'_>], start: usize) -> Result<usize, DateParseError> {
        if self.clock.is_some() {
            return Err(DateParseError::UnexpectedToken(":".to_string()));
        }
        let number_at = |i: usize| match tokens.get(i) {
            Some(Token::Number(text)) => Some(*text),
            _ => None,
        };
        let mut clock = Clock::default();
        let mut i = start;
        clock.hour = Field::read(number_at(i).unwrap_or("0")).value;
        i += 2;
        clock.minute = Field::read(number_at(i).ok_or(DateParseError::MissingField("minute"))?).value;
        i += 1;
        if tokens.get(i) == Some(&Token::Symbol(':')) {
            if let Some(second) = number_at(i + 1) {
                clock.second = Field::read(second).value;
                i += 2;
                if tokens.get(i) == Some(&Token::Symbol('.')) {
                    if let Some(fraction) = number_at(i + 1) {
                        clock.millisecond = fraction_millis(fraction);
                        i += 2;
                    }
                }
            }
        }
        self.clock = Some(clock);
        Ok(i)
    }

    fn read_offset(
        &mut self,
        tokens: &[Token<'_>],
        start: usize,
        sign: char,
    ) -> Result<usize, DateParseError> {
        let mut i = start + 1;
        let Some(Token::Number(text)) = tokens.get(i) else {
            return Err(DateParseError::MissingField("zone offset"));
        };
        i += 1;
        let (hours, mut minutes) = match text.len() {
            4 => (slice_field(text, 0..2), slice_field(text, 2..4)),
            1 | 2 => (Field::read(text).value, 0),
            _ => return Err(DateParseError::UnexpectedToken(text.to_string())),
        };
        if text.len() <= 2 && tokens.get(i) == Some(&Token::Symbol(':')) {
            if let Some(Token::Number(mm)) = tokens.get(i + 1) {
                minutes = Field::read(mm).value;
                i += 2;
            }
        }
        if hours > 23 {
            return Err(DateParseError::FieldOutOfRange { field: "zone hour", value: hours });
        }
        if minutes > 59 {
            return Err(DateParseError::FieldOutOfRange { field: "zone minute", value: minutes });
        }
        let total = hours * 60 + minutes;
        self.offset_minutes = Some(if sign == '-' { -total } else { total });
        Ok(i)
    }

    fn read_word(&mut self, word: &str) -> Result<(), DateParseError> {
        match word.to_ascii_lowercase().as_str() {
            "t" => {}
            "z" | "gmt" | "utc" | "ut" => {
                self.offset_minutes.get_or_insert(0);
            }
            "am" => self.pm = Some(false),
            "pm" => self.pm = Some(true),
            _ => {
                if let Some(month) = lookup(&MONTH_NAMES, word) {
                    self.month = Some(month as i64 + 1);
                } else if lookup(&WEEKDAY_NAMES, word).is_none() {
                    return Err(DateParseError::UnexpectedToken(word.to_string()));
                }
            }
        }
        Ok(())
    }

    /// Resolve (year, month, day) from the collected numbers.
    fn calendar(&self) -> Result<(i64, i64, i64), DateParseError> {
        let n = &self.numbers;
        let is_year = |f: &Field| f.negative || f.digits >= 3 || f.value > 31;
        match self.month {
            Some(month) => match n.as_slice() {
                [a, b] if is_year(a) => Ok((expand_year(*a), month, b.value)),
                [a, b] => Ok((expand_year(*b), month, a.value)),
                [a] if is_year(a) => Err(DateParseError::MissingField("day")),
                [_] => Err(DateParseError::MissingField("year")),
                [] => Err(DateParseError::MissingField("day")),
                [.., extra] => Err(DateParseError::UnexpectedToken(extra.value.to_string())),
            },
            None => match n.as_slice() {
                [y, m, d] if is_year(y) => Ok((y.value, m.value, d.value)),
                [m, d, y] => Ok((expand_year(*y), m.value, d.value)),
                [] => Err(DateParseError::MissingField("date")),
                [_] => Err(DateParseError::MissingField("month")),
                _ => Err(DateParseError::MissingField("day")),
            },
        }
    }

    fn millis(&self) -> Result<f64, DateParseError> {
        let (year, month, day) = self.calendar()?;
        let mut clock = self.clock.unwrap_or_default();
        if let Some(pm) = self.pm {
            if !(1..=12).contains(&clock.hour) {
                return Err(DateParseError::FieldOutOfRange { field: "hour", value: clock.hour });
            }
            clock.hour = match (pm, clock.hour) {
                (false, 12) => 0,
                (true, h) if h < 12 => h + 12,
                (_, h) => h,
            };
        }

        let year = i32::try_from(year)
            .map_err(|_| DateParseError::FieldOutOfRange { field: "year", value: year })?;
        check("month", month, 1, 12)?;
        check("day", day, 1, 31)?;
        check("hour", clock.hour, 0, 23)?;
        check("minute", clock.minute, 0, 59)?;
        check("second", clock.second, 0, 59)?;

        let date = NaiveDate::from_ymd_opt(year, month as u32, day as u32)
            .ok_or(DateParseError::FieldOutOfRange { field: "day", value: day })?;
        let naive = date
            .and_hms_milli_opt(
                clock.hour as u32,
                clock.minute as u32,
                clock.second as u32,
                clock.millisecond as u32,
            )
            .ok_or(DateParseError::Unrepresentable)?;
        let utc = Utc.from_utc_datetime(&naive).timestamp_millis() as f64;
        Ok(utc - self.offset_minutes.unwrap_or(0) as f64 * MS_PER_MINUTE)
    }
}

fn check(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), DateParseError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(DateParseError::FieldOutOfRange { field, value })
    }
}

/// Two-digit years: below 50 is 20xx, otherwise 19xx.
fn expand_year(field: Field) -> i64 {
    match (field.negative, field.digits, field.value) {
        (false, 1 | 2, y) if y < 50 => 2000 + y,
        (false, 1 | 2, y) => 1900 + y,
        (_, _, y) => y,
    }
}

fn read_date(text: &str, lenient: bool) -> Result<DateValue, DateParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DateParseError::Empty);
    }
    let scan = Scan::run(&tokenize(text), lenient)?;
    Ok(DateValue::from_millis(scan.millis()?))
}

impl DateValue {
    /// Read `text` as a date, reporting why it could not be read.
    ///
    /// Every word must be part of the date; see [`DateValue::parse`] for the
    /// forgiving variant.
    pub fn try_parse(text: &str) -> Result<DateValue, DateParseError> {
        read_date(text, false)
    }

    /// Set from `text`, or clear when the text is not a recognizable date.
    ///
    /// Words that name no month, weekday, zone or meridiem are skipped, so
    /// `"1994-11-15 08:12:31 local"` still reads as a date.
    pub fn parse(&mut self, text: &str) {
        *self = match read_date(text, true) {
            Ok(date) => date,
            Err(err) => {
                tracing::debug!(%err, text, "unparseable date text, clearing");
                DateValue::empty()
            }
        };
    }

    /// [`DateValue::parse`] over a raw buffer, reading at most `len` bytes.
    ///
    /// Without `len` the buffer is read up to its first NUL byte.
    pub fn parse_bytes(&mut self, buf: &[u8], len: Option<usize>) {
        let end = match len {
            Some(len) => len.min(buf.len()),
            None => buf.iter().position(|&b| b == 0).unwrap_or(buf.len()),
        };
        self.parse(&String::from_utf8_lossy(&buf[..end]));
    }
}

impl FromStr for DateValue {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateValue::try_parse(s)
    }
}
