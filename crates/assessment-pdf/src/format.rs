//! Value formatting for dates and currency amounts
//!
//! Formatting never fails: input that does not look like a date or a number
//! is written as received.

use crate::fields::FieldFormat;
use crate::ordering::OrderedPair;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// A label with its display-ready value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedPair {
    pub label: String,
    pub value: String,
}

impl FieldFormat {
    /// Apply this format to a raw value
    pub fn apply(&self, raw: &str) -> String {
        match self {
            FieldFormat::Date => format_date(raw),
            FieldFormat::Currency => format_currency(raw),
            FieldFormat::PlainText => raw.to_string(),
        }
    }
}

pub fn format_pair(pair: &OrderedPair) -> FormattedPair {
    FormattedPair {
        label: pair.label.clone(),
        value: pair.format.apply(&pair.value),
    }
}

pub fn format_pairs(pairs: &[OrderedPair]) -> Vec<FormattedPair> {
    pairs.iter().map(format_pair).collect()
}

/// Render an ISO-style date as `DD/MM/YYYY`.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY-MM-DDTHH:MM[:SS]` and RFC 3339
/// timestamps (the date is taken in the timestamp's own offset).
pub fn format_date(raw: &str) -> String {
    match parse_date(raw.trim()) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => raw.to_string(),
    }
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    if input.is_empty() {
        return None;
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.naive_local().date());
    }
    for pattern in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(input, pattern) {
            return Some(date);
        }
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(input, pattern) {
            return Some(datetime.date());
        }
    }
    None
}

/// Group the integer part of a numeric string in thousands.
///
/// Existing commas are ignored, a leading `-` is kept, and a fractional part
/// is kept exactly as written.
pub fn format_currency(raw: &str) -> String {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();

    let (sign, unsigned) = match cleaned.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", cleaned.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(integer) || fraction.is_some_and(|f| !is_digits(f)) {
        return raw.to_string();
    }

    let integer = integer.trim_start_matches('0');
    let integer = if integer.is_empty() { "0" } else { integer };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 + 2);
    grouped.push_str(sign);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
