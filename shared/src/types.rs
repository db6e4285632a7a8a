//! Common types used across the platform
//!
//! Quantities arrive as free text (spreadsheet cells, form inputs) and
//! timestamps are stored as naive local strings, so both need lenient
//! parsing helpers that every crate agrees on.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Storage format for entry timestamps (`YYYY-MM-DD HH:MM:SS`, no offset)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a timestamp the way it is written to the record store
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp.
///
/// Accepts the storage format, ISO-8601 with or without offset, and bare
/// dates (taken as midnight). Anything else is `None`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// A quantity, or a sum of quantities, outside the range `Decimal` can hold
/// (about ±7.9e28)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("quantity exceeds the supported range")]
pub struct QuantityOverflow;

/// Parse the leading numeric part of `raw`, like JavaScript's `parseFloat`.
///
/// `"12.5 kg"` gives 12.5, `".5"` gives 0.5, `"1e3"` gives 1000.
/// Returns `None` when there is no numeric prefix, or when the number does
/// not fit; use [`scan_quantity`] to tell the two apart.
pub fn parse_quantity(raw: &str) -> Option<Decimal> {
    scan_quantity(raw).ok().flatten()
}

/// Like [`parse_quantity`], but a numeric prefix that is out of range is an
/// error rather than `None`
pub fn scan_quantity(raw: &str) -> Result<Option<Decimal>, QuantityOverflow> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_part = &s[int_start..pos];

    let mut frac_part = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_part = &s[frac_start..end];
        pos = end;
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return Ok(None);
    }

    // Exponent only counts when at least one digit follows it
    let mut exponent = "";
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut end = pos + 1;
        if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > digits_start {
            exponent = &s[pos + 1..end];
        }
    }

    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let mantissa = if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, frac_part)
    };

    let value = if exponent.is_empty() {
        Decimal::from_str(&mantissa)
    } else {
        Decimal::from_scientific(&format!("{}e{}", mantissa, exponent))
    }
    .map_err(|_| QuantityOverflow)?;

    Ok(Some(if negative { -value } else { value }))
}

/// Quantity read back from storage: unparsable or missing is zero
pub fn quantity_or_zero(raw: &str) -> Decimal {
    parse_quantity(raw).unwrap_or(Decimal::ZERO)
}

/// Render a quantity for a spreadsheet cell (`10` rather than `10.00`)
pub fn quantity_cell(quantity: Decimal) -> String {
    quantity.normalize().to_string()
}

/// Serde adapter: serialize as a JSON number, deserialize from a number,
/// numeric string, or null (null and non-numeric text become zero). A number
/// too large to hold is a deserialization error, never a silent zero.
pub mod lenient_quantity {
    use super::*;
    use serde::de::Error as _;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let scanned = match value {
            serde_json::Value::Number(n) => scan_quantity(&n.to_string()),
            serde_json::Value::String(s) => scan_quantity(&s),
            _ => Ok(None),
        };
        scanned
            .map(|q| q.unwrap_or(Decimal::ZERO))
            .map_err(D::Error::custom)
    }
}
