//! Validation utilities for incoming entries

use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;

use crate::types::scan_quantity;

/// Field-level validation failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Invalid quantity value")]
    InvalidQuantity,

    #[error("Quantity out of range")]
    QuantityOutOfRange,
}

/// A field counts as missing when it is absent, null, an empty string,
/// numeric zero, or `false`.
pub fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    }
}

/// Return the first of `fields` (in order) that is missing from `body`
pub fn first_missing_field(body: &Value, fields: &[&'static str]) -> Option<&'static str> {
    fields.iter().copied().find(|field| is_missing(body.get(*field)))
}

/// Text of a present scalar field. Numbers and booleans are rendered as text.
pub fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerce a present quantity field (number or numeric text) to a decimal
pub fn coerce_quantity(value: &Value) -> Result<Decimal, FieldError> {
    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => return Err(FieldError::InvalidQuantity),
    };
    scan_quantity(&raw)
        .map_err(|_| FieldError::QuantityOutOfRange)?
        .ok_or(FieldError::InvalidQuantity)
}
