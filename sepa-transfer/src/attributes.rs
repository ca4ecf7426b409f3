//! Raw attribute conversion
//!
//! Records are built from a JSON object of attribute name to value. These
//! helpers turn one raw value into the typed field; `null` always maps to an
//! absent value. A value of the wrong JSON type is a caller error.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;

use crate::types::{Address, Amount, Field};
use crate::{Error, Result};

/// Raw attributes keyed by attribute name
pub type Attributes = serde_json::Map<String, Value>;

fn mismatch<T>(field: Field, expected: &'static str) -> Result<T> {
    Err(Error::InvalidAttributeType { field, expected })
}

fn raw_string(field: Field, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => mismatch(field, "string"),
    }
}

/// Free text: trimmed, control characters replaced by spaces
pub(crate) fn text(field: Field, value: &Value) -> Result<Option<String>> {
    Ok(raw_string(field, value)?.map(|s| {
        s.chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect::<String>()
            .trim()
            .to_string()
    }))
}

/// Code list value: trimmed only
pub(crate) fn code(field: Field, value: &Value) -> Result<Option<String>> {
    Ok(raw_string(field, value)?.map(|s| s.trim().to_string()))
}

/// IBAN or BIC: whitespace removed, upper-cased; blank means absent
pub(crate) fn identifier(field: Field, value: &Value) -> Result<Option<String>> {
    Ok(raw_string(field, value)?
        .map(|s| {
            s.chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_ascii_uppercase()
        })
        .filter(|s| !s.is_empty()))
}

/// Amount rounded half away from zero to two places. Numbers outside the
/// range of [`Decimal`] are kept as [`Amount::Unrepresentable`].
pub(crate) fn decimal(field: Field, value: &Value) -> Result<Option<Amount>> {
    let repr = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return mismatch(field, "number or decimal string"),
    };

    match Decimal::from_str(&repr).or_else(|_| Decimal::from_scientific(&repr)) {
        Ok(amount) => Ok(Some(Amount::Exact(
            amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        ))),
        Err(_) if value.is_number() || is_numeric(&repr) => {
            Ok(Some(Amount::Unrepresentable(repr)))
        }
        Err(_) => mismatch(field, "number or decimal string"),
    }
}

/// Finite decimal literal, possibly with exponent
fn is_numeric(repr: &str) -> bool {
    repr.parse::<f64>().is_ok_and(f64::is_finite)
        && repr
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}

/// Calendar date in `YYYY-MM-DD` form
pub(crate) fn date(field: Field, value: &Value) -> Result<Option<NaiveDate>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .or_else(|_| mismatch(field, "date string (YYYY-MM-DD)")),
        _ => mismatch(field, "date string (YYYY-MM-DD)"),
    }
}

pub(crate) fn boolean(field: Field, value: &Value) -> Result<Option<bool>> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        _ => mismatch(field, "boolean"),
    }
}

/// Structured address object or a single free-text line
pub(crate) fn address(field: Field, value: &Value) -> Result<Option<Address>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(Address::free_text(s.trim()))),
        Value::Object(_) => serde_json::from_value(value.clone())
            .map(Some)
            .or_else(|_| mismatch(field, "address object or string")),
        _ => mismatch(field, "address object or string"),
    }
}
