use std::str::FromStr;

use bigdecimal::BigDecimal;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::lenient;
use crate::record::{ColumnDesc, DataType, Value};

/// Plain or scientific decimal notation. `BigDecimal::from_str` alone also takes `_` separators.
static DECIMAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?$")
        .expect("decimal pattern is valid")
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{raw} is not of type {expected}")]
    TypeMismatch { raw: String, expected: String },
}

impl FieldError {
    fn mismatch(raw: &str, declared_type: &str) -> Self {
        FieldError::TypeMismatch {
            raw: raw.to_owned(),
            expected: declared_type.to_uppercase(),
        }
    }
}

/// Coerce one raw field into the value of a bound column.
pub fn coerce_column(raw: &str, column: &ColumnDesc) -> Result<Value, FieldError> {
    coerce(raw, column.data_type, &column.declared_type)
}

/// Coerce one raw field into a typed [`Value`].
///
/// String columns take the text verbatim, blank included. For every other type a blank
/// (whitespace-only) field is [`Value::Null`]. `declared_type` is only used to render
/// [`FieldError::TypeMismatch`].
pub fn coerce(raw: &str, data_type: DataType, declared_type: &str) -> Result<Value, FieldError> {
    if data_type.is_nullable_when_blank() && raw.trim().is_empty() {
        return Ok(Value::Null);
    }

    let mismatch = || FieldError::mismatch(raw, declared_type);
    match data_type {
        DataType::String | DataType::Unknown => Ok(Value::String(raw.to_owned())),
        DataType::Int32 => raw.parse().map(Value::Int32).map_err(|_| mismatch()),
        DataType::Int64 => raw.parse().map(Value::Int64).map_err(|_| mismatch()),
        // Rust float syntax: `inf`/`nan` parse, `1.5d`/`1.5f` suffixes do not.
        DataType::Float64 => raw.trim().parse().map(Value::Float64).map_err(|_| mismatch()),
        DataType::Float32 => raw.trim().parse().map(Value::Float32).map_err(|_| mismatch()),
        DataType::Decimal if !DECIMAL_PATTERN.is_match(raw) => Err(mismatch()),
        DataType::Decimal => BigDecimal::from_str(raw)
            .map(Value::Decimal)
            .map_err(|_| mismatch()),
        DataType::Boolean => match raw {
            "0" | "false" => Ok(Value::Boolean(false)),
            "1" | "true" => Ok(Value::Boolean(true)),
            _ => Err(mismatch()),
        },
        DataType::Timestamp => lenient::parse_timestamp(raw)
            .map(Value::Timestamp)
            .ok_or_else(mismatch),
        DataType::Date => lenient::parse_date(raw)
            .map(Value::Date)
            .ok_or_else(mismatch),
    }
}
