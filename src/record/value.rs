use std::fmt;

use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

use super::DataType;

/// Text layout of a [`Value::Timestamp`] after the year, identical to what the decoder accepts.
pub const TIMESTAMP_FORMAT: &str = "-%m-%d %H:%M:%S%.3f";

/// Text layout of a [`Value::Date`] after the year, identical to what the decoder accepts.
pub const DATE_FORMAT: &str = "-%m-%d";

/// A typed value of one column in a [`Row`](super::Row).
#[derive(Debug, Clone)]
pub enum Value {
    /// A blank field of a non-string column.
    Null,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Decimal(BigDecimal),
    /// Millisecond precision, no timezone.
    Timestamp(NaiveDateTime),
    Date(NaiveDate),
}

impl Value {
    /// The column type this value decodes from. `None` for [`Value::Null`], which any
    /// non-string column can produce.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(DataType::Boolean),
            Value::Int32(_) => Some(DataType::Int32),
            Value::Int64(_) => Some(DataType::Int64),
            Value::Float32(_) => Some(DataType::Float32),
            Value::Float64(_) => Some(DataType::Float64),
            Value::String(_) => Some(DataType::String),
            Value::Decimal(_) => Some(DataType::Decimal),
            Value::Timestamp(_) => Some(DataType::Timestamp),
            Value::Date(_) => Some(DataType::Date),
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool_opt(&self) -> Option<&bool> {
        match self {
            Value::Boolean(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i32_opt(&self) -> Option<&i32> {
        match self {
            Value::Int32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64_opt(&self) -> Option<&i64> {
        match self {
            Value::Int64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f32_opt(&self) -> Option<&f32> {
        match self {
            Value::Float32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64_opt(&self) -> Option<&f64> {
        match self {
            Value::Float64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_string_opt(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_decimal_opt(&self) -> Option<&BigDecimal> {
        match self {
            Value::Decimal(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_timestamp_opt(&self) -> Option<&NaiveDateTime> {
        match self {
            Value::Timestamp(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_date_opt(&self) -> Option<&NaiveDate> {
        match self {
            Value::Date(v) => Some(v),
            _ => None,
        }
    }
}

impl Eq for Value {}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a.eq(b),
            (Value::Int32(a), Value::Int32(b)) => a.eq(b),
            (Value::Int64(a), Value::Int64(b)) => a.eq(b),
            (Value::Float32(a), Value::Float32(b)) => a.to_bits() == b.to_bits(),
            (Value::Float64(a), Value::Float64(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a.eq(b),
            // compares digits and scale, `1.0` and `1.00` are distinct field texts
            (Value::Decimal(a), Value::Decimal(b)) => {
                a.as_bigint_and_exponent() == b.as_bigint_and_exponent()
            }
            (Value::Timestamp(a), Value::Timestamp(b)) => a.eq(b),
            (Value::Date(a), Value::Date(b)) => a.eq(b),
            _ => false,
        }
    }
}

/// Canonical field text. This is exactly what the encoder writes for non-null values.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::Decimal(v) => f.write_str(&v.to_plain_string()),
            Value::Timestamp(v) => {
                write_year(f, v.year())?;
                write!(f, "{}", v.format(TIMESTAMP_FORMAT))
            }
            Value::Date(v) => {
                write_year(f, v.year())?;
                write!(f, "{}", v.format(DATE_FORMAT))
            }
        }
    }
}

/// At least four digits, no `+` past year 9999. chrono's `%Y` signs years outside `0..=9999`.
fn write_year(f: &mut fmt::Formatter<'_>, year: i32) -> fmt::Result {
    if year < 0 {
        write!(f, "-{:04}", year.unsigned_abs())
    } else {
        write!(f, "{year:04}")
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<BigDecimal> for Value {
    fn from(value: BigDecimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Timestamp(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
