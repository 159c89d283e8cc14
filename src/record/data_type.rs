use std::fmt;

/// The closed set of column types a declared type string resolves to.
///
/// `Int32` covers the `int`, `smallint` and `tinyint` declarations alike: all three coerce to
/// the same 32-bit representation and are never narrowed.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum DataType {
    String,
    Int32,
    Int64,
    Float32,
    Float64,
    Boolean,
    /// Arbitrary precision; any `(precision, scale)` parameters are dropped.
    Decimal,
    /// Millisecond precision, no timezone.
    Timestamp,
    Date,
    /// Any declaration outside the known vocabulary. Fields pass through as text.
    Unknown,
}

impl DataType {
    /// Resolve a declared type string such as `bigint` or `decimal(10,2)`.
    ///
    /// Lookup is case-sensitive and runs on the name truncated at the first `(`. A declaration
    /// that matches no tag but mentions `decimal` still resolves to [`DataType::Decimal`].
    pub fn from_declared(declared: &str) -> Self {
        let name = match declared.find('(') {
            Some(idx) => &declared[..idx],
            None => declared,
        };
        match name {
            "string" => DataType::String,
            "int" | "smallint" | "tinyint" => DataType::Int32,
            "bigint" => DataType::Int64,
            "double" => DataType::Float64,
            "float" => DataType::Float32,
            "boolean" => DataType::Boolean,
            "decimal" => DataType::Decimal,
            "timestamp" => DataType::Timestamp,
            "date" => DataType::Date,
            _ if declared.contains("decimal") => DataType::Decimal,
            _ => DataType::Unknown,
        }
    }

    /// Returns `true` if a blank field of this type decodes to null.
    pub fn is_nullable_when_blank(&self) -> bool {
        !matches!(self, DataType::String)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::String => "string",
            DataType::Int32 => "int",
            DataType::Int64 => "bigint",
            DataType::Float32 => "float",
            DataType::Float64 => "double",
            DataType::Boolean => "boolean",
            DataType::Decimal => "decimal",
            DataType::Timestamp => "timestamp",
            DataType::Date => "date",
            DataType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
