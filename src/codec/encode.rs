use std::fmt::Write;

use thiserror::Error;

use crate::{
    logging::{codec_log, ENCODE_LOG_CTX},
    record::RowAccessor,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("column {column_index} is null and has no text form")]
    NullValue { column_index: usize },
    #[error("row has {actual} fields but the schema has {expected} columns")]
    FieldCountMismatch { expected: usize, actual: usize },
}

/// Encode a row into one delimited line, without a trailing delimiter or newline.
///
/// Each value is written in its canonical text form (see [`Value`](crate::record::Value)'s
/// `Display`). A null value has none and fails the whole row.
pub fn encode<R>(row: &R, delimiter: &str) -> Result<String, EncodeError>
where
    R: RowAccessor + ?Sized,
{
    let result = encode_fields(row, delimiter);
    if let Err(err) = &result {
        codec_log!(
            log::Level::Debug,
            ctx: ENCODE_LOG_CTX,
            "row_encode_failed",
            "fields={} error=\"{}\"",
            row.field_count(),
            err,
        );
    }
    result
}

fn encode_fields<R>(row: &R, delimiter: &str) -> Result<String, EncodeError>
where
    R: RowAccessor + ?Sized,
{
    let field_count = row.field_count();
    let mut line = String::new();
    for column_index in 0..field_count {
        let value = row
            .field(column_index)
            .ok_or(EncodeError::FieldCountMismatch {
                expected: field_count,
                actual: column_index,
            })?;
        if value.is_null() {
            return Err(EncodeError::NullValue { column_index });
        }
        if column_index > 0 {
            line.push_str(delimiter);
        }
        // writing into a String can not fail
        let _ = write!(line, "{value}");
    }
    Ok(line)
}
