use thiserror::Error;

use super::{coerce::coerce_column, FieldError};
use crate::{
    logging::{codec_log, DECODE_LOG_CTX},
    record::{Row, Schema},
};

/// What to do when a line carries more fields than the schema has columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtraFields {
    /// Drop the surplus fields.
    #[default]
    Ignore,
    /// Fail with [`DecodeError::UnexpectedField`].
    Reject,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("line has no field for column {column_index} ({column_name})")]
    MissingField {
        column_index: usize,
        column_name: String,
    },
    #[error("column {column_name}: {source}")]
    FieldCoercionFailed {
        column_name: String,
        #[source]
        source: FieldError,
    },
    #[error("line has {actual} fields but the schema has {expected} columns")]
    UnexpectedField { expected: usize, actual: usize },
}

/// Decode one delimited line against `schema`, ignoring surplus fields.
pub fn decode(line: &str, schema: &Schema) -> Result<Row, DecodeError> {
    decode_with(line, schema, ExtraFields::Ignore)
}

/// Decode one delimited line against `schema`.
///
/// The line is split on the schema delimiter taken literally; empty trailing fields are kept.
/// Any failing column aborts the whole row.
pub fn decode_with(line: &str, schema: &Schema, extra: ExtraFields) -> Result<Row, DecodeError> {
    let result = decode_fields(line, schema, extra);
    if let Err(err) = &result {
        codec_log!(
            log::Level::Debug,
            ctx: DECODE_LOG_CTX,
            "row_decode_failed",
            "columns={} error=\"{}\"",
            schema.len(),
            err,
        );
    }
    result
}

fn decode_fields(line: &str, schema: &Schema, extra: ExtraFields) -> Result<Row, DecodeError> {
    let mut fields = line.split(schema.delimiter());
    let mut row = Row::with_capacity(schema.len());

    for (column_index, column) in schema.columns().iter().enumerate() {
        let raw = fields.next().ok_or_else(|| DecodeError::MissingField {
            column_index,
            column_name: column.name.clone(),
        })?;
        let value =
            coerce_column(raw, column).map_err(|source| DecodeError::FieldCoercionFailed {
                column_name: column.name.clone(),
                source,
            })?;
        row.push(value);
    }

    let surplus = fields.count();
    if surplus > 0 {
        match extra {
            ExtraFields::Ignore => {
                codec_log!(
                    log::Level::Trace,
                    ctx: DECODE_LOG_CTX,
                    "row_extra_fields",
                    "columns={} ignored={}",
                    schema.len(),
                    surplus,
                );
            }
            ExtraFields::Reject => {
                return Err(DecodeError::UnexpectedField {
                    expected: schema.len(),
                    actual: schema.len() + surplus,
                });
            }
        }
    }
    Ok(row)
}
