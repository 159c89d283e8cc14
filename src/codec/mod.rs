//! Text line <-> [`Row`] conversion.

mod coerce;
mod decode;
mod encode;
mod lenient;

pub use coerce::*;
pub use decode::*;
pub use encode::*;
use thiserror::Error;

use crate::{
    logging::codec_log,
    option::{CodecOption, OptionError},
    record::{Row, RowAccessor, Schema, SchemaError},
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("option error: {0}")]
    Option(#[from] OptionError),
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
}

/// A bound schema plus decode policy. Immutable once built, so one codec can serve any
/// number of threads.
#[derive(Debug, Clone)]
pub struct RowCodec {
    schema: Schema,
    extra_fields: ExtraFields,
}

impl RowCodec {
    /// Bind the schema described by `option`.
    pub fn new(option: CodecOption) -> Result<Self, CodecError> {
        let schema = Schema::bind(
            &option.columns,
            &option.column_types,
            Some(option.delimiter()),
        )?;
        codec_log!(
            log::Level::Debug,
            "schema_bound",
            "columns={} delimiter={:?} extra_fields={:?}",
            schema.len(),
            schema.delimiter(),
            option.extra_fields,
        );
        Ok(Self::with_schema(schema, option.extra_fields))
    }

    pub fn with_schema(schema: Schema, extra_fields: ExtraFields) -> Self {
        Self {
            schema,
            extra_fields,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn delimiter(&self) -> &str {
        self.schema.delimiter()
    }

    /// Decode one line into a freshly allocated [`Row`].
    pub fn decode(&self, line: &str) -> Result<Row, DecodeError> {
        decode_with(line, &self.schema, self.extra_fields)
    }

    /// Encode a row that has exactly one field per schema column.
    pub fn encode<R>(&self, row: &R) -> Result<String, EncodeError>
    where
        R: RowAccessor + ?Sized,
    {
        if row.field_count() != self.schema.len() {
            return Err(EncodeError::FieldCountMismatch {
                expected: self.schema.len(),
                actual: row.field_count(),
            });
        }
        encode(row, self.schema.delimiter())
    }
}
