//! Schema-driven codec between delimited text lines and typed rows.
//!
//! A [`Schema`](record::Schema) is bound once from the host's column names, declared column
//! types and field delimiter. [`RowCodec`] then turns each line into a freshly allocated
//! [`Row`](record::Row) of typed [`Value`](record::Value)s, and turns rows back into lines.
//! Codecs are immutable after construction and can be shared across threads.
//!
//! ```
//! use rowcodec::{record::Value, CodecOption, RowCodec};
//!
//! let codec = RowCodec::new(CodecOption::new("id,active,score", "int,boolean,double")).unwrap();
//! let row = codec.decode("42\ttrue\t3.14").unwrap();
//! assert_eq!(row[0], Value::Int32(42));
//! assert_eq!(codec.encode(&row).unwrap(), "42\ttrue\t3.14");
//! ```

mod logging;

/// Text line decoding, encoding and per-field coercion.
pub mod codec;
/// Codec construction options.
pub mod option;
/// Schema, rows and values.
pub mod record;

pub use crate::{
    codec::{CodecError, DecodeError, EncodeError, ExtraFields, FieldError, RowCodec},
    option::CodecOption,
};
