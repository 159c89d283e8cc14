//! Columnar view of decoded rows.
//!
//! Decimal columns are kept as their exact text, since an arbitrary precision value has no
//! lossless fixed-width Arrow type.

use std::sync::Arc;

use arrow::{
    array::{
        ArrayRef, BooleanBuilder, Date32Builder, Float32Builder, Float64Builder, Int32Builder,
        Int64Builder, RecordBatch, StringBuilder, TimestampMillisecondBuilder,
    },
    datatypes::{DataType as ArrowDataType, Field, Schema as ArrowSchema, SchemaRef, TimeUnit},
    error::ArrowError,
};
use chrono::NaiveDate;
use thiserror::Error;

use super::{DataType, Row, Schema, Value};

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("row has {actual} fields but the schema has {expected} columns")]
    FieldCountMismatch { expected: usize, actual: usize },
    #[error("column {column_index} expects {expected} but got {actual:?}")]
    ValueMismatch {
        column_index: usize,
        expected: DataType,
        actual: Option<DataType>,
    },
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

impl DataType {
    /// The Arrow type a column of this type is materialized as.
    pub fn arrow_type(&self) -> ArrowDataType {
        match self {
            DataType::String | DataType::Decimal | DataType::Unknown => ArrowDataType::Utf8,
            DataType::Int32 => ArrowDataType::Int32,
            DataType::Int64 => ArrowDataType::Int64,
            DataType::Float32 => ArrowDataType::Float32,
            DataType::Float64 => ArrowDataType::Float64,
            DataType::Boolean => ArrowDataType::Boolean,
            DataType::Timestamp => ArrowDataType::Timestamp(TimeUnit::Millisecond, None),
            DataType::Date => ArrowDataType::Date32,
        }
    }
}

impl Schema {
    /// Describe the row shape as an Arrow schema. Every field is nullable.
    pub fn arrow_schema(&self) -> SchemaRef {
        Arc::new(ArrowSchema::new(
            self.columns()
                .iter()
                .map(|column| Field::new(&column.name, column.data_type.arrow_type(), true))
                .collect::<Vec<_>>(),
        ))
    }
}

enum ColumnBuilder {
    Utf8(StringBuilder),
    Int32(Int32Builder),
    Int64(Int64Builder),
    Float32(Float32Builder),
    Float64(Float64Builder),
    Boolean(BooleanBuilder),
    Timestamp(TimestampMillisecondBuilder),
    Date(Date32Builder),
}

impl ColumnBuilder {
    fn new(data_type: DataType) -> Self {
        match data_type {
            DataType::String | DataType::Decimal | DataType::Unknown => {
                ColumnBuilder::Utf8(StringBuilder::new())
            }
            DataType::Int32 => ColumnBuilder::Int32(Int32Builder::new()),
            DataType::Int64 => ColumnBuilder::Int64(Int64Builder::new()),
            DataType::Float32 => ColumnBuilder::Float32(Float32Builder::new()),
            DataType::Float64 => ColumnBuilder::Float64(Float64Builder::new()),
            DataType::Boolean => ColumnBuilder::Boolean(BooleanBuilder::new()),
            DataType::Timestamp => ColumnBuilder::Timestamp(TimestampMillisecondBuilder::new()),
            DataType::Date => ColumnBuilder::Date(Date32Builder::new()),
        }
    }

    /// Append `value` to the column at `column_index` declared as `expected`.
    fn append(
        &mut self,
        column_index: usize,
        expected: DataType,
        value: &Value,
    ) -> Result<(), BatchError> {
        match (self, value) {
            (ColumnBuilder::Utf8(b), Value::Null) => b.append_null(),
            (ColumnBuilder::Int32(b), Value::Null) => b.append_null(),
            (ColumnBuilder::Int64(b), Value::Null) => b.append_null(),
            (ColumnBuilder::Float32(b), Value::Null) => b.append_null(),
            (ColumnBuilder::Float64(b), Value::Null) => b.append_null(),
            (ColumnBuilder::Boolean(b), Value::Null) => b.append_null(),
            (ColumnBuilder::Timestamp(b), Value::Null) => b.append_null(),
            (ColumnBuilder::Date(b), Value::Null) => b.append_null(),
            (ColumnBuilder::Utf8(b), Value::String(v)) => b.append_value(v),
            (ColumnBuilder::Utf8(b), Value::Decimal(v)) => b.append_value(v.to_plain_string()),
            (ColumnBuilder::Int32(b), Value::Int32(v)) => b.append_value(*v),
            (ColumnBuilder::Int64(b), Value::Int64(v)) => b.append_value(*v),
            (ColumnBuilder::Float32(b), Value::Float32(v)) => b.append_value(*v),
            (ColumnBuilder::Float64(b), Value::Float64(v)) => b.append_value(*v),
            (ColumnBuilder::Boolean(b), Value::Boolean(v)) => b.append_value(*v),
            (ColumnBuilder::Timestamp(b), Value::Timestamp(v)) => {
                b.append_value(v.and_utc().timestamp_millis())
            }
            (ColumnBuilder::Date(b), Value::Date(v)) => b.append_value(days_since_epoch(v)),
            _ => {
                return Err(BatchError::ValueMismatch {
                    column_index,
                    expected,
                    actual: value.data_type(),
                })
            }
        }
        Ok(())
    }

    fn finish(self) -> ArrayRef {
        match self {
            ColumnBuilder::Utf8(mut b) => Arc::new(b.finish()),
            ColumnBuilder::Int32(mut b) => Arc::new(b.finish()),
            ColumnBuilder::Int64(mut b) => Arc::new(b.finish()),
            ColumnBuilder::Float32(mut b) => Arc::new(b.finish()),
            ColumnBuilder::Float64(mut b) => Arc::new(b.finish()),
            ColumnBuilder::Boolean(mut b) => Arc::new(b.finish()),
            ColumnBuilder::Timestamp(mut b) => Arc::new(b.finish()),
            ColumnBuilder::Date(mut b) => Arc::new(b.finish()),
        }
    }
}

fn fits(data_type: DataType, value: &Value) -> bool {
    match value.data_type() {
        None => true,
        // text passes through unknown columns
        Some(DataType::String) => matches!(data_type, DataType::String | DataType::Unknown),
        Some(actual) => actual == data_type,
    }
}

fn days_since_epoch(date: &NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    date.signed_duration_since(epoch).num_days() as i32
}

/// Accumulates rows of one schema into an Arrow [`RecordBatch`].
pub struct RowBatchBuilder {
    schema: Schema,
    builders: Vec<ColumnBuilder>,
    rows: usize,
}

impl RowBatchBuilder {
    pub fn new(schema: Schema) -> Self {
        let builders = schema
            .columns()
            .iter()
            .map(|column| ColumnBuilder::new(column.data_type))
            .collect();
        Self {
            schema,
            builders,
            rows: 0,
        }
    }

    /// Append one row. A rejected row leaves the builder untouched.
    pub fn push(&mut self, row: &Row) -> Result<(), BatchError> {
        if row.len() != self.schema.len() {
            return Err(BatchError::FieldCountMismatch {
                expected: self.schema.len(),
                actual: row.len(),
            });
        }
        for (column_index, (column, value)) in self.schema.columns().iter().zip(row).enumerate()
        {
            if !fits(column.data_type, value) {
                return Err(BatchError::ValueMismatch {
                    column_index,
                    expected: column.data_type,
                    actual: value.data_type(),
                });
            }
        }
        for (column_index, ((builder, column), value)) in self
            .builders
            .iter_mut()
            .zip(self.schema.columns())
            .zip(row)
            .enumerate()
        {
            builder.append(column_index, column.data_type, value)?;
        }
        self.rows += 1;
        Ok(())
    }

    /// Number of rows appended so far.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn finish(self) -> Result<RecordBatch, BatchError> {
        let arrow_schema = self.schema.arrow_schema();
        let columns = self
            .builders
            .into_iter()
            .map(ColumnBuilder::finish)
            .collect::<Vec<_>>();
        Ok(RecordBatch::try_new(arrow_schema, columns)?)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use arrow::{
        array::{Array, AsArray},
        datatypes::{
            DataType as ArrowDataType, Date32Type, Float64Type, Int32Type,
            TimeUnit, TimestampMillisecondType,
        },
    };
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;

    use super::{BatchError, ColumnBuilder, RowBatchBuilder};
    use crate::{
        codec::decode,
        record::{DataType, Row, Schema, Value},
    };

    fn schema() -> Schema {
        Schema::bind(
            "id,name,price,amount,at,day,extra",
            "int,string,double,decimal(10,2),timestamp,date,binary",
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_arrow_schema() {
        let arrow_schema = schema().arrow_schema();
        let types: Vec<_> = arrow_schema
            .fields()
            .iter()
            .map(|field| field.data_type().clone())
            .collect();
        assert_eq!(
            types,
            vec![
                ArrowDataType::Int32,
                ArrowDataType::Utf8,
                ArrowDataType::Float64,
                ArrowDataType::Utf8,
                ArrowDataType::Timestamp(TimeUnit::Millisecond, None),
                ArrowDataType::Date32,
                ArrowDataType::Utf8,
            ]
        );
        assert!(arrow_schema.fields().iter().all(|field| field.is_nullable()));
        assert_eq!(arrow_schema.field(1).name(), "name");
    }

    #[test]
    fn test_build_batch_from_decoded_rows() {
        let schema = schema();
        let mut builder = RowBatchBuilder::new(schema.clone());
        for line in [
            "1\tapple\t0.5\t19.99\t1970-01-01 00:00:01.500\t1970-01-02\t\\x00",
            "\t\t\t\t\t\t",
        ] {
            builder.push(&decode(line, &schema).unwrap()).unwrap();
        }
        assert_eq!(builder.len(), 2);

        let batch = builder.finish().unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.column(0).as_primitive::<Int32Type>().value(0), 1);
        assert!(batch.column(0).is_null(1));
        assert_eq!(batch.column(1).as_string::<i32>().value(1), "");
        assert_eq!(batch.column(2).as_primitive::<Float64Type>().value(0), 0.5);
        assert_eq!(batch.column(3).as_string::<i32>().value(0), "19.99");
        assert_eq!(
            batch
                .column(4)
                .as_primitive::<TimestampMillisecondType>()
                .value(0),
            1500
        );
        assert_eq!(batch.column(5).as_primitive::<Date32Type>().value(0), 1);
        assert_eq!(batch.column(6).as_string::<i32>().value(0), "\\x00");
    }

    #[test]
    fn test_rejected_row_is_not_appended() {
        let schema = Schema::bind("id,amount", "bigint,decimal", None).unwrap();
        let mut builder = RowBatchBuilder::new(schema);

        let err = builder
            .push(&Row::new(vec![Value::Int64(1), Value::Int32(2)]))
            .unwrap_err();
        assert!(matches!(
            err,
            BatchError::ValueMismatch {
                column_index: 1,
                expected: DataType::Decimal,
                actual: Some(DataType::Int32),
            }
        ));
        assert!(matches!(
            builder.push(&Row::new(vec![Value::Int64(1)])),
            Err(BatchError::FieldCountMismatch {
                expected: 2,
                actual: 1,
            })
        ));
        assert!(builder.is_empty());

        builder
            .push(&Row::new(vec![
                Value::Int64(1),
                Value::Decimal(BigDecimal::from_str("2.50").unwrap()),
            ]))
            .unwrap();
        let batch = builder.finish().unwrap();
        assert_eq!(batch.num_rows(), 1);
        assert_eq!(batch.column(1).as_string::<i32>().value(0), "2.50");
    }

    #[test]
    fn test_column_builder_rejects_mismatched_value() {
        let mut column = ColumnBuilder::new(DataType::Int64);
        assert!(matches!(
            column.append(3, DataType::Int64, &Value::from("7")),
            Err(BatchError::ValueMismatch {
                column_index: 3,
                expected: DataType::Int64,
                actual: Some(DataType::String),
            })
        ));
        column.append(3, DataType::Int64, &Value::Int64(7)).unwrap();
        column.append(3, DataType::Int64, &Value::Null).unwrap();
        let array = column.finish();
        assert_eq!(array.len(), 2);
        assert!(array.is_null(1));
    }

    #[test]
    fn test_date_before_epoch() {
        let schema = Schema::bind("day", "date", None).unwrap();
        let mut builder = RowBatchBuilder::new(schema);
        builder
            .push(&Row::new(vec![Value::Date(
                NaiveDate::from_ymd_opt(1969, 12, 31).unwrap(),
            )]))
            .unwrap();
        let batch = builder.finish().unwrap();
        assert_eq!(batch.column(0).as_primitive::<Date32Type>().value(0), -1);
    }
}
