use std::{borrow::Cow, ops::Index};

use super::Value;

/// Ordered values of one decoded line, one per schema column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl Index<usize> for Row {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<Value> for Row {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Read access to a row-shaped host object, field by field in column order.
///
/// The encoder only ever sees rows through this trait. Hosts with their own row structs
/// implement it and hand out owned values; [`Row`] and value slices lend theirs.
pub trait RowAccessor {
    /// Number of fields the row exposes.
    fn field_count(&self) -> usize;

    /// The value at `index`, or `None` past the end.
    fn field(&self, index: usize) -> Option<Cow<'_, Value>>;
}

impl RowAccessor for Row {
    fn field_count(&self) -> usize {
        self.values.len()
    }

    fn field(&self, index: usize) -> Option<Cow<'_, Value>> {
        self.values.get(index).map(Cow::Borrowed)
    }
}

impl RowAccessor for [Value] {
    fn field_count(&self) -> usize {
        self.len()
    }

    fn field(&self, index: usize) -> Option<Cow<'_, Value>> {
        self.get(index).map(Cow::Borrowed)
    }
}

impl RowAccessor for Vec<Value> {
    fn field_count(&self) -> usize {
        self.len()
    }

    fn field(&self, index: usize) -> Option<Cow<'_, Value>> {
        self.get(index).map(Cow::Borrowed)
    }
}

impl<R> RowAccessor for &R
where
    R: RowAccessor + ?Sized,
{
    fn field_count(&self) -> usize {
        (**self).field_count()
    }

    fn field(&self, index: usize) -> Option<Cow<'_, Value>> {
        (**self).field(index)
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{Row, RowAccessor};
    use crate::record::Value;

    struct Reading {
        sensor: &'static str,
        celsius: Option<f64>,
    }

    impl RowAccessor for Reading {
        fn field_count(&self) -> usize {
            2
        }

        fn field(&self, index: usize) -> Option<Cow<'_, Value>> {
            match index {
                0 => Some(Cow::Owned(Value::from(self.sensor))),
                1 => Some(Cow::Owned(Value::from(self.celsius))),
                _ => None,
            }
        }
    }

    #[test]
    fn test_row_accessors() {
        let row: Row = vec![Value::Int32(1), Value::from("x")].into();
        assert_eq!(row.len(), 2);
        assert_eq!(row[1], Value::from("x"));
        assert_eq!(row.field_count(), 2);
        assert!(matches!(row.field(0), Some(Cow::Borrowed(Value::Int32(1)))));
        assert!(row.field(2).is_none());
    }

    #[test]
    fn test_host_row_shape() {
        let reading = Reading {
            sensor: "t-01",
            celsius: None,
        };
        assert_eq!(reading.field_count(), 2);
        assert_eq!(*reading.field(0).unwrap(), Value::from("t-01"));
        assert!(reading.field(1).unwrap().is_null());
    }

    #[test]
    fn test_slice_accessor() {
        let values = [Value::Boolean(true), Value::Int64(9)];
        let slice: &[Value] = &values;
        assert_eq!(slice.field_count(), 2);
        assert_eq!(slice.field(1).unwrap().into_owned(), Value::Int64(9));
    }
}
