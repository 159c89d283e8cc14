use thiserror::Error;

use super::DataType;

/// Field delimiter used when the host supplies no override.
pub const DEFAULT_DELIMITER: &str = "\t";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schema requires at least one column name and one column type")]
    Empty,
    #[error("schema has {names} column names but {types} column types")]
    LengthMismatch { names: usize, types: usize },
    #[error("field delimiter can not be empty")]
    EmptyDelimiter,
}

/// One bound column: its name, resolved type and the declaration it was resolved from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnDesc {
    pub name: String,
    pub data_type: DataType,
    /// The declared type as supplied, e.g. `decimal(10,2)`. Used in error messages.
    pub declared_type: String,
}

impl ColumnDesc {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        let declared_type = declared_type.into();
        Self {
            name: name.into(),
            data_type: DataType::from_declared(&declared_type),
            declared_type,
        }
    }
}

/// An immutable, ordered row shape plus the delimiter its text form uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<ColumnDesc>,
    delimiter: String,
}

impl Schema {
    /// Bind a schema from the host's comma-separated column names and type list.
    ///
    /// `column_types` is split at the top level only, so a parameterized declaration such as
    /// `decimal(10,2)` stays a single type. `delimiter` defaults to [`DEFAULT_DELIMITER`].
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Empty`] if either list is blank, [`SchemaError::LengthMismatch`]
    /// if the two lists differ in length and [`SchemaError::EmptyDelimiter`] for an empty
    /// override.
    pub fn bind(
        column_names: &str,
        column_types: &str,
        delimiter: Option<&str>,
    ) -> Result<Self, SchemaError> {
        if column_names.trim().is_empty() || column_types.trim().is_empty() {
            return Err(SchemaError::Empty);
        }
        let names: Vec<&str> = column_names.split(',').map(str::trim).collect();
        let types = split_type_list(column_types);
        if names.len() != types.len() {
            return Err(SchemaError::LengthMismatch {
                names: names.len(),
                types: types.len(),
            });
        }
        Self::from_columns(names.into_iter().zip(types), delimiter)
    }

    /// Bind a schema from structured `(name, declared type)` pairs.
    pub fn from_columns<I, N, T>(columns: I, delimiter: Option<&str>) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: Into<String>,
    {
        let delimiter = delimiter.unwrap_or(DEFAULT_DELIMITER);
        if delimiter.is_empty() {
            return Err(SchemaError::EmptyDelimiter);
        }
        let columns: Vec<ColumnDesc> = columns
            .into_iter()
            .map(|(name, declared)| ColumnDesc::new(name, declared))
            .collect();
        if columns.is_empty() {
            return Err(SchemaError::Empty);
        }
        Ok(Self {
            columns,
            delimiter: delimiter.to_owned(),
        })
    }

    pub fn columns(&self) -> &[ColumnDesc] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&ColumnDesc> {
        self.columns.get(index)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always `false` for a bound schema; provided for API symmetry with [`Schema::len`].
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }
}

/// Split a type list on top-level `,` or `:`. Separators nested in `(..)` or `<..>` belong to
/// the enclosing declaration.
fn split_type_list(types: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in types.char_indices() {
        match ch {
            '(' | '<' => depth += 1,
            ')' | '>' => depth = depth.saturating_sub(1),
            ',' | ':' if depth == 0 => {
                result.push(types[start..idx].trim().to_owned());
                start = idx + ch.len_utf8();
            }
            _ => {}
        }
    }
    result.push(types[start..].trim().to_owned());
    result
}

#[cfg(test)]
mod tests {
    use super::{split_type_list, Schema, SchemaError, DEFAULT_DELIMITER};
    use crate::record::DataType;

    #[test]
    fn test_bind_defaults_to_tab() {
        let schema = Schema::bind("id,name,price", "int,string,double", None).unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.delimiter(), DEFAULT_DELIMITER);
        assert_eq!(
            schema.column_names().collect::<Vec<_>>(),
            vec!["id", "name", "price"]
        );
        let types: Vec<DataType> = schema.columns().iter().map(|c| c.data_type).collect();
        assert_eq!(
            types,
            vec![DataType::Int32, DataType::String, DataType::Float64]
        );
    }

    #[test]
    fn test_bind_keeps_parameterized_decimal() {
        let schema = Schema::bind("id,amount,note", "bigint,decimal(10,2),string", Some("|"))
            .unwrap();
        assert_eq!(schema.delimiter(), "|");
        let amount = schema.column(1).unwrap();
        assert_eq!(amount.name, "amount");
        assert_eq!(amount.data_type, DataType::Decimal);
        assert_eq!(amount.declared_type, "decimal(10,2)");
    }

    #[test]
    fn test_bind_accepts_colon_separated_types() {
        let schema = Schema::bind("a,b", "int:date", None).unwrap();
        assert_eq!(schema.column(1).unwrap().data_type, DataType::Date);
    }

    #[test]
    fn test_bind_length_mismatch() {
        assert_eq!(
            Schema::bind("a,b,c", "int,int", None),
            Err(SchemaError::LengthMismatch { names: 3, types: 2 })
        );
        assert_eq!(
            Schema::bind("a", "decimal(4,1),int", None),
            Err(SchemaError::LengthMismatch { names: 1, types: 2 })
        );
    }

    #[test]
    fn test_bind_empty_inputs() {
        assert_eq!(Schema::bind("", "int", None), Err(SchemaError::Empty));
        assert_eq!(Schema::bind("a", "  ", None), Err(SchemaError::Empty));
        assert_eq!(
            Schema::from_columns(Vec::<(&str, &str)>::new(), None),
            Err(SchemaError::Empty)
        );
    }

    #[test]
    fn test_bind_empty_delimiter() {
        assert_eq!(
            Schema::bind("a", "int", Some("")),
            Err(SchemaError::EmptyDelimiter)
        );
    }

    #[test]
    fn test_duplicate_names_are_permitted() {
        let schema = Schema::bind("a,a", "int,string", None).unwrap();
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn test_unknown_declarations_are_kept() {
        let schema =
            Schema::bind("tags,code", "array<struct<k:string,v:int>>,varchar(8)", None).unwrap();
        assert_eq!(schema.column(0).unwrap().data_type, DataType::Unknown);
        assert_eq!(
            schema.column(0).unwrap().declared_type,
            "array<struct<k:string,v:int>>"
        );
        assert_eq!(schema.column(1).unwrap().data_type, DataType::Unknown);
    }

    #[test]
    fn test_split_type_list() {
        assert_eq!(
            split_type_list(" int , decimal(38,18),map<string,int> "),
            vec!["int", "decimal(38,18)", "map<string,int>"]
        );
    }

    #[test]
    fn test_random_equal_length_lists_bind() {
        const TYPES: [&str; 11] = [
            "string",
            "int",
            "smallint",
            "tinyint",
            "bigint",
            "double",
            "float",
            "boolean",
            "decimal(12,4)",
            "timestamp",
            "date",
        ];
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..200 {
            let names_len = rng.usize(1..16);
            let types_len = rng.usize(1..16);
            let names: Vec<String> = (0..names_len).map(|i| format!("c{i}")).collect();
            let types: Vec<&str> = (0..types_len).map(|_| TYPES[rng.usize(..TYPES.len())]).collect();

            let result = Schema::bind(&names.join(","), &types.join(","), None);
            if names_len == types_len {
                assert_eq!(result.unwrap().len(), names_len);
            } else {
                assert_eq!(
                    result,
                    Err(SchemaError::LengthMismatch {
                        names: names_len,
                        types: types_len,
                    })
                );
            }
        }
    }
}
