use std::collections::HashMap;

use thiserror::Error;

use crate::{codec::ExtraFields, record::DEFAULT_DELIMITER};

/// Table property holding the comma-separated column names.
pub const COLUMNS_PROPERTY: &str = "columns";
/// Table property holding the column type list.
pub const COLUMN_TYPES_PROPERTY: &str = "columns.types";
/// Table property overriding the field delimiter.
pub const SEPARATOR_PROPERTY: &str = "separatorChar";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("missing table property `{0}`")]
    MissingProperty(&'static str),
}

/// Inputs a [`RowCodec`](crate::RowCodec) is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecOption {
    pub(crate) columns: String,
    pub(crate) column_types: String,
    pub(crate) separator: Option<String>,
    pub(crate) extra_fields: ExtraFields,
}

impl CodecOption {
    pub fn new(columns: impl Into<String>, column_types: impl Into<String>) -> Self {
        CodecOption {
            columns: columns.into(),
            column_types: column_types.into(),
            separator: None,
            extra_fields: ExtraFields::default(),
        }
    }

    /// Read the options from a host's table properties.
    ///
    /// `columns` and `columns.types` are required, `separatorChar` defaults to a tab.
    pub fn from_properties(properties: &HashMap<String, String>) -> Result<Self, OptionError> {
        let columns = properties
            .get(COLUMNS_PROPERTY)
            .ok_or(OptionError::MissingProperty(COLUMNS_PROPERTY))?;
        let column_types = properties
            .get(COLUMN_TYPES_PROPERTY)
            .ok_or(OptionError::MissingProperty(COLUMN_TYPES_PROPERTY))?;
        let option = CodecOption::new(columns.as_str(), column_types.as_str());
        Ok(match properties.get(SEPARATOR_PROPERTY) {
            Some(separator) => option.separator(separator.as_str()),
            None => option,
        })
    }

    pub fn separator(self, separator: impl Into<String>) -> Self {
        CodecOption {
            separator: Some(separator.into()),
            ..self
        }
    }

    pub fn extra_fields(self, extra_fields: ExtraFields) -> Self {
        CodecOption {
            extra_fields,
            ..self
        }
    }

    /// The delimiter the codec will use.
    pub fn delimiter(&self) -> &str {
        self.separator.as_deref().unwrap_or(DEFAULT_DELIMITER)
    }
}
