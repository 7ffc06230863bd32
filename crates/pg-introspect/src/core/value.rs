//! Driver-neutral catalog row representation.
//!
//! Catalog queries only ever return names, small integers, sort-order floats
//! and flags, so the value type is deliberately narrow. Executors convert their
//! native rows into [`CatalogRow`] and views decode from it by column name.

use std::fmt;

use crate::error::{IntrospectError, Result};

/// A single value in a catalog row.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogValue {
    /// SQL NULL.
    Null,

    /// Text-like value (text, varchar, name, bpchar).
    Text(String),

    /// Integer value (int2, int4, int8, oid).
    Int(i64),

    /// Floating point value (float4, float8).
    Float(f64),

    /// Boolean value.
    Bool(bool),
}

impl CatalogValue {
    fn kind(&self) -> &'static str {
        match self {
            CatalogValue::Null => "NULL",
            CatalogValue::Text(_) => "text",
            CatalogValue::Int(_) => "integer",
            CatalogValue::Float(_) => "float",
            CatalogValue::Bool(_) => "boolean",
        }
    }
}

impl fmt::Display for CatalogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogValue::Null => f.write_str("NULL"),
            CatalogValue::Text(v) => f.write_str(v),
            CatalogValue::Int(v) => write!(f, "{}", v),
            CatalogValue::Float(v) => write!(f, "{}", v),
            CatalogValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for CatalogValue {
    fn from(v: &str) -> Self {
        CatalogValue::Text(v.to_string())
    }
}

impl From<String> for CatalogValue {
    fn from(v: String) -> Self {
        CatalogValue::Text(v)
    }
}

impl From<i64> for CatalogValue {
    fn from(v: i64) -> Self {
        CatalogValue::Int(v)
    }
}

impl From<i32> for CatalogValue {
    fn from(v: i32) -> Self {
        CatalogValue::Int(v as i64)
    }
}

impl From<f64> for CatalogValue {
    fn from(v: f64) -> Self {
        CatalogValue::Float(v)
    }
}

impl From<bool> for CatalogValue {
    fn from(v: bool) -> Self {
        CatalogValue::Bool(v)
    }
}

impl<T: Into<CatalogValue>> From<Option<T>> for CatalogValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CatalogValue::Null, Into::into)
    }
}

/// One row returned by a catalog query, addressable by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogRow {
    columns: Vec<(String, CatalogValue)>,
}

impl CatalogRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<CatalogValue>) -> Self {
        self.push(name, value);
        self
    }

    /// Append a column.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<CatalogValue>) {
        self.columns.push((name.into(), value.into()));
    }

    /// Replace a column's value, appending it if absent.
    pub fn set(&mut self, name: &str, value: impl Into<CatalogValue>) {
        let value = value.into();
        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => self.columns.push((name.to_string(), value)),
        }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Raw value by column name.
    pub fn get(&self, column: &str) -> Result<&CatalogValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
            .ok_or_else(|| IntrospectError::decode(column, "column not present in row"))
    }

    /// Non-NULL text value.
    pub fn text(&self, column: &str) -> Result<String> {
        self.opt_text(column)?
            .ok_or_else(|| IntrospectError::decode(column, "unexpected NULL"))
    }

    /// Nullable text value.
    pub fn opt_text(&self, column: &str) -> Result<Option<String>> {
        match self.get(column)? {
            CatalogValue::Null => Ok(None),
            CatalogValue::Text(v) => Ok(Some(v.clone())),
            other => Err(mismatch(column, "text", other)),
        }
    }

    /// Nullable integer value.
    pub fn opt_int(&self, column: &str) -> Result<Option<i64>> {
        match self.get(column)? {
            CatalogValue::Null => Ok(None),
            CatalogValue::Int(v) => Ok(Some(*v)),
            other => Err(mismatch(column, "integer", other)),
        }
    }

    /// Non-NULL integer value.
    pub fn int(&self, column: &str) -> Result<i64> {
        self.opt_int(column)?
            .ok_or_else(|| IntrospectError::decode(column, "unexpected NULL"))
    }

    /// Nullable floating point value. Integers widen.
    pub fn opt_float(&self, column: &str) -> Result<Option<f64>> {
        match self.get(column)? {
            CatalogValue::Null => Ok(None),
            CatalogValue::Float(v) => Ok(Some(*v)),
            CatalogValue::Int(v) => Ok(Some(*v as f64)),
            other => Err(mismatch(column, "float", other)),
        }
    }

    /// Non-NULL boolean value.
    pub fn bool(&self, column: &str) -> Result<bool> {
        match self.get(column)? {
            CatalogValue::Bool(v) => Ok(*v),
            other => Err(mismatch(column, "boolean", other)),
        }
    }
}

fn mismatch(column: &str, expected: &str, found: &CatalogValue) -> IntrospectError {
    IntrospectError::decode(
        column,
        format!("expected {}, found {}", expected, found.kind()),
    )
}
