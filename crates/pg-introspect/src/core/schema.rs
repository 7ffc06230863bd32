//! Normalized catalog model handed to code generation.
//!
//! Everything here is plain owned data: built fresh per introspection and
//! never queried again once returned.

use serde::{Deserialize, Serialize};

use crate::catalog::ColumnRow;

/// Root of an introspection result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogInfo {
    /// One entry per requested schema, in request order.
    pub schemas: Vec<Schema>,
}

impl CatalogInfo {
    /// Find a schema by name.
    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.iter().find(|s| s.name == name)
    }

    /// Total number of tables across all schemas.
    pub fn table_count(&self) -> usize {
        self.schemas.iter().map(|s| s.tables.len()).sum()
    }

    /// Total number of enums across all schemas.
    pub fn enum_count(&self) -> usize {
        self.schemas.iter().map(|s| s.enums.len()).sum()
    }
}

/// A database schema (namespace).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name.
    pub name: String,

    /// Tables in order of discovery.
    pub tables: Vec<Table>,

    /// Enumerated types defined in this schema.
    pub enums: Vec<Enum>,
}

impl Schema {
    /// Find a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Find an enum by name.
    pub fn enum_type(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }
}

/// Table (or view) metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,

    /// Owning schema name.
    pub schema: String,

    /// Column definitions in catalog order.
    pub columns: Vec<Column>,
}

impl Table {
    /// Get the fully qualified table name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }

    /// Find a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Structured form of a raw catalog type name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnType {
    /// Base type name, with any bracketed length removed.
    pub name: String,

    /// Column is an array of `name`.
    pub is_array: bool,

    /// `name` refers to a user-defined type (enum, composite, domain...).
    pub is_user_defined: bool,

    /// Explicit length from a `type[n]` suffix. Whether it is a maximum or an
    /// exact size depends on the type and is left to the consumer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
}

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,

    /// Normalized type descriptor.
    pub column_type: ColumnType,

    /// Whether the column allows NULL.
    pub is_nullable: bool,

    /// Whether the column has a default expression.
    pub has_default: bool,

    /// The catalog record this column was built from.
    pub orig: ColumnRow,
}

/// An enumerated type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    /// Type name.
    pub name: String,

    /// Owning schema name.
    pub schema: String,

    /// Labels in catalog sort order.
    pub values: Vec<EnumValue>,
}

impl Enum {
    /// Labels in order.
    pub fn labels(&self) -> Vec<&str> {
        self.values.iter().map(|v| v.label.as_str()).collect()
    }
}

/// One label of an enumerated type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Label text.
    pub label: String,

    /// 1-based position in the catalog's sort order.
    pub ordinal: i32,
}
