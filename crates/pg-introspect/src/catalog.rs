//! Raw catalog records and the views they are read from.
//!
//! Each record implements [`CatalogView`], so a single generic
//! [`ViewQuery`](crate::core::ViewQuery) serves every catalog read. Select
//! lists cast `information_schema` domain types to plain SQL types so the
//! driver can decode them.

use serde::{Deserialize, Serialize};

use crate::core::{CatalogRow, CatalogView};
use crate::error::Result;

/// Schema column of `information_schema.tables`, for filtering.
pub const TABLE_SCHEMA_FILTER: &str = "t.table_schema";

/// Schema column of `information_schema.columns`, for filtering.
pub const COLUMN_SCHEMA_FILTER: &str = "c.table_schema";

/// Namespace column shared by the `pg_type` queries, for filtering.
pub const NAMESPACE_FILTER: &str = "n.nspname";

/// Type name column of the enum label query, for filtering.
pub const TYPE_NAME_FILTER: &str = "t.typname";

/// A row of `information_schema.tables`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub table_catalog: String,
    pub table_schema: String,
    pub table_name: String,
    /// `BASE TABLE`, `VIEW`, `FOREIGN`, `LOCAL TEMPORARY`.
    pub table_type: String,
}

impl CatalogView for TableRow {
    const NAME: &'static str = "tables";
    const FROM: &'static str = "information_schema.tables t";
    const SELECT: &'static [&'static str] = &[
        "t.table_catalog::text AS table_catalog",
        "t.table_schema::text AS table_schema",
        "t.table_name::text AS table_name",
        "t.table_type::text AS table_type",
    ];

    fn from_row(row: &CatalogRow) -> Result<Self> {
        Ok(Self {
            table_catalog: row.text("table_catalog")?,
            table_schema: row.text("table_schema")?,
            table_name: row.text("table_name")?,
            table_type: row.text("table_type")?,
        })
    }
}

/// A row of `information_schema.columns`.
///
/// Kept verbatim on every [`Column`](crate::core::Column) so templates can
/// reach fields the normalized model does not lift out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRow {
    pub table_catalog: String,
    pub table_schema: String,
    pub table_name: String,
    pub column_name: String,
    pub ordinal_position: i32,
    pub column_default: Option<String>,
    pub is_nullable: bool,
    /// Reported type; `ARRAY` and `USER-DEFINED` defer to `udt_name`.
    pub data_type: String,
    pub character_maximum_length: Option<i32>,
    pub numeric_precision: Option<i32>,
    pub numeric_scale: Option<i32>,
    pub udt_schema: Option<String>,
    pub udt_name: Option<String>,
    pub is_identity: bool,
}

impl CatalogView for ColumnRow {
    const NAME: &'static str = "columns";
    const FROM: &'static str = "information_schema.columns c";
    const SELECT: &'static [&'static str] = &[
        "c.table_catalog::text AS table_catalog",
        "c.table_schema::text AS table_schema",
        "c.table_name::text AS table_name",
        "c.column_name::text AS column_name",
        "c.ordinal_position::int4 AS ordinal_position",
        "c.column_default::text AS column_default",
        "c.is_nullable::text AS is_nullable",
        "c.data_type::text AS data_type",
        "c.character_maximum_length::int4 AS character_maximum_length",
        "c.numeric_precision::int4 AS numeric_precision",
        "c.numeric_scale::int4 AS numeric_scale",
        "c.udt_schema::text AS udt_schema",
        "c.udt_name::text AS udt_name",
        "c.is_identity::text AS is_identity",
    ];

    fn from_row(row: &CatalogRow) -> Result<Self> {
        Ok(Self {
            table_catalog: row.text("table_catalog")?,
            table_schema: row.text("table_schema")?,
            table_name: row.text("table_name")?,
            column_name: row.text("column_name")?,
            ordinal_position: opt_i32(row, "ordinal_position")?.unwrap_or(0),
            column_default: row.opt_text("column_default")?,
            is_nullable: yes_or_no(row, "is_nullable")?,
            data_type: row.text("data_type")?,
            character_maximum_length: opt_i32(row, "character_maximum_length")?,
            numeric_precision: opt_i32(row, "numeric_precision")?,
            numeric_scale: opt_i32(row, "numeric_scale")?,
            udt_schema: row.opt_text("udt_schema")?,
            udt_name: row.opt_text("udt_name")?,
            is_identity: yes_or_no(row, "is_identity")?,
        })
    }
}

/// A candidate enum type: a `pg_type` entry in one of the requested schemas
/// with no relation or a composite one, and not an array alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumTypeRow {
    pub schema: String,
    pub name: String,
}

impl CatalogView for EnumTypeRow {
    const NAME: &'static str = "enum types";
    const FROM: &'static str = "pg_catalog.pg_type t \
        LEFT JOIN pg_catalog.pg_namespace n ON n.oid = t.typnamespace";
    const SELECT: &'static [&'static str] =
        &["n.nspname::text AS schema", "t.typname::text AS name"];
    const PREDICATE: Option<&'static str> = Some(
        "(t.typrelid = 0 OR (SELECT c.relkind = 'c' FROM pg_catalog.pg_class c WHERE c.oid = t.typrelid)) \
         AND NOT EXISTS (SELECT 1 FROM pg_catalog.pg_type el WHERE el.oid = t.typelem AND el.typarray = t.oid)",
    );

    fn from_row(row: &CatalogRow) -> Result<Self> {
        Ok(Self {
            schema: row.text("schema")?,
            name: row.text("name")?,
        })
    }
}

/// A label of one type. Both fields are NULL when the type has no enum labels.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumLabelRow {
    pub label: Option<String>,
    pub sort_order: Option<f64>,
}

impl CatalogView for EnumLabelRow {
    const NAME: &'static str = "enum values";
    const FROM: &'static str = "pg_catalog.pg_type t \
        JOIN ONLY pg_catalog.pg_namespace n ON n.oid = t.typnamespace \
        LEFT JOIN pg_catalog.pg_enum e ON t.oid = e.enumtypid";
    const SELECT: &'static [&'static str] = &[
        "e.enumlabel::text AS label",
        "e.enumsortorder::float8 AS sort_order",
    ];

    fn from_row(row: &CatalogRow) -> Result<Self> {
        Ok(Self {
            label: row.opt_text("label")?,
            sort_order: row.opt_float("sort_order")?,
        })
    }
}

fn opt_i32(row: &CatalogRow, column: &str) -> Result<Option<i32>> {
    match row.opt_int(column)? {
        None => Ok(None),
        Some(v) => i32::try_from(v).map(Some).map_err(|_| {
            crate::error::IntrospectError::decode(column, format!("{} out of range for int4", v))
        }),
    }
}

/// `information_schema` yes_or_no domain.
fn yes_or_no(row: &CatalogRow, column: &str) -> Result<bool> {
    Ok(row
        .opt_text(column)?
        .is_some_and(|v| v.eq_ignore_ascii_case("YES")))
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_column_row_decodes_flags_and_nullables() {
        let row = column_row("public", "users", "email", "character varying", "varchar")
            .with("ignored", "x");
        let col = ColumnRow::from_row(&row).unwrap();
        assert_eq!(col.column_name, "email");
        assert!(!col.is_nullable);
        assert!(!col.is_identity);
        assert_eq!(col.column_default, None);
        assert_eq!(col.udt_name.as_deref(), Some("varchar"));
    }

    #[test]
    fn test_column_row_yes_is_nullable() {
        let mut row = CatalogRow::new();
        for (name, value) in [
            ("table_catalog", "app"),
            ("table_schema", "public"),
            ("table_name", "users"),
            ("column_name", "nickname"),
            ("is_nullable", "YES"),
            ("data_type", "text"),
            ("is_identity", "NO"),
            ("column_default", "'anon'::text"),
        ] {
            row.push(name, value);
        }
        for name in [
            "ordinal_position",
            "character_maximum_length",
            "numeric_precision",
            "numeric_scale",
        ] {
            row.push(name, 7);
        }
        row.push("udt_schema", None::<String>);
        row.push("udt_name", None::<String>);

        let col = ColumnRow::from_row(&row).unwrap();
        assert!(col.is_nullable);
        assert_eq!(col.column_default.as_deref(), Some("'anon'::text"));
        assert_eq!(col.character_maximum_length, Some(7));
        assert_eq!(col.udt_name, None);
    }

    #[test]
    fn test_table_row_requires_name() {
        let row = CatalogRow::new()
            .with("table_catalog", "app")
            .with("table_schema", "public")
            .with("table_name", None::<String>)
            .with("table_type", "VIEW");
        assert!(TableRow::from_row(&row).is_err());
    }

    #[test]
    fn test_enum_label_row_allows_nulls() {
        let row = CatalogRow::new()
            .with("label", None::<String>)
            .with("sort_order", None::<f64>);
        let label = EnumLabelRow::from_row(&row).unwrap();
        assert_eq!(label.label, None);
        assert_eq!(label.sort_order, None);

        let label = EnumLabelRow::from_row(&enum_label_row("low", 1.0)).unwrap();
        assert_eq!(label.label.as_deref(), Some("low"));
    }
}
