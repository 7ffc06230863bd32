//! Core abstractions for catalog introspection.
//!
//! - [`schema`]: the normalized output model (schemas, tables, columns, enums)
//! - [`value`]: driver-neutral catalog rows
//! - [`traits`]: executor, view-decoding and diagnostic seams
//! - [`query`]: generic view query builder
//! - [`identifier`]: identifier validation
//!
//! # Architecture
//!
//! The core never talks to a database directly. Catalog reads go through a
//! [`CatalogExecutor`], implemented by `drivers::postgres` in production and
//! by an in-memory script in tests, so assembly logic is testable without a
//! server.

pub mod identifier;
pub mod query;
pub mod schema;
pub mod traits;
pub mod value;

pub use query::ViewQuery;
pub use schema::{CatalogInfo, Column, ColumnType, Enum, EnumValue, Schema, Table};
pub use traits::{CatalogExecutor, CatalogView, DiagnosticSink};
pub use value::{CatalogRow, CatalogValue};
