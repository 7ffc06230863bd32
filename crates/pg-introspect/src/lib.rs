//! # pg-introspect
//!
//! Reads PostgreSQL catalog metadata into a language-neutral model for code
//! generation.
//!
//! The library reconciles several loosely joined catalog queries into one
//! tree:
//!
//! - **Tables and columns** from `information_schema`, grouped per schema in
//!   the order schemas were requested
//! - **Type normalization** of `ARRAY` / `USER-DEFINED` columns and bracketed
//!   lengths such as `varchar[32]`
//! - **Enums** from `pg_type` / `pg_enum`, labels in catalog sort order
//!
//! Rows that reference schemas or tables outside the result are reported to a
//! [`DiagnosticSink`] and dropped; query failures abort the whole read.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pg_introspect::{introspect_database, Config, TracingSink};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     let info = introspect_database(&config, Arc::new(TracingSink)).await?;
//!     for schema in &info.schemas {
//!         println!("{}: {} tables", schema.name, schema.tables.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod assembler;
pub mod catalog;
pub mod config;
pub mod core;
pub mod diagnostics;
pub mod drivers;
pub mod enums;
pub mod error;
pub mod normalize;

#[cfg(test)]
mod testing;

// Re-exports for convenient access
pub use assembler::{introspect_database, Introspector};
pub use config::{Config, DatabaseConfig, IntrospectConfig};
pub use crate::core::{
    CatalogExecutor, CatalogInfo, Column, ColumnType, DiagnosticSink, Enum, EnumValue, Schema,
    Table,
};
pub use diagnostics::{Anomaly, MemorySink, TracingSink};
pub use drivers::PgExecutor;
pub use error::{IntrospectError, Result};
pub use normalize::{calculate_length, normalize_type, TypeParseError};
