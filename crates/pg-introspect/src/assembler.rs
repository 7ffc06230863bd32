//! Schema assembly: tables, columns and enums merged into one [`CatalogInfo`].
//!
//! Tables and columns come from two independent queries. During assembly a
//! schema index and a per-schema table index locate where each row belongs;
//! both are dropped once the ordered tree is built.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::{ColumnRow, TableRow, COLUMN_SCHEMA_FILTER, TABLE_SCHEMA_FILTER};
use crate::config::{validate_schema_names, Config};
use crate::core::{CatalogExecutor, CatalogInfo, Column, DiagnosticSink, Schema, Table, ViewQuery};
use crate::diagnostics::{Anomaly, RowKind, TracingSink};
use crate::drivers::postgres::PgExecutor;
use crate::enums::collect_enums;
use crate::error::Result;
use crate::normalize::normalize_type;

/// Reads catalog metadata through a [`CatalogExecutor`].
pub struct Introspector<E> {
    executor: E,
    sink: Arc<dyn DiagnosticSink>,
}

/// Tables of one schema while rows are still arriving.
struct SchemaBuilder {
    name: String,
    tables: Vec<Table>,
    index: HashMap<String, usize>,
}

impl SchemaBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tables: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn add_table(&mut self, name: String) {
        if self.index.contains_key(&name) {
            debug!("Table {}.{} listed twice, keeping first", self.name, name);
            return;
        }
        self.index.insert(name.clone(), self.tables.len());
        self.tables.push(Table {
            name,
            schema: self.name.clone(),
            columns: Vec::new(),
        });
    }

    fn table_mut(&mut self, name: &str) -> Option<&mut Table> {
        let idx = *self.index.get(name)?;
        self.tables.get_mut(idx)
    }
}

impl<E: CatalogExecutor> Introspector<E> {
    /// Create an introspector that logs anomalies through `tracing`.
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            sink: Arc::new(TracingSink),
        }
    }

    /// Send anomalies to `sink` instead.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The underlying executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Read the given schemas into a [`CatalogInfo`].
    ///
    /// Schemas appear in the order given. Any query failure aborts the whole
    /// read; rows that reference schemas or tables outside the result are
    /// reported to the sink and dropped.
    pub async fn introspect(&self, schema_names: &[String]) -> Result<CatalogInfo> {
        if schema_names.is_empty() {
            return Ok(CatalogInfo::default());
        }
        validate_schema_names(schema_names)?;

        let lookup: HashMap<&str, usize> = schema_names
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.as_str(), idx))
            .collect();
        let mut builders: Vec<SchemaBuilder> =
            schema_names.iter().map(|n| SchemaBuilder::new(n)).collect();

        info!("Querying tables for schemas {:?}", schema_names);
        let tables: Vec<TableRow> = ViewQuery::new()
            .filter_in(TABLE_SCHEMA_FILTER, schema_names)
            .order_by("table_schema")
            .order_by("table_name")
            .fetch(&self.executor)
            .await?;

        for t in tables {
            match lookup.get(t.table_schema.as_str()) {
                Some(&idx) => builders[idx].add_table(t.table_name),
                None => self.sink.report(Anomaly::UnknownSchema {
                    kind: RowKind::Table,
                    name: t.table_name,
                    schema: t.table_schema,
                }),
            }
        }

        info!("Querying columns for schemas {:?}", schema_names);
        let columns: Vec<ColumnRow> = ViewQuery::new()
            .filter_in(COLUMN_SCHEMA_FILTER, schema_names)
            .order_by("table_schema")
            .order_by("table_name")
            .order_by("ordinal_position")
            .fetch(&self.executor)
            .await?;

        let mut column_count = 0usize;
        for c in columns {
            let Some(&idx) = lookup.get(c.table_schema.as_str()) else {
                self.sink.report(Anomaly::UnknownSchema {
                    kind: RowKind::Column,
                    name: c.column_name,
                    schema: c.table_schema,
                });
                continue;
            };
            if builders[idx].table_mut(&c.table_name).is_none() {
                self.sink.report(Anomaly::UnknownTable {
                    column: c.column_name,
                    table: c.table_name,
                    schema: c.table_schema,
                });
                continue;
            }

            let column = self.to_column(c);
            if let Some(table) = builders[idx].table_mut(&column.orig.table_name) {
                table.columns.push(column);
                column_count += 1;
            }
        }

        let mut enums = collect_enums(&self.executor, schema_names).await?;

        let schemas: Vec<Schema> = builders
            .into_iter()
            .map(|b| Schema {
                enums: enums.remove(&b.name).unwrap_or_default(),
                tables: b.tables,
                name: b.name,
            })
            .collect();
        let result = CatalogInfo { schemas };

        info!(
            "Introspected {} schemas: {} tables, {} columns, {} enums",
            result.schemas.len(),
            result.table_count(),
            column_count,
            result.enum_count()
        );
        Ok(result)
    }

    fn to_column(&self, c: ColumnRow) -> Column {
        let normalized = normalize_type(&c.data_type, c.udt_name.as_deref().unwrap_or(""));
        if let Some(error) = normalized.warning {
            self.sink.report(Anomaly::TypeParse {
                schema: c.table_schema.clone(),
                table: c.table_name.clone(),
                column: c.column_name.clone(),
                error,
            });
        }

        Column {
            name: c.column_name.clone(),
            column_type: normalized.column_type,
            is_nullable: c.is_nullable,
            has_default: c.column_default.as_deref().is_some_and(|d| !d.is_empty()),
            orig: c,
        }
    }
}

/// Connect with `config.database` and read `config.introspect.schemas`.
///
/// Connection failures are fatal and not retried.
pub async fn introspect_database(
    config: &Config,
    sink: Arc<dyn DiagnosticSink>,
) -> Result<CatalogInfo> {
    config.validate()?;
    let executor = PgExecutor::connect(&config.database).await?;
    Introspector::new(executor)
        .with_sink(sink)
        .introspect(&config.introspect.schemas)
        .await
}
