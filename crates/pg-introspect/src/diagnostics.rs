//! Non-fatal catalog anomalies and the sinks that receive them.

use std::fmt;
use std::sync::Mutex;

use tracing::warn;

use crate::core::DiagnosticSink;
use crate::normalize::TypeParseError;

/// Which catalog query produced an orphaned row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Table,
    Column,
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKind::Table => f.write_str("table"),
            RowKind::Column => f.write_str("column"),
        }
    }
}

/// A catalog inconsistency that was skipped rather than raised.
#[derive(Debug, Clone, PartialEq)]
pub enum Anomaly {
    /// A row names a schema that was not requested.
    UnknownSchema {
        kind: RowKind,
        name: String,
        schema: String,
    },

    /// A column names a table the tables query did not return.
    UnknownTable {
        column: String,
        table: String,
        schema: String,
    },

    /// A column type carried an unparseable length; the raw type was kept.
    TypeParse {
        schema: String,
        table: String,
        column: String,
        error: TypeParseError,
    },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::UnknownSchema { kind, name, schema } => write!(
                f,
                "{} {:?} references unknown schema {:?}",
                kind, name, schema
            ),
            Anomaly::UnknownTable {
                column,
                table,
                schema,
            } => write!(
                f,
                "column {:?} references unknown table {:?} in schema {:?}",
                column, table, schema
            ),
            Anomaly::TypeParse {
                schema,
                table,
                column,
                error,
            } => write!(f, "column {}.{}.{}: {}", schema, table, column, error),
        }
    }
}

/// Default sink: logs each anomaly as a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, anomaly: Anomaly) {
        warn!("Catalog anomaly: {}", anomaly);
    }
}

/// Sink that keeps every anomaly in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    anomalies: Mutex<Vec<Anomaly>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything reported so far.
    pub fn anomalies(&self) -> Vec<Anomaly> {
        self.anomalies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, anomaly: Anomaly) {
        self.anomalies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(anomaly);
    }
}
