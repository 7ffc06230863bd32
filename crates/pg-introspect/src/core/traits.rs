//! Traits at the seams of the introspection pipeline.
//!
//! - [`CatalogExecutor`]: runs a parameterized catalog query (PostgreSQL in
//!   production, scripted rows in tests)
//! - [`CatalogView`]: row-decoding contract for one catalog view or join
//! - [`DiagnosticSink`]: receives non-fatal catalog anomalies

use async_trait::async_trait;

use crate::diagnostics::Anomaly;
use crate::error::Result;

use super::value::CatalogRow;

/// Execute catalog queries.
///
/// Parameters bind positionally to `$1..$n`. Implementations must return the
/// complete result set, so no server-side cursor outlives the call.
#[async_trait]
pub trait CatalogExecutor: Send + Sync {
    /// Run `sql` with text parameters and collect every row.
    async fn query(&self, sql: &str, params: &[String]) -> Result<Vec<CatalogRow>>;
}

#[async_trait]
impl<E: CatalogExecutor + ?Sized> CatalogExecutor for &E {
    async fn query(&self, sql: &str, params: &[String]) -> Result<Vec<CatalogRow>> {
        (**self).query(sql, params).await
    }
}

/// A record type read from one catalog view (or fixed join of views).
///
/// [`ViewQuery`](super::query::ViewQuery) renders `SELECT <SELECT> FROM <FROM>
/// WHERE <PREDICATE> AND <filters> ORDER BY <order>` and decodes each row with
/// [`CatalogView::from_row`].
pub trait CatalogView: Sized + Send {
    /// Name used in error context and logs.
    const NAME: &'static str;

    /// FROM clause body; may contain joins.
    const FROM: &'static str;

    /// Select list. Each entry should alias its expression to the column name
    /// `from_row` reads.
    const SELECT: &'static [&'static str];

    /// Fixed predicate ANDed in front of caller filters.
    const PREDICATE: Option<&'static str> = None;

    /// Decode one row.
    fn from_row(row: &CatalogRow) -> Result<Self>;
}

/// Receives catalog anomalies that are dropped rather than raised.
pub trait DiagnosticSink: Send + Sync {
    /// Record one anomaly.
    fn report(&self, anomaly: Anomaly);
}
