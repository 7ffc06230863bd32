//! PostgreSQL catalog executor.
//!
//! Implements [`CatalogExecutor`] over a deadpool-postgres pool. Introspection
//! issues its queries one after another, so the pool holds a single
//! connection.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::config::SslMode as PgSslMode;
use tokio_postgres::types::{ToSql, Type};
use tokio_postgres::{Config as PgConfig, Row};
use tracing::{debug, info, warn};

use crate::config::DatabaseConfig;
use crate::core::{CatalogExecutor, CatalogRow, CatalogValue};
use crate::drivers::common::{make_connector, SslMode};
use crate::error::{IntrospectError, Result};

/// Catalog executor backed by a PostgreSQL connection pool.
pub struct PgExecutor {
    pool: Pool,
}

impl PgExecutor {
    /// Open a pool and validate it with `SELECT 1`.
    ///
    /// Failures here are returned as [`IntrospectError::Connection`] and are
    /// not retried.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let target = config.display_target();

        let mut pg_config = PgConfig::new();
        pg_config.host(&config.host);
        pg_config.port(config.port);
        pg_config.dbname(&config.database);
        pg_config.user(&config.user);
        pg_config.password(&config.password);
        pg_config.application_name("pg-introspect");
        if let Some(secs) = config.connect_timeout_secs {
            pg_config.connect_timeout(Duration::from_secs(secs));
        }

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let pool = match make_connector(SslMode::parse(&config.ssl_mode)?)? {
            None => {
                warn!("PostgreSQL TLS is disabled. Credentials will be transmitted in plaintext.");
                let mgr = Manager::from_config(pg_config, tokio_postgres::NoTls, mgr_config);
                Pool::builder(mgr)
                    .max_size(1)
                    .build()
                    .map_err(|e| IntrospectError::connection(e.to_string(), "creating PostgreSQL pool"))?
            }
            Some(tls_connector) => {
                pg_config.ssl_mode(PgSslMode::Require);
                let mgr = Manager::from_config(pg_config, tls_connector, mgr_config);
                Pool::builder(mgr)
                    .max_size(1)
                    .build()
                    .map_err(|e| IntrospectError::connection(e.to_string(), "creating PostgreSQL pool"))?
            }
        };

        let client = pool.get().await.map_err(|e| {
            IntrospectError::connection(e.to_string(), format!("connecting to {}", target))
        })?;
        client.simple_query("SELECT 1").await.map_err(|e| {
            IntrospectError::connection(e.to_string(), format!("validating connection to {}", target))
        })?;

        info!("Connected to PostgreSQL: {}", target);
        Ok(Self { pool })
    }
}

#[async_trait]
impl CatalogExecutor for PgExecutor {
    async fn query(&self, sql: &str, params: &[String]) -> Result<Vec<CatalogRow>> {
        let client = self
            .pool
            .get()
            .await
            .map_err(|e| IntrospectError::connection(e.to_string(), "getting connection for catalog query"))?;

        let bind: Vec<&(dyn ToSql + Sync)> =
            params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();

        // `query` buffers the whole result set and closes the portal before returning
        let rows = client.query(sql, &bind).await?;
        debug!("Catalog query returned {} rows", rows.len());

        rows.iter().map(decode_row).collect()
    }
}

/// Convert a driver row into a [`CatalogRow`] by column type.
fn decode_row(row: &Row) -> Result<CatalogRow> {
    let mut out = CatalogRow::new();
    for (idx, column) in row.columns().iter().enumerate() {
        let name = column.name();
        let ty = column.type_();
        let value = if [Type::TEXT, Type::VARCHAR, Type::NAME, Type::BPCHAR].contains(ty) {
            row.try_get::<_, Option<String>>(idx).map(CatalogValue::from)
        } else if *ty == Type::INT2 {
            row.try_get::<_, Option<i16>>(idx)
                .map(|v| CatalogValue::from(v.map(i64::from)))
        } else if *ty == Type::INT4 {
            row.try_get::<_, Option<i32>>(idx).map(CatalogValue::from)
        } else if *ty == Type::INT8 {
            row.try_get::<_, Option<i64>>(idx).map(CatalogValue::from)
        } else if *ty == Type::OID {
            row.try_get::<_, Option<u32>>(idx)
                .map(|v| CatalogValue::from(v.map(i64::from)))
        } else if *ty == Type::FLOAT4 {
            row.try_get::<_, Option<f32>>(idx)
                .map(|v| CatalogValue::from(v.map(f64::from)))
        } else if *ty == Type::FLOAT8 {
            row.try_get::<_, Option<f64>>(idx).map(CatalogValue::from)
        } else if *ty == Type::BOOL {
            row.try_get::<_, Option<bool>>(idx).map(CatalogValue::from)
        } else {
            return Err(IntrospectError::decode(
                name,
                format!("unsupported column type {}", ty),
            ));
        }
        .map_err(|e| IntrospectError::decode(name, e.to_string()))?;

        out.push(name, value);
    }
    Ok(out)
}
