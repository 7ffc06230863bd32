//! PostgreSQL driver.
//!
//! - [`PgExecutor`]: catalog executor over a deadpool-postgres pool

mod executor;

pub use executor::PgExecutor;
