//! Database driver implementations.
//!
//! - [`postgres`]: PostgreSQL catalog executor
//! - [`common`]: Shared utilities (TLS)

pub mod common;
pub mod postgres;

pub use common::SslMode;
pub use postgres::PgExecutor;
