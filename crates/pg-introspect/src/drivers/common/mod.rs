//! Utilities shared by database drivers.
//!
//! - [`tls`]: TLS configuration for PostgreSQL connections

pub mod tls;

pub use tls::{client_config, make_connector, SslMode};
