//! Configuration validation.

use std::collections::HashSet;

use super::Config;
use crate::core::identifier::validate_identifier;
use crate::drivers::common::SslMode;
use crate::error::{IntrospectError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    let db = &config.database;
    if db.host.is_empty() {
        return Err(IntrospectError::Config("database.host is required".into()));
    }
    if db.database.is_empty() {
        return Err(IntrospectError::Config(
            "database.database is required".into(),
        ));
    }
    if db.user.is_empty() {
        return Err(IntrospectError::Config("database.user is required".into()));
    }
    if db.port == 0 {
        return Err(IntrospectError::Config(
            "database.port must be non-zero".into(),
        ));
    }
    SslMode::parse(&db.ssl_mode)?;

    validate_schema_names(&config.introspect.schemas)
}

/// Check a requested schema list: non-empty, valid identifiers, no duplicates.
pub fn validate_schema_names(schemas: &[String]) -> Result<()> {
    if schemas.is_empty() {
        return Err(IntrospectError::Config(
            "introspect.schemas must name at least one schema".into(),
        ));
    }
    let mut seen = HashSet::with_capacity(schemas.len());
    for name in schemas {
        validate_identifier(name)?;
        if !seen.insert(name.as_str()) {
            return Err(IntrospectError::Config(format!(
                "schema '{}' is listed more than once",
                name
            )));
        }
    }
    Ok(())
}
