//! Checks on schema names handed to catalog queries.
//!
//! Names are always bound as parameters, never spliced into SQL. The check
//! only rejects names that could never match a `pg_namespace` row.

use crate::error::{IntrospectError, Result};

/// Longest name PostgreSQL stores (`NAMEDATALEN - 1`). Longer identifiers are
/// truncated on creation, so a longer requested name never matches.
pub const MAX_NAME_BYTES: usize = 63;

/// Validate one requested schema name.
pub fn validate_identifier(name: &str) -> Result<()> {
    let problem = if name.is_empty() {
        "must not be empty".to_string()
    } else if name.contains('\0') {
        "contains a NUL byte".to_string()
    } else if name.len() > MAX_NAME_BYTES {
        format!(
            "is {} bytes, PostgreSQL names are at most {}",
            name.len(),
            MAX_NAME_BYTES
        )
    } else {
        return Ok(());
    };

    Err(IntrospectError::Config(format!(
        "schema name {:?} {}",
        name, problem
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_quoted_style_names() {
        assert!(validate_identifier("public").is_ok());
        assert!(validate_identifier("Mixed Case \"quoted\"").is_ok());
        assert!(validate_identifier(&"x".repeat(MAX_NAME_BYTES)).is_ok());
    }

    #[test]
    fn test_rejects_unmatchable_names() {
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("a\0b").is_err());
        let err = validate_identifier(&"x".repeat(MAX_NAME_BYTES + 1)).unwrap_err();
        assert!(err.to_string().contains("at most 63"));
    }

    #[test]
    fn test_length_counts_bytes() {
        // 32 two-byte characters
        assert!(validate_identifier(&"é".repeat(32)).is_err());
        assert!(validate_identifier(&"é".repeat(31)).is_ok());
    }
}
