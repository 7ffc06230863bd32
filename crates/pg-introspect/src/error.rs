//! Error types for catalog introspection.

use thiserror::Error;

/// Main error type for introspection operations.
#[derive(Error, Debug)]
pub enum IntrospectError {
    /// Configuration error (invalid YAML, missing fields, bad schema list, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection could not be opened or validated
    #[error("Connection error: {message}\n  Context: {context}")]
    Connection { message: String, context: String },

    /// A catalog query failed
    #[error("Catalog query failed ({context}): {message}")]
    Query { context: String, message: String },

    /// A catalog row could not be decoded
    #[error("Failed to decode column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Driver-level PostgreSQL error
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IntrospectError {
    /// Create a Connection error with context about where it occurred
    pub fn connection(message: impl Into<String>, context: impl Into<String>) -> Self {
        IntrospectError::Connection {
            message: message.into(),
            context: context.into(),
        }
    }

    /// Create a Query error
    pub fn query(context: impl Into<String>, message: impl Into<String>) -> Self {
        IntrospectError::Query {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a Decode error
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        IntrospectError::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Attach query context to an error raised while running or decoding a query.
    ///
    /// Connection and configuration errors pass through untouched.
    pub fn in_query(self, context: impl Into<String>) -> Self {
        match self {
            IntrospectError::Query { .. }
            | IntrospectError::Config(_)
            | IntrospectError::Connection { .. } => self,
            other => IntrospectError::query(context, other.to_string()),
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> u8 {
        match self {
            IntrospectError::Config(_) | IntrospectError::Yaml(_) => 1,
            IntrospectError::Connection { .. } => 2,
            IntrospectError::Query { .. }
            | IntrospectError::Decode { .. }
            | IntrospectError::Database(_) => 3,
            IntrospectError::Json(_) => 4,
            IntrospectError::Io(_) => 7,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for introspection operations.
pub type Result<T> = std::result::Result<T, IntrospectError>;
