//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;
pub use validation::validate_schema_names;

use crate::error::Result;
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

impl DatabaseConfig {
    /// Build a key/value connection string for tokio-postgres.
    pub fn connection_string(&self) -> String {
        let mut conn = format!(
            "host={} port={} dbname={} user={} password={} sslmode={}",
            self.host, self.port, self.database, self.user, self.password, self.ssl_mode
        );
        if let Some(secs) = self.connect_timeout_secs {
            conn.push_str(&format!(" connect_timeout={}", secs));
        }
        conn
    }

    /// Credential-free description of the target, safe for logs.
    pub fn display_target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
database:
  host: localhost
  database: app
  user: postgres
  password: secret
"#;

    #[test]
    fn test_from_yaml_applies_defaults() {
        let config = Config::from_yaml(MINIMAL).unwrap();
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.ssl_mode, "require");
        assert_eq!(config.database.connect_timeout_secs, None);
        assert_eq!(config.introspect.schemas, vec!["public".to_string()]);
    }

    #[test]
    fn test_from_yaml_reads_schema_list_in_order() {
        let yaml = format!("{}introspect:\n  schemas: [billing, public, audit]\n", MINIMAL);
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.introspect.schemas, vec!["billing", "public", "audit"]);
    }

    #[test]
    fn test_from_yaml_rejects_duplicate_schemas() {
        let yaml = format!("{}introspect:\n  schemas: [public, public]\n", MINIMAL);
        assert!(Config::from_yaml(&yaml).is_err());
    }

    #[test]
    fn test_from_yaml_missing_fields_is_yaml_error() {
        let err = Config::from_yaml("database:\n  host: localhost\n").unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, MINIMAL.as_bytes()).unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.database.database, "app");
    }

    #[test]
    fn test_connection_string() {
        let mut config = Config::from_yaml(MINIMAL).unwrap();
        config.database.connect_timeout_secs = Some(5);
        assert_eq!(
            config.database.connection_string(),
            "host=localhost port=5432 dbname=app user=postgres password=secret sslmode=require connect_timeout=5"
        );
        assert_eq!(config.database.display_target(), "localhost:5432/app");
    }
}
