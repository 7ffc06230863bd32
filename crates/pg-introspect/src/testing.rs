//! In-memory catalog executor for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::{CatalogExecutor, CatalogRow, CatalogView};
use crate::error::{IntrospectError, Result};

enum Reply {
    Rows(Vec<CatalogRow>),
    Fail(String),
}

struct Rule {
    pattern: String,
    params: Option<Vec<String>>,
    reply: Reply,
}

/// Answers queries whose SQL contains a registered pattern, optionally only
/// for specific parameters. Unmatched queries return no rows. Every call is
/// recorded.
#[derive(Default)]
pub struct ScriptedExecutor {
    rules: Vec<Rule>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, pattern: &str, rows: Vec<CatalogRow>) -> Self {
        self.rules.push(Rule {
            pattern: pattern.to_string(),
            params: None,
            reply: Reply::Rows(rows),
        });
        self
    }

    pub fn respond_view<V: CatalogView>(self, rows: Vec<CatalogRow>) -> Self {
        self.respond(V::FROM, rows)
    }

    pub fn respond_view_for<V: CatalogView>(mut self, params: &[&str], rows: Vec<CatalogRow>) -> Self {
        self.rules.push(Rule {
            pattern: V::FROM.to_string(),
            params: Some(params.iter().map(|p| p.to_string()).collect()),
            reply: Reply::Rows(rows),
        });
        self
    }

    pub fn fail_view<V: CatalogView>(mut self, message: &str) -> Self {
        self.rules.push(Rule {
            pattern: V::FROM.to_string(),
            params: None,
            reply: Reply::Fail(message.to_string()),
        });
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogExecutor for ScriptedExecutor {
    async fn query(&self, sql: &str, params: &[String]) -> Result<Vec<CatalogRow>> {
        self.calls
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));

        let rule = self.rules.iter().find(|rule| {
            sql.contains(&rule.pattern)
                && rule.params.as_ref().map_or(true, |p| p.as_slice() == params)
        });
        match rule.map(|r| &r.reply) {
            Some(Reply::Rows(rows)) => Ok(rows.clone()),
            Some(Reply::Fail(message)) => Err(IntrospectError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                message.clone(),
            ))),
            None => Ok(Vec::new()),
        }
    }
}
