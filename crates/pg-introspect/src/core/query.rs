//! Generic "rows of shape T from view V" query builder.

use tracing::debug;

use crate::error::{IntrospectError, Result};

use super::traits::{CatalogExecutor, CatalogView};

#[derive(Debug, Clone, Copy)]
enum Filter<'a> {
    In {
        column: &'a str,
        values: &'a [String],
    },
    Eq {
        column: &'a str,
        value: &'a str,
    },
}

/// Filter and ordering for a [`CatalogView`] query.
///
/// Every filter value is bound as a text parameter; nothing caller-supplied is
/// spliced into the SQL text.
#[derive(Debug, Clone, Default)]
pub struct ViewQuery<'a> {
    filters: Vec<Filter<'a>>,
    order_by: Vec<&'a str>,
}

impl<'a> ViewQuery<'a> {
    /// Unfiltered, unordered query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `column IN (values...)`.
    #[must_use]
    pub fn filter_in(mut self, column: &'a str, values: &'a [String]) -> Self {
        self.filters.push(Filter::In { column, values });
        self
    }

    /// Require `column = value`.
    #[must_use]
    pub fn filter_eq(mut self, column: &'a str, value: &'a str) -> Self {
        self.filters.push(Filter::Eq { column, value });
        self
    }

    /// Append an ORDER BY term.
    #[must_use]
    pub fn order_by(mut self, expr: &'a str) -> Self {
        self.order_by.push(expr);
        self
    }

    /// Render SQL and positional parameters for view `V`.
    pub fn build<V: CatalogView>(&self) -> Result<(String, Vec<String>)> {
        let mut params: Vec<String> = Vec::new();
        let mut conditions: Vec<String> = Vec::new();

        if let Some(predicate) = V::PREDICATE {
            conditions.push(format!("({})", predicate));
        }

        for filter in &self.filters {
            match *filter {
                Filter::In { column, values } => {
                    if values.is_empty() {
                        return Err(IntrospectError::Config(format!(
                            "{}: IN filter on {} needs at least one value",
                            V::NAME,
                            column
                        )));
                    }
                    let spots: Vec<String> = values
                        .iter()
                        .map(|v| {
                            params.push(v.clone());
                            placeholder(params.len())
                        })
                        .collect();
                    conditions.push(format!("{} IN ({})", column, spots.join(", ")));
                }
                Filter::Eq { column, value } => {
                    params.push(value.to_string());
                    conditions.push(format!("{} = {}", column, placeholder(params.len())));
                }
            }
        }

        let mut sql = format!("SELECT {}\nFROM {}", V::SELECT.join(", "), V::FROM);
        if !conditions.is_empty() {
            sql.push_str("\nWHERE ");
            sql.push_str(&conditions.join("\n  AND "));
        }
        if !self.order_by.is_empty() {
            sql.push_str("\nORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }

        Ok((sql, params))
    }

    /// Run the query and decode every row.
    ///
    /// Execution and decode failures are wrapped with the view name; the
    /// result set is fully consumed before returning either way.
    pub async fn fetch<V, E>(&self, executor: &E) -> Result<Vec<V>>
    where
        V: CatalogView,
        E: CatalogExecutor + ?Sized,
    {
        let (sql, params) = self.build::<V>()?;
        debug!("{} query: {} {:?}", V::NAME, sql, params);

        let rows = executor
            .query(&sql, &params)
            .await
            .map_err(|e| e.in_query(V::NAME))?;

        rows.iter()
            .map(|row| V::from_row(row).map_err(|e| e.in_query(V::NAME)))
            .collect()
    }
}

/// PostgreSQL positional placeholder, typed as text.
fn placeholder(index: usize) -> String {
    format!("${}::text", index)
}
