//! Enum collection.
//!
//! Candidate types come from `pg_type`; each candidate's labels are read from
//! `pg_enum`. A candidate without labels (a composite type, or a base type in a
//! requested schema) is not an enum and is left out.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::catalog::{EnumLabelRow, EnumTypeRow, NAMESPACE_FILTER, TYPE_NAME_FILTER};
use crate::core::{CatalogExecutor, Enum, EnumValue, ViewQuery};
use crate::error::{IntrospectError, Result};

/// Collect enums for the given schemas, keyed by schema name.
///
/// Schemas without enums have no entry. Enums within a schema keep catalog row
/// order. Any failure aborts the whole collection.
pub async fn collect_enums<E>(executor: &E, schemas: &[String]) -> Result<HashMap<String, Vec<Enum>>>
where
    E: CatalogExecutor + ?Sized,
{
    let candidates: Vec<EnumTypeRow> = ViewQuery::new()
        .filter_in(NAMESPACE_FILTER, schemas)
        .order_by("schema")
        .order_by("name")
        .fetch(executor)
        .await
        .map_err(|e| {
            IntrospectError::query(format!("enum names in schemas {:?}", schemas), e.to_string())
        })?;

    let mut enums: HashMap<String, Vec<Enum>> = HashMap::new();
    for candidate in candidates {
        let values = query_values(executor, &candidate.schema, &candidate.name).await?;
        if values.is_empty() {
            debug!(
                "Type {}.{} has no enum labels, skipping",
                candidate.schema, candidate.name
            );
            continue;
        }

        debug!(
            "Enum {}.{}: {} values",
            candidate.schema,
            candidate.name,
            values.len()
        );
        enums.entry(candidate.schema.clone()).or_default().push(Enum {
            name: candidate.name,
            schema: candidate.schema,
            values,
        });
    }

    info!(
        "Collected {} enums across {} schemas",
        enums.values().map(Vec::len).sum::<usize>(),
        enums.len()
    );
    Ok(enums)
}

/// Labels of one type, in catalog sort order.
async fn query_values<E>(executor: &E, schema: &str, name: &str) -> Result<Vec<EnumValue>>
where
    E: CatalogExecutor + ?Sized,
{
    let rows: Vec<EnumLabelRow> = ViewQuery::new()
        .filter_eq(NAMESPACE_FILTER, schema)
        .filter_eq(TYPE_NAME_FILTER, name)
        .order_by("e.enumsortorder")
        .fetch(executor)
        .await
        .map_err(|e| {
            IntrospectError::query(
                format!("enum values for {}.{}", schema, name),
                e.to_string(),
            )
        })?;

    let mut labels: Vec<(f64, String)> = rows
        .into_iter()
        .filter_map(|row| {
            row.label
                .map(|label| (row.sort_order.unwrap_or_default(), label))
        })
        .collect();
    // stable: equal sort orders keep catalog row order
    labels.sort_by(|a, b| a.0.total_cmp(&b.0));

    Ok(labels
        .into_iter()
        .enumerate()
        .map(|(idx, (_, label))| EnumValue {
            label,
            ordinal: idx as i32 + 1,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{enum_label_row, enum_type_row};
    use crate::core::CatalogRow;
    use crate::testing::ScriptedExecutor;

    fn schemas(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_values_follow_sort_order_not_labels() {
        let exec = ScriptedExecutor::new()
            .respond_view::<EnumTypeRow>(vec![enum_type_row("public", "priority")])
            .respond_view_for::<EnumLabelRow>(
                &["public", "priority"],
                vec![
                    enum_label_row("high", 3.0),
                    enum_label_row("low", 1.0),
                    enum_label_row("medium", 2.0),
                ],
            );

        let enums = collect_enums(&exec, &schemas(&["public"])).await.unwrap();
        let priority = &enums["public"][0];
        assert_eq!(priority.name, "priority");
        assert_eq!(priority.schema, "public");
        assert_eq!(priority.labels(), vec!["low", "medium", "high"]);
        let ordinals: Vec<i32> = priority.values.iter().map(|v| v.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_fractional_sort_orders_get_integral_ordinals() {
        let exec = ScriptedExecutor::new()
            .respond_view::<EnumTypeRow>(vec![enum_type_row("public", "size")])
            .respond_view_for::<EnumLabelRow>(
                &["public", "size"],
                vec![
                    enum_label_row("small", 1.0),
                    enum_label_row("large", 2.0),
                    enum_label_row("medium", 1.5),
                ],
            );

        let enums = collect_enums(&exec, &schemas(&["public"])).await.unwrap();
        let size = &enums["public"][0];
        assert_eq!(size.labels(), vec!["small", "medium", "large"]);
        assert_eq!(size.values[2].ordinal, 3);
    }

    #[tokio::test]
    async fn test_schemas_without_enums_are_absent_and_order_is_kept() {
        let exec = ScriptedExecutor::new()
            .respond_view::<EnumTypeRow>(vec![
                enum_type_row("billing", "status"),
                enum_type_row("billing", "currency"),
            ])
            .respond_view_for::<EnumLabelRow>(
                &["billing", "status"],
                vec![enum_label_row("open", 1.0)],
            )
            .respond_view_for::<EnumLabelRow>(
                &["billing", "currency"],
                vec![enum_label_row("usd", 1.0)],
            );

        let enums = collect_enums(&exec, &schemas(&["billing", "public"]))
            .await
            .unwrap();
        assert!(!enums.contains_key("public"));
        let names: Vec<&str> = enums["billing"].iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["status", "currency"]);
    }

    #[tokio::test]
    async fn test_types_without_labels_are_skipped() {
        let exec = ScriptedExecutor::new()
            .respond_view::<EnumTypeRow>(vec![enum_type_row("public", "address")])
            .respond_view_for::<EnumLabelRow>(
                &["public", "address"],
                vec![CatalogRow::new()
                    .with("label", None::<String>)
                    .with("sort_order", None::<f64>)],
            );

        let enums = collect_enums(&exec, &schemas(&["public"])).await.unwrap();
        assert!(enums.is_empty());
    }

    #[tokio::test]
    async fn test_value_query_failure_names_the_enum() {
        let exec = ScriptedExecutor::new()
            .respond_view::<EnumTypeRow>(vec![enum_type_row("public", "mood")])
            .fail_view::<EnumLabelRow>("permission denied for table pg_enum");

        let err = collect_enums(&exec, &schemas(&["public"])).await.unwrap_err();
        match err {
            IntrospectError::Query { context, message } => {
                assert_eq!(context, "enum values for public.mood");
                assert!(message.contains("permission denied"));
            }
            other => panic!("expected Query error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_queries_bind_schema_names() {
        let exec = ScriptedExecutor::new();
        collect_enums(&exec, &schemas(&["a", "b"])).await.unwrap();

        let calls = exec.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.contains("n.nspname IN ($1::text, $2::text)"));
        assert_eq!(calls[0].1, vec!["a", "b"]);
    }
}
