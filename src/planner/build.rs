//! Single-source query planning
//!
//! Plan shape: Scan → Filter → Aggregate → Project → Sort → Limit, with
//! each optional stage present only when the query needs it.

use std::collections::HashSet;

use crate::plan::{
    Aggregate, AggregateExpr, Column, Expr, Filter, Limit, PlanNode, Project, ProjectExpr, Scan,
    Sort, SortKey,
};
use crate::resolver::ResolvedQuery;

use super::error::PlanError;
use super::expr::build_filter_predicate;

/// Build a logical plan from a resolved query.
///
/// A query is aggregated when any column aggregates or is marked
/// `group_by`. Then every non-aggregating column (`group_by`, `none` or
/// unset) becomes a GROUP BY key.
pub fn plan_query(resolved: &ResolvedQuery<'_>) -> Result<PlanNode, PlanError> {
    if resolved.columns.is_empty() {
        return Err(PlanError::EmptyQuery);
    }

    let mut output_names: HashSet<&str> = HashSet::new();
    for column in &resolved.columns {
        if !output_names.insert(&column.output_name) {
            return Err(PlanError::DuplicateOutputColumn(column.output_name.clone()));
        }
    }

    let mut scan_columns: Vec<String> = Vec::new();
    let physical_names = resolved
        .columns
        .iter()
        .map(|c| c.physical_name.as_str())
        .chain(resolved.filters.columns());
    for name in physical_names {
        if !scan_columns.iter().any(|c| c == name) {
            scan_columns.push(name.to_string());
        }
    }

    let mut plan = PlanNode::Scan(Scan::new(resolved.table).with_columns(scan_columns));

    if let Some(predicate) = build_filter_predicate(&resolved.filters) {
        plan = PlanNode::Filter(Filter {
            input: Box::new(plan),
            predicate,
        });
    }

    let projections: Vec<ProjectExpr> = if resolved.is_aggregated() {
        let mut group_by: Vec<Column> = Vec::new();
        let mut aggregates: Vec<AggregateExpr> = Vec::new();
        for column in &resolved.columns {
            match column.aggregation.filter(|a| a.is_aggregating()) {
                Some(func) => aggregates.push(AggregateExpr {
                    func,
                    expr: Expr::Column(Column::new(&column.physical_name)),
                    alias: column.output_name.clone(),
                }),
                None => {
                    let key = Column::new(&column.physical_name);
                    if !group_by.contains(&key) {
                        group_by.push(key);
                    }
                }
            }
        }
        tracing::debug!(
            group_by = group_by.len(),
            aggregates = aggregates.len(),
            "planning aggregate"
        );
        plan = PlanNode::Aggregate(Aggregate {
            input: Box::new(plan),
            group_by,
            aggregates,
        });

        // Aggregates are already aliased; group keys still carry engine names
        resolved
            .columns
            .iter()
            .map(|column| {
                let source = if column.is_aggregating() {
                    &column.output_name
                } else {
                    &column.physical_name
                };
                ProjectExpr {
                    expr: Expr::Column(Column::new(source)),
                    alias: column.output_name.clone(),
                }
            })
            .collect()
    } else {
        resolved
            .columns
            .iter()
            .map(|column| ProjectExpr {
                expr: Expr::Column(Column::new(&column.physical_name)),
                alias: column.output_name.clone(),
            })
            .collect()
    };

    plan = PlanNode::Project(Project {
        input: Box::new(plan),
        expressions: projections,
    });

    if let Some(order_by) = &resolved.order_by {
        plan = PlanNode::Sort(Sort {
            input: Box::new(plan),
            sort_keys: vec![SortKey {
                column: order_by.output_name.clone(),
                direction: order_by.direction,
            }],
        });
    }

    if let Some(count) = resolved.limit {
        plan = PlanNode::Limit(Limit {
            input: Box::new(plan),
            count,
        });
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DataType;
    use crate::filters::{FilterOperator, FiltersByColumn};
    use crate::query::{OrderDirection, QueryAggregationType, QueryColumnId, StructuredQuery};
    use crate::resolver::{ResolvedColumn, ResolvedSort};
    use serde_json::json;

    fn resolved<'a>(
        query: &'a StructuredQuery,
        ids: &'a [QueryColumnId],
        columns: &[(&str, &str, Option<QueryAggregationType>)],
    ) -> ResolvedQuery<'a> {
        ResolvedQuery {
            query,
            table: "ds_sales",
            columns: columns
                .iter()
                .zip(ids)
                .map(|((physical, output, aggregation), id)| ResolvedColumn {
                    id,
                    physical_name: physical.to_string(),
                    output_name: output.to_string(),
                    aggregation: *aggregation,
                    data_type: DataType::Varchar,
                })
                .collect(),
            filters: FiltersByColumn::new(),
            order_by: None,
            limit: None,
        }
    }

    fn ids() -> Vec<QueryColumnId> {
        vec![QueryColumnId::new("a"), QueryColumnId::new("b")]
    }

    #[test]
    fn test_plain_select_is_scan_then_project() {
        let query = StructuredQuery::empty();
        let ids = ids();
        let r = resolved(&query, &ids, &[("region", "region", None)]);

        let plan = plan_query(&r).unwrap();
        let PlanNode::Project(project) = plan else {
            panic!("expected project, got {:?}", plan);
        };
        assert!(matches!(*project.input, PlanNode::Scan(ref scan) if scan.columns == vec!["region".to_string()]));
    }

    #[test]
    fn test_aggregate_groups_non_aggregating_columns() {
        let query = StructuredQuery::empty();
        let ids = ids();
        let r = resolved(
            &query,
            &ids,
            &[
                ("region", "region", Some(QueryAggregationType::None)),
                ("amount", "sum(amount)", Some(QueryAggregationType::Sum)),
            ],
        );

        let plan = plan_query(&r).unwrap();
        let PlanNode::Project(project) = plan else {
            panic!("expected project");
        };
        let PlanNode::Aggregate(aggregate) = *project.input else {
            panic!("expected aggregate");
        };
        assert_eq!(aggregate.group_by, vec![Column::new("region")]);
        assert_eq!(aggregate.aggregates[0].alias, "sum(amount)");
        assert_eq!(project.expressions[1].expr, Expr::Column(Column::new("sum(amount)")));
    }

    #[test]
    fn test_group_by_only_still_aggregates() {
        let query = StructuredQuery::empty();
        let ids = ids();
        let r = resolved(&query, &ids, &[("region", "region", Some(QueryAggregationType::GroupBy))]);

        let plan = plan_query(&r).unwrap();
        let PlanNode::Project(project) = plan else {
            panic!("expected project");
        };
        let PlanNode::Aggregate(aggregate) = *project.input else {
            panic!("expected aggregate");
        };
        assert_eq!(aggregate.group_by, vec![Column::new("region")]);
        assert!(aggregate.aggregates.is_empty());
    }

    #[test]
    fn test_filter_sort_and_limit_wrap_in_order() {
        let query = StructuredQuery::empty();
        let ids = ids();
        let mut r = resolved(&query, &ids, &[("region", "region", None)]);
        r.filters = FiltersByColumn::new().with("status", FilterOperator::Eq, json!("open"));
        r.order_by = Some(ResolvedSort { output_name: "region".into(), direction: OrderDirection::Desc });
        r.limit = Some(10);

        let plan = plan_query(&r).unwrap();
        let PlanNode::Limit(limit) = plan else { panic!("expected limit") };
        assert_eq!(limit.count, 10);
        let PlanNode::Sort(sort) = *limit.input else { panic!("expected sort") };
        let PlanNode::Project(project) = *sort.input else { panic!("expected project") };
        let PlanNode::Filter(filter) = *project.input else { panic!("expected filter") };
        let PlanNode::Scan(scan) = *filter.input else { panic!("expected scan") };
        assert_eq!(scan.columns, vec!["region".to_string(), "status".to_string()]);
    }

    #[test]
    fn test_duplicate_output_names_rejected() {
        let query = StructuredQuery::empty();
        let ids = ids();
        let r = resolved(&query, &ids, &[("a", "x", None), ("b", "x", None)]);
        assert!(matches!(plan_query(&r), Err(PlanError::DuplicateOutputColumn(name)) if name == "x"));
    }
}
