//! SQL emitter
//!
//! Transforms a PlanNode tree into a DuckDB SQL string. Every relational
//! node becomes one SELECT over its input as a subquery.

use crate::plan::{Aggregate, AggregateExpr, Column, Expr, Filter, Literal, PlanNode, Project, Scan, Sort};
use crate::query::{OrderDirection, QueryAggregationType};

use super::error::EmitError;

/// Emit a pretty-printed SQL string from a PlanNode.
pub fn emit_sql(node: &PlanNode) -> Result<String, EmitError> {
    emit_node(node, 0)
}

/// Double-quote an identifier, doubling embedded quotes
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Single-quote a string literal, doubling embedded quotes
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn pad(indent: usize) -> String {
    "  ".repeat(indent)
}

// ---------------------------------------------------------------------------
// Node dispatch
// ---------------------------------------------------------------------------

fn emit_node(node: &PlanNode, indent: usize) -> Result<String, EmitError> {
    match node {
        PlanNode::Scan(scan) => Ok(emit_scan(scan, indent)),
        PlanNode::Filter(filter) => emit_filter(filter, indent),
        PlanNode::Aggregate(agg) => emit_aggregate(agg, indent),
        PlanNode::Project(proj) => emit_project(proj, indent),
        PlanNode::Sort(sort) => emit_sort(sort, None, indent),
        PlanNode::Limit(limit) => match limit.input.as_ref() {
            // ORDER BY and LIMIT share one SELECT so the row order is kept
            PlanNode::Sort(sort) => emit_sort(sort, Some(limit.count), indent),
            input => {
                let p = pad(indent);
                let inner = emit_node(input, indent + 1)?;
                Ok(format!(
                    "{p}SELECT *\n{p}FROM (\n{inner}\n{p}) AS _limited\n{p}LIMIT {count}",
                    count = limit.count,
                ))
            }
        },
    }
}

// ---------------------------------------------------------------------------
// Relation nodes
// ---------------------------------------------------------------------------

fn emit_scan(scan: &Scan, indent: usize) -> String {
    let p = pad(indent);
    let cols = if scan.columns.is_empty() {
        "*".to_string()
    } else {
        scan.columns.iter().map(|c| quote_ident(c)).collect::<Vec<_>>().join(", ")
    };
    format!("{p}SELECT {cols}\n{p}FROM {table}", table = quote_ident(&scan.table))
}

fn emit_filter(filter: &Filter, indent: usize) -> Result<String, EmitError> {
    let p = pad(indent);
    let input = emit_node(&filter.input, indent + 1)?;
    let predicate = emit_expr(&filter.predicate)?;
    Ok(format!(
        "{p}SELECT *\n{p}FROM (\n{input}\n{p}) AS _filtered\n{p}WHERE {predicate}"
    ))
}

fn emit_aggregate(agg: &Aggregate, indent: usize) -> Result<String, EmitError> {
    if agg.group_by.is_empty() && agg.aggregates.is_empty() {
        return Err(EmitError::InvalidPlan(
            "Aggregate has neither group keys nor aggregates".to_string(),
        ));
    }

    let p = pad(indent);
    let input = emit_node(&agg.input, indent + 1)?;

    let group_cols: Vec<String> = agg.group_by.iter().map(emit_column).collect();
    let agg_exprs: Vec<String> = agg
        .aggregates
        .iter()
        .map(emit_aggregate_expr)
        .collect::<Result<Vec<_>, _>>()?;

    let mut select_items = group_cols.clone();
    select_items.extend(agg_exprs);

    let mut sql = format!(
        "{p}SELECT {sel}\n{p}FROM (\n{input}\n{p}) AS _input",
        sel = select_items.join(", "),
    );
    if !group_cols.is_empty() {
        sql.push_str(&format!("\n{p}GROUP BY {}", group_cols.join(", ")));
    }
    Ok(sql)
}

fn emit_project(proj: &Project, indent: usize) -> Result<String, EmitError> {
    if proj.expressions.is_empty() {
        return Err(EmitError::InvalidPlan("Project has no expressions".to_string()));
    }

    let p = pad(indent);
    let input = emit_node(&proj.input, indent + 1)?;

    let items: Vec<String> = proj
        .expressions
        .iter()
        .map(|pe| Ok(format!("{} AS {}", emit_expr(&pe.expr)?, quote_ident(&pe.alias))))
        .collect::<Result<Vec<_>, EmitError>>()?;

    Ok(format!(
        "{p}SELECT {sel}\n{p}FROM (\n{input}\n{p}) AS _projected",
        sel = items.join(", "),
    ))
}

fn emit_sort(sort: &Sort, limit: Option<u64>, indent: usize) -> Result<String, EmitError> {
    if sort.sort_keys.is_empty() {
        return Err(EmitError::InvalidPlan("Sort has no keys".to_string()));
    }

    let p = pad(indent);
    let input = emit_node(&sort.input, indent + 1)?;

    let keys: Vec<String> = sort
        .sort_keys
        .iter()
        .map(|k| {
            let dir = match k.direction {
                OrderDirection::Asc => "ASC",
                OrderDirection::Desc => "DESC",
            };
            format!("{} {}", quote_ident(&k.column), dir)
        })
        .collect();

    let mut sql = format!(
        "{p}SELECT *\n{p}FROM (\n{input}\n{p}) AS _sorted\n{p}ORDER BY {keys}",
        keys = keys.join(", "),
    );
    if let Some(count) = limit {
        sql.push_str(&format!("\n{p}LIMIT {count}"));
    }
    Ok(sql)
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

fn emit_expr(expr: &Expr) -> Result<String, EmitError> {
    match expr {
        Expr::Column(col) => Ok(emit_column(col)),
        Expr::Literal(lit) => emit_literal(lit),
        Expr::Eq(left, right) => Ok(format!("{} = {}", emit_expr(left)?, emit_expr(right)?)),
        Expr::In { expr, values } => {
            if values.is_empty() {
                return Ok("FALSE".to_string());
            }
            let needle = emit_expr(expr)?;
            let vals = values.iter().map(emit_expr).collect::<Result<Vec<_>, _>>()?;
            Ok(format!("{} IN ({})", needle, vals.join(", ")))
        }
        Expr::IsNull(inner) => Ok(format!("{} IS NULL", emit_expr(inner)?)),
        Expr::And(exprs) => match exprs.as_slice() {
            [] => Ok("TRUE".to_string()),
            [single] => emit_expr(single),
            _ => {
                let parts = exprs.iter().map(emit_expr).collect::<Result<Vec<_>, _>>()?;
                Ok(format!("({})", parts.join(" AND ")))
            }
        },
        Expr::Or(exprs) => match exprs.as_slice() {
            [] => Ok("FALSE".to_string()),
            [single] => emit_expr(single),
            _ => {
                let parts = exprs.iter().map(emit_expr).collect::<Result<Vec<_>, _>>()?;
                Ok(format!("({})", parts.join(" OR ")))
            }
        },
    }
}

fn emit_column(col: &Column) -> String {
    quote_ident(&col.name)
}

fn emit_literal(lit: &Literal) -> Result<String, EmitError> {
    match lit {
        Literal::Null => Ok("NULL".to_string()),
        Literal::Bool(b) => Ok(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Literal::Int(i) => Ok(i.to_string()),
        Literal::Float(f) if f.is_finite() => Ok(f.to_string()),
        Literal::Float(f) => Err(EmitError::UnsupportedLiteral(f.to_string())),
        Literal::String(s) => Ok(quote_literal(s)),
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

fn emit_aggregate_expr(agg: &AggregateExpr) -> Result<String, EmitError> {
    let func = match agg.func {
        QueryAggregationType::Sum => "sum",
        QueryAggregationType::Avg => "avg",
        QueryAggregationType::Count => "count",
        QueryAggregationType::Max => "max",
        QueryAggregationType::Min => "min",
        other @ (QueryAggregationType::GroupBy | QueryAggregationType::None) => {
            return Err(EmitError::NotAnAggregate(other));
        }
    };
    Ok(format!("{}({}) AS {}", func, emit_expr(&agg.expr)?, quote_ident(&agg.alias)))
}
