//! Expression conversion: filters -> plan expressions

use serde_json::Value;

use crate::filters::{FilterOperator, FiltersByColumn};
use crate::plan::{Column, Expr, Literal};

/// Conjunction of every predicate in `filters`, or `None` when there is nothing to check
pub fn build_filter_predicate(filters: &FiltersByColumn) -> Option<Expr> {
    let mut exprs: Vec<Expr> = filters
        .iter()
        .flat_map(|(column, record)| {
            record
                .iter()
                .map(move |(operator, value)| build_filter_expr(column, operator, value))
        })
        .collect();

    match exprs.len() {
        0 => None,
        1 => exprs.pop(),
        _ => Some(Expr::And(exprs)),
    }
}

/// Build one predicate, matching the in-memory evaluation rules.
///
/// `eq null` becomes `IS NULL`, and `in` against a non-array target is
/// constant false. A `null` inside an `in` list becomes an `IS NULL`
/// alternative, since `x IN (NULL)` never holds in SQL.
pub fn build_filter_expr(column: &str, operator: FilterOperator, value: &Value) -> Expr {
    let column_expr = Expr::Column(Column::new(column));
    match operator {
        FilterOperator::Eq => match value {
            Value::Null => Expr::IsNull(Box::new(column_expr)),
            v => Expr::Eq(Box::new(column_expr), Box::new(Expr::Literal(json_to_literal(v)))),
        },
        FilterOperator::In => match value {
            Value::Array(values) => {
                let has_null = values.iter().any(Value::is_null);
                let literals: Vec<Expr> = values
                    .iter()
                    .filter(|v| !v.is_null())
                    .map(|v| Expr::Literal(json_to_literal(v)))
                    .collect();
                if !has_null {
                    return Expr::In { expr: Box::new(column_expr), values: literals };
                }
                let is_null = Expr::IsNull(Box::new(column_expr.clone()));
                if literals.is_empty() {
                    is_null
                } else {
                    Expr::Or(vec![is_null, Expr::In { expr: Box::new(column_expr), values: literals }])
                }
            }
            _ => Expr::Literal(Literal::Bool(false)),
        },
    }
}

/// Convert a JSON value to a Literal; nested values are compared as JSON text
pub fn json_to_literal(value: &Value) -> Literal {
    match value {
        Value::Null => Literal::Null,
        Value::Bool(b) => Literal::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Literal::Int(i)
            } else if let Some(f) = n.as_f64() {
                Literal::Float(f)
            } else {
                Literal::String(n.to_string())
            }
        }
        Value::String(s) => Literal::String(s.clone()),
        Value::Array(_) | Value::Object(_) => Literal::String(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_filters_have_no_predicate() {
        assert_eq!(build_filter_predicate(&FiltersByColumn::new()), None);
    }

    #[test]
    fn test_single_predicate_is_not_wrapped() {
        let filters = FiltersByColumn::new().with("status", FilterOperator::Eq, json!("active"));
        assert_eq!(
            build_filter_predicate(&filters),
            Some(Expr::Eq(
                Box::new(Expr::Column(Column::new("status"))),
                Box::new(Expr::Literal(Literal::String("active".into()))),
            ))
        );
    }

    #[test]
    fn test_multiple_predicates_are_anded() {
        let filters = FiltersByColumn::new()
            .with("status", FilterOperator::Eq, json!("active"))
            .with("id", FilterOperator::In, json!([1, 2]));
        assert!(matches!(build_filter_predicate(&filters), Some(Expr::And(exprs)) if exprs.len() == 2));
    }

    #[test]
    fn test_eq_null_is_is_null() {
        let expr = build_filter_expr("deleted_at", FilterOperator::Eq, &Value::Null);
        assert!(matches!(expr, Expr::IsNull(_)));
    }

    #[test]
    fn test_in_non_array_is_false() {
        let expr = build_filter_expr("id", FilterOperator::In, &json!("1"));
        assert_eq!(expr, Expr::Literal(Literal::Bool(false)));
    }

    #[test]
    fn test_in_with_null_adds_is_null() {
        let expr = build_filter_expr("status", FilterOperator::In, &json!([null, "open"]));
        let status = || Box::new(Expr::Column(Column::new("status")));
        assert_eq!(
            expr,
            Expr::Or(vec![
                Expr::IsNull(status()),
                Expr::In {
                    expr: status(),
                    values: vec![Expr::Literal(Literal::String("open".into()))],
                },
            ])
        );

        let only_null = build_filter_expr("status", FilterOperator::In, &json!([null]));
        assert_eq!(only_null, Expr::IsNull(status()));
    }

    #[test]
    fn test_json_to_literal() {
        assert_eq!(json_to_literal(&json!(3)), Literal::Int(3));
        assert_eq!(json_to_literal(&json!(2.5)), Literal::Float(2.5));
        assert_eq!(json_to_literal(&json!(true)), Literal::Bool(true));
        assert_eq!(json_to_literal(&json!({"a": 1})), Literal::String("{\"a\":1}".into()));
    }
}
