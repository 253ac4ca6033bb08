//! Filters rendered as hosted-database REST query parameters
//!
//! `{status: {eq: "active"}, id: {in: [1, 2]}}` becomes
//! `[("id", "in.(1,2)"), ("status", "eq.active")]`. An `in` list holding
//! `null` needs an `is.null` alternative, so `{a: {in: [null, "x"]}}`
//! becomes `("or", "(a.is.null,a.in.(x))")`.

use serde_json::Value;

use crate::filters::{FilterOperator, FiltersByColumn};

/// One `(key, "op.value")` pair per operator, ordered by column
pub fn to_postgrest_params(filters: &FiltersByColumn) -> Vec<(String, String)> {
    filters
        .iter()
        .flat_map(|(column, record)| {
            record
                .iter()
                .map(move |(operator, value)| render_param(column, operator, value))
        })
        .collect()
}

/// `a=eq.1&b=in.(x,y)`, without URL encoding
pub fn to_postgrest_query(filters: &FiltersByColumn) -> String {
    to_postgrest_params(filters)
        .into_iter()
        .map(|(column, predicate)| format!("{column}={predicate}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn render_param(column: &str, operator: FilterOperator, value: &Value) -> (String, String) {
    let values = match (operator, value) {
        (FilterOperator::In, Value::Array(values)) if values.iter().any(Value::is_null) => values,
        _ => return (column.to_string(), render_predicate(operator, value)),
    };

    let rest: Vec<Value> = values.iter().filter(|v| !v.is_null()).cloned().collect();
    if rest.is_empty() {
        return (column.to_string(), "is.null".to_string());
    }
    let in_list = render_predicate(FilterOperator::In, &Value::Array(rest));
    ("or".to_string(), format!("({column}.is.null,{column}.{in_list})"))
}

fn render_predicate(operator: FilterOperator, value: &Value) -> String {
    match (operator, value) {
        (FilterOperator::Eq, Value::Null) => "is.null".to_string(),
        (FilterOperator::Eq, v) => format!("eq.{}", render_scalar(v)),
        (FilterOperator::In, Value::Array(values)) => {
            let items: Vec<String> = values.iter().map(|v| quote_list_item(&render_scalar(v))).collect();
            format!("in.({})", items.join(","))
        }
        // Matches nothing, like the in-memory evaluation
        (FilterOperator::In, _) => "in.()".to_string(),
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn quote_list_item(item: &str) -> String {
    let needs_quotes = item.is_empty()
        || item
            .chars()
            .any(|c| matches!(c, ',' | '(' | ')' | '"' | '\\') || c.is_whitespace());
    if needs_quotes {
        format!("\"{}\"", item.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        item.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_sorted_by_column() {
        let filters = FiltersByColumn::new()
            .with("status", FilterOperator::Eq, json!("active"))
            .with("id", FilterOperator::In, json!([1, 2]));
        assert_eq!(
            to_postgrest_params(&filters),
            vec![
                ("id".to_string(), "in.(1,2)".to_string()),
                ("status".to_string(), "eq.active".to_string()),
            ]
        );
        assert_eq!(to_postgrest_query(&filters), "id=in.(1,2)&status=eq.active");
    }

    #[test]
    fn test_eq_null_is_is_null() {
        let filters = FiltersByColumn::new().with("deleted_at", FilterOperator::Eq, Value::Null);
        assert_eq!(to_postgrest_query(&filters), "deleted_at=is.null");
    }

    #[test]
    fn test_list_items_with_reserved_characters_are_quoted() {
        let filters = FiltersByColumn::new().with("city", FilterOperator::In, json!(["Paris", "Washington, D.C.", ""]));
        assert_eq!(
            to_postgrest_query(&filters),
            "city=in.(Paris,\"Washington, D.C.\",\"\")"
        );
    }

    #[test]
    fn test_in_with_null_uses_or() {
        let filters = FiltersByColumn::new().with("a", FilterOperator::In, json!([null, "x"]));
        assert_eq!(to_postgrest_query(&filters), "or=(a.is.null,a.in.(x))");

        let only_null = FiltersByColumn::new().with("a", FilterOperator::In, json!([null]));
        assert_eq!(to_postgrest_query(&only_null), "a=is.null");
    }

    #[test]
    fn test_empty_filters_render_nothing() {
        assert!(to_postgrest_params(&FiltersByColumn::new()).is_empty());
    }
}
