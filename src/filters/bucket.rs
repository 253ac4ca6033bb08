//! Conversion between the by-column and by-operator shapes
//!
//! Both directions check each value against its operator's arity and drop
//! mismatches. A drop never fails the conversion; it is logged and counted
//! in the [`BucketReport`] returned by the `_with_report` variants.

use super::shape::{FiltersByColumn, FiltersByOperator};

/// Summary of a bucketing pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketReport {
    /// Tuples whose value did not match the operator's arity
    pub dropped: usize,
}

/// Regroup by-operator filters by column.
///
/// The column key is created even when its only tuple is dropped, so
/// `{eq: [["status", ["a", "b"]]]}` becomes `{status: {}}`.
pub fn bucket_filters_by_column(filters: Option<&FiltersByOperator>) -> FiltersByColumn {
    bucket_filters_by_column_with_report(filters).0
}

pub fn bucket_filters_by_column_with_report(
    filters: Option<&FiltersByOperator>,
) -> (FiltersByColumn, BucketReport) {
    let mut by_column = FiltersByColumn::new();
    let mut report = BucketReport::default();
    let Some(filters) = filters else {
        return (by_column, report);
    };

    for (operator, tuples) in filters.iter() {
        for (column, value) in tuples {
            let record = by_column.entry(column);
            if operator.accepts(value) {
                record.insert(operator, value.clone());
            } else {
                report.dropped += 1;
                tracing::warn!(
                    column = %column,
                    operator = %operator,
                    "dropping filter value with mismatched arity"
                );
            }
        }
    }

    (by_column, report)
}

/// Regroup by-column filters by operator.
pub fn bucket_filters_by_operator(filters: Option<&FiltersByColumn>) -> FiltersByOperator {
    bucket_filters_by_operator_with_report(filters).0
}

pub fn bucket_filters_by_operator_with_report(
    filters: Option<&FiltersByColumn>,
) -> (FiltersByOperator, BucketReport) {
    let mut by_operator = FiltersByOperator::new();
    let mut report = BucketReport::default();
    let Some(filters) = filters else {
        return (by_operator, report);
    };

    for (column, record) in filters.iter() {
        for (operator, value) in record.iter() {
            if operator.accepts(value) {
                by_operator.push(operator, column, value.clone());
            } else {
                report.dropped += 1;
                tracing::warn!(
                    column = %column,
                    operator = %operator,
                    "dropping filter value with mismatched arity"
                );
            }
        }
    }

    (by_operator, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{FilterOperator, OperatorRecord};
    use serde_json::json;

    #[test]
    fn test_none_and_empty_inputs() {
        assert!(bucket_filters_by_column(None).is_empty());
        assert!(bucket_filters_by_operator(None).is_empty());
        assert_eq!(bucket_filters_by_column(Some(&FiltersByOperator::new())), FiltersByColumn::new());
    }

    #[test]
    fn test_by_operator_to_by_column() {
        let by_operator = FiltersByOperator::new()
            .with(FilterOperator::Eq, "status", json!("active"))
            .with(FilterOperator::In, "id", json!(["1", "2"]));

        let by_column = bucket_filters_by_column(Some(&by_operator));

        assert_eq!(by_column.get("status").unwrap().get(FilterOperator::Eq), Some(&json!("active")));
        assert_eq!(by_column.get("id").unwrap().get(FilterOperator::In), Some(&json!(["1", "2"])));
    }

    #[test]
    fn test_arity_mismatch_keeps_column_key() {
        let by_operator: FiltersByOperator =
            serde_json::from_value(json!({"eq": [["status", ["should", "be", "string"]]]})).unwrap();

        let (by_column, report) = bucket_filters_by_column_with_report(Some(&by_operator));

        assert_eq!(report.dropped, 1);
        assert_eq!(by_column.get("status"), Some(&OperatorRecord::new()));
        assert_eq!(serde_json::to_value(&by_column).unwrap(), json!({"status": {}}));
    }

    #[test]
    fn test_reverse_direction_drops_mismatches() {
        let by_column = FiltersByColumn::new()
            .with("status", FilterOperator::In, json!("not-an-array"))
            .with("name", FilterOperator::Eq, json!("Ada"));

        let (by_operator, report) = bucket_filters_by_operator_with_report(Some(&by_column));

        assert_eq!(report.dropped, 1);
        assert_eq!(by_operator.get(FilterOperator::In), None);
        assert_eq!(
            by_operator.get(FilterOperator::Eq).unwrap(),
            &[("name".to_string(), json!("Ada"))]
        );
    }

    #[test]
    fn test_tuple_order_preserved() {
        let by_column = FiltersByColumn::new()
            .with("a", FilterOperator::Eq, json!(1))
            .with("b", FilterOperator::Eq, json!(2))
            .with("c", FilterOperator::Eq, json!(3));

        let by_operator = bucket_filters_by_operator(Some(&by_column));
        let columns: Vec<&str> = by_operator
            .get(FilterOperator::Eq)
            .unwrap()
            .iter()
            .map(|(column, _)| column.as_str())
            .collect();
        assert_eq!(columns, vec!["a", "b", "c"]);
    }
}
