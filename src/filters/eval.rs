//! Evaluating predicate sets against in-memory rows

use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use super::operator::FilterOperator;
use super::shape::{Filters, FiltersByColumn};

static NULL: Value = Value::Null;

/// A record with string-keyed fields
pub trait Row {
    fn field(&self, name: &str) -> Option<&Value>;
}

impl Row for Map<String, Value> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl Row for HashMap<String, Value> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl Row for BTreeMap<String, Value> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// Evaluate one operator against one value.
///
/// `eq` is strict equality (numbers compare by value). `in` requires an
/// array target and returns `false` for anything else.
pub fn does_value_pass_filter(value: &Value, operator: FilterOperator, target: &Value) -> bool {
    match operator {
        FilterOperator::Eq => strict_equals(value, target),
        FilterOperator::In => match target {
            Value::Array(candidates) => candidates.iter().any(|c| strict_equals(value, c)),
            _ => false,
        },
    }
}

/// True iff every operator of every non-empty column record holds for `row`.
///
/// A field missing from the row is treated as `null`.
pub fn does_row_pass_filters<R: Row + ?Sized>(row: &R, filters: &FiltersByColumn) -> bool {
    filters.iter().all(|(column, record)| {
        let value = row.field(column).unwrap_or(&NULL);
        record
            .iter()
            .all(|(operator, target)| does_value_pass_filter(value, operator, target))
    })
}

/// Keep the rows that pass `filters`.
///
/// Empty filters return the input slice itself, borrowed, not a copy.
pub fn apply_filters_to_rows<'a, R: Row + Clone>(rows: &'a [R], filters: &Filters) -> Cow<'a, [R]> {
    if filters.is_empty() {
        return Cow::Borrowed(rows);
    }

    let by_column = filters.to_by_column();
    let passing: Vec<R> = rows
        .iter()
        .filter(|row| does_row_pass_filters(*row, &by_column))
        .cloned()
        .collect();
    tracing::debug!(input = rows.len(), output = passing.len(), "applied row filters");
    Cow::Owned(passing)
}

fn strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        _ => left == right,
    }
}
