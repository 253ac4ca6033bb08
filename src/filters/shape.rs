//! The two predicate-set shapes and the tagged union over them

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use thiserror::Error;

use super::bucket::bucket_filters_by_column;
use super::operator::FilterOperator;

/// Operator → value for a single column, e.g. `{"eq": "active"}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorRecord(BTreeMap<FilterOperator, Value>);

impl OperatorRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, operator: FilterOperator, value: Value) -> Self {
        self.0.insert(operator, value);
        self
    }

    pub fn insert(&mut self, operator: FilterOperator, value: Value) -> Option<Value> {
        self.0.insert(operator, value)
    }

    pub fn get(&self, operator: FilterOperator) -> Option<&Value> {
        self.0.get(&operator)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterOperator, &Value)> {
        self.0.iter().map(|(op, value)| (*op, value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// A record with no operators constrains nothing
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Filters grouped by column: `{column: {operator: value}}`
///
/// This is the shape the hosted database's query builder accepts directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FiltersByColumn(BTreeMap<String, OperatorRecord>);

impl FiltersByColumn {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a single predicate
    pub fn with(mut self, column: impl Into<String>, operator: FilterOperator, value: Value) -> Self {
        self.0.entry(column.into()).or_default().insert(operator, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&OperatorRecord> {
        self.0.get(column)
    }

    pub(crate) fn entry(&mut self, column: &str) -> &mut OperatorRecord {
        self.0.entry(column.to_string()).or_default()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OperatorRecord)> {
        self.0.iter().map(|(column, record)| (column.as_str(), record))
    }

    /// True when no column carries a non-empty operator record
    pub fn is_empty(&self) -> bool {
        self.0.values().all(OperatorRecord::is_empty)
    }
}

impl FromIterator<(String, OperatorRecord)> for FiltersByColumn {
    fn from_iter<I: IntoIterator<Item = (String, OperatorRecord)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Filters grouped by operator: `{operator: [[column, value], ...]}`
///
/// Tuple lists keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FiltersByOperator(BTreeMap<FilterOperator, Vec<(String, Value)>>);

impl FiltersByOperator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, operator: FilterOperator, column: impl Into<String>, value: Value) -> Self {
        self.push(operator, column, value);
        self
    }

    pub fn push(&mut self, operator: FilterOperator, column: impl Into<String>, value: Value) {
        self.0.entry(operator).or_default().push((column.into(), value));
    }

    pub fn get(&self, operator: FilterOperator) -> Option<&[(String, Value)]> {
        self.0.get(&operator).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterOperator, &[(String, Value)])> {
        self.0.iter().map(|(op, tuples)| (*op, tuples.as_slice()))
    }

    /// True when every operator's tuple list is empty
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }
}

/// A predicate set in either shape.
///
/// The shape is fixed when the value is built. Untagged JSON goes through
/// [`Filters::from_untagged`], which resolves the `{}` ambiguity in favor
/// of [`Filters::ByColumn`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "filters", rename_all = "camelCase")]
pub enum Filters {
    ByColumn(FiltersByColumn),
    ByOperator(FiltersByOperator),
}

/// Errors decoding an untagged filter object
#[derive(Debug, Error)]
pub enum FilterDecodeError {
    #[error("Filters must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("Filter object mixes column records and operator lists")]
    MixedShape,
    #[error("Invalid filter object: {0}")]
    Invalid(#[from] serde_json::Error),
}

impl Default for Filters {
    fn default() -> Self {
        Filters::ByColumn(FiltersByColumn::default())
    }
}

impl Filters {
    /// Decode an untagged filter object.
    ///
    /// Tie-break: an empty object, or one whose values are all objects, is
    /// by-column. One whose values are all arrays is by-operator.
    pub fn from_untagged(value: &Value) -> Result<Self, FilterDecodeError> {
        let Value::Object(map) = value else {
            return Err(FilterDecodeError::NotAnObject(json_kind(value)));
        };

        if map.values().all(Value::is_object) {
            let by_column = serde_json::from_value(value.clone())?;
            return Ok(Filters::ByColumn(by_column));
        }
        if map.values().all(Value::is_array) {
            let by_operator = serde_json::from_value(value.clone())?;
            return Ok(Filters::ByOperator(by_operator));
        }
        Err(FilterDecodeError::MixedShape)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Filters::ByColumn(filters) => filters.is_empty(),
            Filters::ByOperator(filters) => filters.is_empty(),
        }
    }

    /// View these filters in by-column shape, bucketing if needed
    pub fn to_by_column(&self) -> Cow<'_, FiltersByColumn> {
        match self {
            Filters::ByColumn(filters) => Cow::Borrowed(filters),
            Filters::ByOperator(filters) => Cow::Owned(bucket_filters_by_column(Some(filters))),
        }
    }
}

impl From<FiltersByColumn> for Filters {
    fn from(filters: FiltersByColumn) -> Self {
        Filters::ByColumn(filters)
    }
}

impl From<FiltersByOperator> for Filters {
    fn from(filters: FiltersByOperator) -> Self {
        Filters::ByOperator(filters)
    }
}

/// `None` counts as no filter at all
pub fn is_empty_filters(filters: Option<&Filters>) -> bool {
    filters.map_or(true, Filters::is_empty)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
