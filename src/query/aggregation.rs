//! Query aggregation types and aggregate column naming

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Per-column aggregation in a structured query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryAggregationType {
    Sum,
    Avg,
    Count,
    Max,
    Min,
    /// Group rows by this column
    GroupBy,
    /// Select the column as is
    None,
}

impl QueryAggregationType {
    pub const ALL: [QueryAggregationType; 7] = [
        QueryAggregationType::Sum,
        QueryAggregationType::Avg,
        QueryAggregationType::Count,
        QueryAggregationType::Max,
        QueryAggregationType::Min,
        QueryAggregationType::GroupBy,
        QueryAggregationType::None,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QueryAggregationType::Sum => "sum",
            QueryAggregationType::Avg => "avg",
            QueryAggregationType::Count => "count",
            QueryAggregationType::Max => "max",
            QueryAggregationType::Min => "min",
            QueryAggregationType::GroupBy => "group_by",
            QueryAggregationType::None => "none",
        }
    }

    /// True for the types that collapse rows into a computed value
    pub fn is_aggregating(self) -> bool {
        !matches!(self, QueryAggregationType::GroupBy | QueryAggregationType::None)
    }
}

impl fmt::Display for QueryAggregationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an aggregation tag outside the known set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown aggregation '{input}'. Valid options: sum, avg, count, max, min, group_by, none")]
pub struct UnknownAggregationError {
    pub input: String,
}

impl FromStr for QueryAggregationType {
    type Err = UnknownAggregationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sum" => Ok(QueryAggregationType::Sum),
            "avg" => Ok(QueryAggregationType::Avg),
            "count" => Ok(QueryAggregationType::Count),
            "max" => Ok(QueryAggregationType::Max),
            "min" => Ok(QueryAggregationType::Min),
            "group_by" => Ok(QueryAggregationType::GroupBy),
            "none" => Ok(QueryAggregationType::None),
            _ => Err(UnknownAggregationError { input: s.to_string() }),
        }
    }
}

impl<'de> Deserialize<'de> for QueryAggregationType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        QueryAggregationType::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for QueryAggregationType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Names the output column of an aggregated column.
///
/// The analytical engine decides these names, so each engine adapter
/// supplies its own convention.
pub trait AggregationNaming {
    /// Only called with aggregating types.
    fn aggregation_column_name(&self, aggregation: QueryAggregationType, column_name: &str) -> String;
}

/// The embedded engine's own naming for an unaliased aggregate: `sum(amount)`
#[derive(Debug, Clone, Copy, Default)]
pub struct DuckDbNaming;

impl AggregationNaming for DuckDbNaming {
    fn aggregation_column_name(&self, aggregation: QueryAggregationType, column_name: &str) -> String {
        format!("{}({})", aggregation.as_str(), column_name)
    }
}

/// Name the output of `column_name` aggregated by the raw `tag`.
///
/// Fails on an unrecognized tag instead of falling back to the base name.
pub fn get_aggregation_column_name(
    tag: &str,
    column_name: &str,
    naming: &dyn AggregationNaming,
) -> Result<String, UnknownAggregationError> {
    let aggregation = QueryAggregationType::from_str(tag)?;
    Ok(aggregation_column_name(aggregation, column_name, naming))
}

pub(crate) fn aggregation_column_name(
    aggregation: QueryAggregationType,
    column_name: &str,
    naming: &dyn AggregationNaming,
) -> String {
    if aggregation.is_aggregating() {
        naming.aggregation_column_name(aggregation, column_name)
    } else {
        column_name.to_string()
    }
}
