//! Types for resolved query components

use crate::dataset::DataType;
use crate::filters::FiltersByColumn;
use crate::query::{OrderDirection, QueryAggregationType, QueryColumnId, StructuredQuery};

/// A query column mapped onto its engine column
#[derive(Debug, Clone)]
pub struct ResolvedColumn<'a> {
    pub id: &'a QueryColumnId,
    /// Column name in the engine table
    pub physical_name: String,
    /// Name of the column in the result set
    pub output_name: String,
    pub aggregation: Option<QueryAggregationType>,
    pub data_type: DataType,
}

impl ResolvedColumn<'_> {
    pub fn is_aggregating(&self) -> bool {
        self.aggregation.is_some_and(QueryAggregationType::is_aggregating)
    }
}

/// Ordering over a result column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSort {
    pub output_name: String,
    pub direction: OrderDirection,
}

/// A structured query with every reference resolved
#[derive(Debug, Clone)]
pub struct ResolvedQuery<'a> {
    pub query: &'a StructuredQuery,
    /// Engine table to scan
    pub table: &'a str,
    pub columns: Vec<ResolvedColumn<'a>>,
    /// Filters keyed by engine column name
    pub filters: FiltersByColumn,
    pub order_by: Option<ResolvedSort>,
    pub limit: Option<u64>,
}

impl ResolvedQuery<'_> {
    /// True when the result is grouped: some column aggregates or is a
    /// `group_by` key
    pub fn is_aggregated(&self) -> bool {
        self.columns.iter().any(|c| {
            c.is_aggregating() || c.aggregation == Some(QueryAggregationType::GroupBy)
        })
    }
}
