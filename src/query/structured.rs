//! The structured query value object

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;
use uuid::Uuid;

use crate::filters::Filters;

use super::aggregation::QueryAggregationType;
use super::column::{QueryColumn, QueryColumnId};

/// Current serialization version of [`StructuredQuery`]
pub const STRUCTURED_QUERY_VERSION: u32 = 1;

/// The table a query reads from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DataSource {
    #[serde(rename_all = "camelCase")]
    Dataset { dataset_id: String },
    #[serde(rename_all = "camelCase")]
    Entity { entity_config_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

/// Broken structured query invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryValidationError {
    #[error("Order-by column '{0}' is not one of the query's columns")]
    OrderByColumnMissing(QueryColumnId),
    #[error("Aggregation set for column '{0}', which is not one of the query's columns")]
    AggregationColumnMissing(QueryColumnId),
    #[error("Column '{0}' appears more than once")]
    DuplicateColumn(QueryColumnId),
}

/// A versioned, engine-independent description of a tabular query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    pub id: String,
    pub version: u32,
    pub data_source: Option<DataSource>,
    #[serde(default)]
    pub query_columns: Vec<QueryColumn>,
    pub order_by_column: Option<QueryColumnId>,
    #[serde(default)]
    pub order_by_direction: OrderDirection,
    /// Overrides the aggregation carried by each [`QueryColumn`]
    #[serde(default)]
    pub aggregations: BTreeMap<QueryColumnId, QueryAggregationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Filters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl StructuredQuery {
    /// A new query with a fresh id and nothing selected
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            version: STRUCTURED_QUERY_VERSION,
            data_source: None,
            query_columns: Vec::new(),
            order_by_column: None,
            order_by_direction: OrderDirection::Asc,
            aggregations: BTreeMap::new(),
            filters: None,
            limit: None,
        }
    }

    pub fn with_data_source(mut self, data_source: DataSource) -> Self {
        self.data_source = Some(data_source);
        self
    }

    pub fn with_column(mut self, column: QueryColumn) -> Self {
        self.query_columns.push(column);
        self
    }

    pub fn with_aggregation(mut self, column: &QueryColumnId, aggregation: QueryAggregationType) -> Self {
        self.aggregations.insert(column.clone(), aggregation);
        self
    }

    pub fn with_order_by(mut self, column: &QueryColumnId, direction: OrderDirection) -> Self {
        self.order_by_column = Some(column.clone());
        self.order_by_direction = direction;
        self
    }

    pub fn with_filters(mut self, filters: impl Into<Filters>) -> Self {
        self.filters = Some(filters.into());
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn get_column(&self, id: &QueryColumnId) -> Option<&QueryColumn> {
        self.query_columns.iter().find(|c| &c.id == id)
    }

    /// Aggregation in effect for a column: the query-level map first, then the column's own
    pub fn aggregation_for(&self, column: &QueryColumn) -> Option<QueryAggregationType> {
        self.aggregations.get(&column.id).copied().or(column.aggregation)
    }

    /// Query columns with their effective aggregation folded in
    pub fn effective_columns(&self) -> Vec<QueryColumn> {
        self.query_columns
            .iter()
            .map(|c| QueryColumn {
                aggregation: self.aggregation_for(c),
                ..c.clone()
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), QueryValidationError> {
        let mut seen: HashSet<&QueryColumnId> = HashSet::new();
        for column in &self.query_columns {
            if !seen.insert(&column.id) {
                return Err(QueryValidationError::DuplicateColumn(column.id.clone()));
            }
        }
        if let Some(order_by) = &self.order_by_column {
            if !seen.contains(order_by) {
                return Err(QueryValidationError::OrderByColumnMissing(order_by.clone()));
            }
        }
        if let Some(id) = self.aggregations.keys().find(|id| !seen.contains(id)) {
            return Err(QueryValidationError::AggregationColumnMissing(id.clone()));
        }
        Ok(())
    }
}

impl Default for StructuredQuery {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DataType, DatasetColumn};

    fn column(id: &str, name: &str) -> QueryColumn {
        QueryColumn::from_dataset_column(DatasetColumn {
            id: id.into(),
            dataset_id: "ds_1".into(),
            name: name.into(),
            data_type: DataType::Varchar,
            column_idx: 0,
            description: None,
        })
    }

    #[test]
    fn test_empty_factory() {
        let a = StructuredQuery::empty();
        let b = StructuredQuery::empty();
        assert_ne!(a.id, b.id);
        assert_eq!(a.version, STRUCTURED_QUERY_VERSION);
        assert!(a.data_source.is_none());
        assert!(a.query_columns.is_empty());
        assert!(a.validate().is_ok());
    }

    #[test]
    fn test_order_by_must_reference_a_column() {
        let city = column("col_city", "city");
        let other = column("col_other", "other");
        let query = StructuredQuery::empty()
            .with_column(city.clone())
            .with_order_by(&other.id, OrderDirection::Desc);

        assert_eq!(
            query.validate().unwrap_err(),
            QueryValidationError::OrderByColumnMissing(other.id.clone())
        );

        let query = query.with_order_by(&city.id, OrderDirection::Desc);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_aggregations_must_reference_a_column() {
        let city = column("col_city", "city");
        let query = StructuredQuery::empty()
            .with_aggregation(&city.id, QueryAggregationType::GroupBy);
        assert!(matches!(
            query.validate(),
            Err(QueryValidationError::AggregationColumnMissing(_))
        ));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let city = column("col_city", "city");
        let query = StructuredQuery::empty().with_column(city.clone()).with_column(city);
        assert!(matches!(query.validate(), Err(QueryValidationError::DuplicateColumn(_))));
    }

    #[test]
    fn test_query_level_aggregation_wins() {
        let amount = column("col_amount", "amount").with_aggregation(QueryAggregationType::Sum);
        let query = StructuredQuery::empty()
            .with_column(amount.clone())
            .with_aggregation(&amount.id, QueryAggregationType::Max);

        assert_eq!(query.aggregation_for(&amount), Some(QueryAggregationType::Max));
        assert_eq!(query.effective_columns()[0].aggregation, Some(QueryAggregationType::Max));
    }

    #[test]
    fn test_json_shape_is_camel_case() {
        let query = StructuredQuery::empty()
            .with_data_source(DataSource::Dataset { dataset_id: "ds_1".into() });
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["dataSource"]["type"], "dataset");
        assert_eq!(value["dataSource"]["datasetId"], "ds_1");
        assert_eq!(value["orderByDirection"], "asc");
        assert!(value.get("filters").is_none());
    }
}
