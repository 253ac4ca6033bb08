//! Selectable query columns

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dataset::{DataType, DatasetColumn};
use crate::entity::EntityFieldConfig;

use super::aggregation::{aggregation_column_name, AggregationNaming, QueryAggregationType};

/// Stable identifier of a query column, e.g. `dataset_column:col_42`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryColumnId(String);

impl QueryColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The field a query column selects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "column", rename_all = "camelCase")]
pub enum QueryColumnSource {
    /// A physical column of an uploaded dataset
    DatasetColumn(DatasetColumn),
    /// A field computed for an entity
    EntityField(EntityFieldConfig),
}

impl QueryColumnSource {
    pub fn name(&self) -> &str {
        match self {
            QueryColumnSource::DatasetColumn(column) => &column.name,
            QueryColumnSource::EntityField(field) => &field.name,
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            QueryColumnSource::DatasetColumn(column) => column.data_type,
            QueryColumnSource::EntityField(field) => field.data_type,
        }
    }

    fn id(&self) -> QueryColumnId {
        match self {
            QueryColumnSource::DatasetColumn(column) => QueryColumnId(format!("dataset_column:{}", column.id)),
            QueryColumnSource::EntityField(field) => QueryColumnId(format!("entity_field:{}", field.id)),
        }
    }
}

/// A column selected by a structured query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryColumn {
    pub id: QueryColumnId,
    pub base_column: QueryColumnSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<QueryAggregationType>,
}

impl QueryColumn {
    pub fn new(base_column: QueryColumnSource) -> Self {
        Self {
            id: base_column.id(),
            base_column,
            aggregation: None,
        }
    }

    pub fn from_dataset_column(column: DatasetColumn) -> Self {
        Self::new(QueryColumnSource::DatasetColumn(column))
    }

    pub fn from_entity_field(field: EntityFieldConfig) -> Self {
        Self::new(QueryColumnSource::EntityField(field))
    }

    pub fn with_aggregation(mut self, aggregation: QueryAggregationType) -> Self {
        self.aggregation = Some(aggregation);
        self
    }

    pub fn base_name(&self) -> &str {
        self.base_column.name()
    }

    /// Output column name once any aggregation is applied.
    ///
    /// Unaggregated, `none` and `group_by` columns keep the base name.
    pub fn derived_column_name(&self, naming: &dyn AggregationNaming) -> String {
        match self.aggregation {
            Some(aggregation) => aggregation_column_name(aggregation, self.base_name(), naming),
            None => self.base_name().to_string(),
        }
    }
}
