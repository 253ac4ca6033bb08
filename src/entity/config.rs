//! Entity config types

use serde::{Deserialize, Serialize};

use crate::dataset::DataType;

/// A user-defined profile type whose field values come from datasets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityConfig {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Dataset whose rows define the entity instances
    pub dataset_id: Option<String>,
    #[serde(default)]
    pub fields: Vec<EntityFieldConfig>,
}

impl EntityConfig {
    pub fn get_field(&self, id: &str) -> Option<&EntityFieldConfig> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn get_field_by_name(&self, name: &str) -> Option<&EntityFieldConfig> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The field marked as the entity's identifier
    pub fn id_field(&self) -> Option<&EntityFieldConfig> {
        self.fields.iter().find(|f| f.is_id_field)
    }

    /// The field marked as the entity's display title
    pub fn title_field(&self) -> Option<&EntityFieldConfig> {
        self.fields.iter().find(|f| f.is_title_field)
    }
}

/// A typed field on an entity config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityFieldConfig {
    pub id: String,
    pub entity_config_id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub data_type: DataType,
    pub value_extractor: ValueExtractor,
    #[serde(default)]
    pub is_id_field: bool,
    #[serde(default)]
    pub is_title_field: bool,
}

/// How a field's value is obtained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueExtractor {
    /// Entered by hand; nothing to compute
    Manual,
    /// Pick one value out of a dataset column
    #[serde(rename_all = "camelCase")]
    DatasetColumnValue {
        dataset_id: String,
        column_id: String,
        value_picker_rule: ValuePickerRule,
    },
    /// Aggregate a dataset column
    #[serde(rename_all = "camelCase")]
    Aggregation {
        dataset_id: String,
        column_id: String,
        aggregation: ExtractorAggregation,
    },
}

impl ValueExtractor {
    /// The dataset column backing this extractor, if any
    pub fn source_column(&self) -> Option<(&str, &str)> {
        match self {
            ValueExtractor::Manual => None,
            ValueExtractor::DatasetColumnValue { dataset_id, column_id, .. }
            | ValueExtractor::Aggregation { dataset_id, column_id, .. } => {
                Some((dataset_id.as_str(), column_id.as_str()))
            }
        }
    }
}

/// Rule for choosing one value among many rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuePickerRule {
    /// The most common non-null value; earliest wins ties
    MostFrequent,
    /// The first non-null value
    First,
}

/// Aggregations available to field extractors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorAggregation {
    Sum,
    Max,
    Count,
}
