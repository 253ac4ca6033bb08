//! Catalog of datasets and entity configs (noun module)
//!
//! Every lookup comes in two forms: `get_*` returns `None` on a miss,
//! `require_*` returns a [`CatalogError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::{Dataset, DatasetColumn};
use crate::entity::EntityConfig;

/// Errors from strict catalog lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Dataset '{0}' not found")]
    DatasetNotFound(String),
    #[error("Entity config '{0}' not found")]
    EntityConfigNotFound(String),
    #[error("Column '{column}' not found in dataset '{dataset}'")]
    ColumnNotFound { dataset: String, column: String },
}

/// The datasets and entity configs visible to a workspace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub datasets: Vec<Dataset>,
    #[serde(default)]
    pub entity_configs: Vec<EntityConfig>,
}

impl Catalog {
    pub fn get_dataset(&self, id: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.id == id)
    }

    pub fn require_dataset(&self, id: &str) -> Result<&Dataset, CatalogError> {
        self.get_dataset(id)
            .ok_or_else(|| CatalogError::DatasetNotFound(id.to_string()))
    }

    pub fn get_entity_config(&self, id: &str) -> Option<&EntityConfig> {
        self.entity_configs.iter().find(|e| e.id == id)
    }

    pub fn require_entity_config(&self, id: &str) -> Result<&EntityConfig, CatalogError> {
        self.get_entity_config(id)
            .ok_or_else(|| CatalogError::EntityConfigNotFound(id.to_string()))
    }

    pub fn get_column(&self, dataset_id: &str, column_id: &str) -> Option<&DatasetColumn> {
        self.get_dataset(dataset_id)?.get_column(column_id)
    }

    pub fn require_column(&self, dataset_id: &str, column_id: &str) -> Result<&DatasetColumn, CatalogError> {
        self.require_dataset(dataset_id)?
            .get_column(column_id)
            .ok_or_else(|| CatalogError::ColumnNotFound {
                dataset: dataset_id.to_string(),
                column: column_id.to_string(),
            })
    }

    /// Datasets owned by a workspace
    pub fn workspace_datasets<'a>(&'a self, workspace_id: &'a str) -> impl Iterator<Item = &'a Dataset> + 'a {
        self.datasets.iter().filter(move |d| d.workspace_id == workspace_id)
    }
}
