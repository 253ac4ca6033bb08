//! Dataset metadata and query results (noun module)
//!
//! Datasets are uploaded files (CSV, Google Sheets) loaded into the
//! analytical engine as one table each, named after the dataset id.

mod types;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::filters::{apply_filters_to_rows, Filters};

pub use types::{DataType, ParseDataTypeError};

/// Where a dataset's rows came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetSourceType {
    CsvFile,
    GoogleSheets,
}

/// A column of an uploaded dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetColumn {
    pub id: String,
    pub dataset_id: String,
    pub name: String,
    pub data_type: DataType,
    /// Position of the column in the source file
    #[serde(default)]
    pub column_idx: usize,
    pub description: Option<String>,
}

/// An uploaded dataset and its column metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub description: Option<String>,
    pub source_type: DatasetSourceType,
    #[serde(default)]
    pub columns: Vec<DatasetColumn>,
}

impl Dataset {
    /// Name of the engine table holding this dataset's rows
    pub fn table_name(&self) -> &str {
        &self.id
    }

    pub fn get_column(&self, id: &str) -> Option<&DatasetColumn> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn get_column_by_name(&self, name: &str) -> Option<&DatasetColumn> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// A column in an engine result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResultColumn {
    pub name: String,
    pub data_type: DataType,
}

/// Tabular result returned by the analytical engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub columns: Vec<QueryResultColumn>,
    pub data: Vec<Map<String, Value>>,
    pub num_rows: usize,
}

impl QueryResult {
    pub fn new(columns: Vec<QueryResultColumn>, data: Vec<Map<String, Value>>) -> Self {
        let num_rows = data.len();
        Self { columns, data, num_rows }
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// The rows passing `filters`, with the same columns
    pub fn filter(&self, filters: &Filters) -> QueryResult {
        let data = apply_filters_to_rows(&self.data, filters).into_owned();
        Self::new(self.columns.clone(), data)
    }
}
