use thiserror::Error;

use crate::catalog::CatalogError;
use crate::query::QueryValidationError;

/// Errors that can occur during query resolution
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Query has no data source")]
    MissingDataSource,
    #[error("Query selects no columns")]
    EmptyQuery,
    #[error("Invalid query: {0}")]
    Invalid(#[from] QueryValidationError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Entity config '{0}' is not backed by a dataset")]
    EntityWithoutDataset(String),
    #[error("Column '{column}' does not belong to source '{source_table}'")]
    ColumnNotInSource { column: String, source_table: String },
    #[error("Entity field '{field}' cannot be queried: {reason}")]
    UnresolvableEntityField { field: String, reason: String },
    #[error("Filter references unknown column '{0}'")]
    UnknownFilterColumn(String),
}
