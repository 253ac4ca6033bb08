//! avandar - Filter engine and structured query model for the Avandar data workspace
//!
//! This library provides:
//! - Filter predicates in two interconvertible shapes, and their evaluation over rows
//! - Dataset and entity metadata, with entity field value extraction
//! - Versioned structured queries, lowered to DuckDB SQL
//! - Object storage path conventions and a blob store contract
//! - File scaffolding from templates
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `filters/` - operators, by-column / by-operator shapes, `Filters`
//! - `dataset/` - dataset metadata, `DataType`, `QueryResult`
//! - `entity/` - entity configs and value extractors
//! - `query/` - `StructuredQuery`, `QueryColumn`, `QueryAggregationType`
//! - `catalog/` - datasets and entity configs visible to a workspace
//! - `plan/` - logical plan types (PlanNode, Expr, Column)
//! - `config/` - runtime configuration and feature flags
//!
//! **Verb modules** (transformations):
//! - `parser/` - YAML/JSON → Catalog, Config, StructuredQuery
//! - `resolver/` - Catalog + StructuredQuery → ResolvedQuery
//! - `planner/` - ResolvedQuery → PlanNode
//! - `emitter/` - PlanNode → DuckDB SQL; filters → REST params
//! - `storage/` - dataset blob storage
//! - `scaffold/` - template rendering into files
//!
//! # Example
//!
//! ```ignore
//! use avandar::{parser, resolve_query, plan_query, emit_sql};
//!
//! let catalog = parser::parse_catalog_file("catalog.yaml")?;
//! let query = parser::parse_structured_query_file("query.json")?;
//! let resolved = resolve_query(&catalog, &query)?;
//! let plan = plan_query(&resolved)?;
//! let sql = emit_sql(&plan)?;
//! ```

pub mod filters;
pub mod dataset;
pub mod entity;
pub mod query;
pub mod catalog;
pub mod plan;
pub mod config;
pub mod resolver;
pub mod planner;
pub mod emitter;
pub mod parser;
pub mod storage;
pub mod scaffold;
pub mod error;

// Re-export commonly used types
pub use filters::{
    apply_filters_to_rows, bucket_filters_by_column, bucket_filters_by_operator, does_row_pass_filters,
    is_empty_filters, FilterOperator, Filters, FiltersByColumn, FiltersByOperator, Row,
};
pub use dataset::{DataType, Dataset, DatasetColumn, QueryResult};
pub use entity::{EntityConfig, EntityFieldConfig, ValueExtractor};
pub use query::{
    DataSource, OrderDirection, QueryAggregationType, QueryColumn, QueryColumnId, StructuredQuery,
};
pub use catalog::{Catalog, CatalogError};
pub use config::{Config, FeatureFlags};
pub use resolver::{resolve_query, ResolveError, ResolvedQuery};
pub use plan::{PlanNode, Expr, Column, AggregateExpr};
pub use planner::{plan_query, PlanError};
pub use emitter::{emit_sql, to_postgrest_params, EmitError};
pub use error::{ParseError, QueryError};

/// Resolve, plan and emit a structured query as DuckDB SQL
pub fn compile_query(catalog: &Catalog, query: &StructuredQuery) -> Result<String, QueryError> {
    let resolved = resolve_query(catalog, query)?;
    let plan = plan_query(&resolved)?;
    let sql = emit_sql(&plan)?;
    tracing::debug!(query_id = %query.id, "compiled structured query");
    Ok(sql)
}
