//! Structured query model (noun module)
//!
//! A [`StructuredQuery`] names a data source, the columns to select, their
//! aggregations, ordering and filters, independent of any query language.
//! The resolver and planner lower it into the analytical engine's SQL.

mod aggregation;
mod column;
mod structured;

pub use aggregation::{
    get_aggregation_column_name, AggregationNaming, DuckDbNaming, QueryAggregationType,
    UnknownAggregationError,
};
pub use column::{QueryColumn, QueryColumnId, QueryColumnSource};
pub use structured::{
    DataSource, OrderDirection, QueryValidationError, StructuredQuery, STRUCTURED_QUERY_VERSION,
};
