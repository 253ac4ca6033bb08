//! Planner errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    /// No columns selected
    #[error("Query must select at least one column")]
    EmptyQuery,
    /// Two selected columns would produce the same result column
    #[error("More than one selected column is named '{0}'")]
    DuplicateOutputColumn(String),
}
