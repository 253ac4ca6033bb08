//! Emitter errors

use thiserror::Error;

use crate::query::QueryAggregationType;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmitError {
    /// Invalid plan structure
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),
    /// `group_by` or `none` used as an aggregate function
    #[error("'{0}' is not an aggregate function")]
    NotAnAggregate(QueryAggregationType),
    /// A literal the engine cannot represent
    #[error("Unsupported literal: {0}")]
    UnsupportedLiteral(String),
}
