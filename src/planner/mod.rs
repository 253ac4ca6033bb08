//! Query planner (verb module)
//!
//! Transforms a ResolvedQuery into a logical plan (PlanNode).

mod build;
mod error;
mod expr;

pub use build::plan_query;
pub use error::PlanError;
pub use expr::{build_filter_expr, build_filter_predicate, json_to_literal};
