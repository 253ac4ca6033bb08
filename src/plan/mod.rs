//! Logical plan types (noun module)
//!
//! Represents a relational algebra tree that the emitter renders as SQL.

mod expr;
mod node;

pub use expr::{AggregateExpr, Column, Expr, Literal};
pub use node::{Aggregate, Filter, Limit, PlanNode, Project, ProjectExpr, Scan, Sort, SortKey};
