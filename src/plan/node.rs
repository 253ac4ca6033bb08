//! Plan node types

use super::expr::{AggregateExpr, Column, Expr};
use crate::query::OrderDirection;

/// A node in the logical plan tree
#[derive(Debug, Clone, PartialEq)]
pub enum PlanNode {
    /// Scan a table
    Scan(Scan),
    /// Filter rows
    Filter(Filter),
    /// Aggregate (GROUP BY)
    Aggregate(Aggregate),
    /// Project columns
    Project(Project),
    /// Sort rows (ORDER BY)
    Sort(Sort),
    /// Keep the first rows (LIMIT)
    Limit(Limit),
}

/// Scan a table
#[derive(Debug, Clone, PartialEq)]
pub struct Scan {
    /// Engine table name
    pub table: String,
    /// Columns read from the table
    pub columns: Vec<String>,
}

impl Scan {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
        }
    }

    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }
}

/// Filter rows (WHERE clause)
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub input: Box<PlanNode>,
    pub predicate: Expr,
}

/// Aggregate (GROUP BY)
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub input: Box<PlanNode>,
    /// GROUP BY columns
    pub group_by: Vec<Column>,
    pub aggregates: Vec<AggregateExpr>,
}

/// Project specific columns or computed expressions
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub input: Box<PlanNode>,
    pub expressions: Vec<ProjectExpr>,
}

/// A projected expression with its output alias
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectExpr {
    pub expr: Expr,
    /// Output column name
    pub alias: String,
}

/// Sort rows (ORDER BY)
#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    pub input: Box<PlanNode>,
    pub sort_keys: Vec<SortKey>,
}

/// A sort key with direction
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    /// Output column name to sort by
    pub column: String,
    pub direction: OrderDirection,
}

/// Keep at most `count` rows
#[derive(Debug, Clone, PartialEq)]
pub struct Limit {
    pub input: Box<PlanNode>,
    pub count: u64,
}
