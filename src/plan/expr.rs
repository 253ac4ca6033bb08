//! Expression types for the logical plan

use crate::query::QueryAggregationType;

/// An unqualified column reference
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Scalar expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column reference
    Column(Column),
    /// Literal value
    Literal(Literal),
    /// Equality: a = b
    Eq(Box<Expr>, Box<Expr>),
    /// IN expression (column IN (values))
    In {
        expr: Box<Expr>,
        values: Vec<Expr>,
    },
    /// IS NULL check
    IsNull(Box<Expr>),
    /// AND of multiple expressions
    And(Vec<Expr>),
    /// OR of multiple expressions
    Or(Vec<Expr>),
}

/// Literal values
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// An aggregate expression: func(expr) AS alias
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateExpr {
    pub func: QueryAggregationType,
    pub expr: Expr,
    pub alias: String,
}
