//! Row filter predicates (noun module)
//!
//! A predicate set comes in two equivalent shapes:
//! - by column: `{status: {eq: "active"}, id: {in: ["1", "2"]}}`
//! - by operator: `{eq: [["status", "active"]], in: [["id", ["1", "2"]]]}`
//!
//! The hosted database takes the by-column shape; UI code builds lists of
//! tuples. [`bucket_filters_by_column`] and [`bucket_filters_by_operator`]
//! convert between them, and [`apply_filters_to_rows`] evaluates either
//! shape against in-memory rows.

mod bucket;
mod eval;
mod operator;
mod shape;

pub use bucket::{
    bucket_filters_by_column, bucket_filters_by_column_with_report, bucket_filters_by_operator,
    bucket_filters_by_operator_with_report, BucketReport,
};
pub use eval::{apply_filters_to_rows, does_row_pass_filters, does_value_pass_filter, Row};
pub use operator::{Arity, FilterOperator, ParseOperatorError};
pub use shape::{is_empty_filters, FilterDecodeError, Filters, FiltersByColumn, FiltersByOperator, OperatorRecord};
