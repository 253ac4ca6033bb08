//! Query resolver (verb module)
//!
//! Turns a [`StructuredQuery`](crate::query::StructuredQuery) into engine
//! table and column names by looking its references up in a
//! [`Catalog`](crate::catalog::Catalog).

mod error;
mod resolve;
mod types;

pub use error::ResolveError;
pub use resolve::{resolve_query, resolve_query_with};
pub use types::{ResolvedColumn, ResolvedQuery, ResolvedSort};
