//! Emitters (verb module)
//!
//! Render a PlanNode as DuckDB SQL, and filters as hosted-database REST
//! parameters.

mod error;
mod postgrest;
mod sql;

pub use error::EmitError;
pub use postgrest::{to_postgrest_params, to_postgrest_query};
pub use sql::{emit_sql, quote_ident, quote_literal};
