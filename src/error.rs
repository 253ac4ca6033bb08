//! Error types shared across the crate

use thiserror::Error;

use crate::emitter::EmitError;
use crate::planner::PlanError;
use crate::resolver::ResolveError;

/// Errors that can occur during parsing
#[derive(Debug, Error)]
pub enum ParseError {
    /// IO error reading file
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Structured query has no `version` field
    #[error("Structured query is missing its version")]
    MissingVersion,
    /// Structured query written by a newer release
    #[error("Structured query version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u64, supported: u32 },
}

/// Errors from compiling a structured query to SQL in one call
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Emit(#[from] EmitError),
}
