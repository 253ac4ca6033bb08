//! Storage errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Strict lookup of an object that does not exist
    #[error("Object '{0}' not found")]
    NotFound(String),
    /// Path segment that is empty or would escape its directory
    #[error("Invalid object path segment '{0}'")]
    InvalidPath(String),
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
