//! Scaffold errors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// No template directory (or no templates) for the requested kind
    #[error("No templates found for kind '{kind}' in '{}'", .dir.display())]
    TemplateNotFound { kind: String, dir: PathBuf },
    /// Name with no letters or digits
    #[error("Invalid name '{0}'")]
    InvalidName(String),
    /// A rendered file name that is not a single path component
    #[error("Template '{template}' renders to invalid file name '{file_name}'")]
    InvalidFileName { template: String, file_name: String },
    /// A target file already exists; nothing was written
    #[error("Refusing to overwrite existing file '{}'", .0.display())]
    AlreadyExists(PathBuf),
    /// A placeholder with no value
    #[error("Template '{template}' uses '{{{{{key}}}}}' but no value was given")]
    MissingParam { template: String, key: String },
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
