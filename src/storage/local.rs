//! Directory-backed object store
//!
//! Layout: `{root}/{bucket}/{owner}/{dataset_id}`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::StorageConfig;

use super::error::StorageError;
use super::path::ObjectPath;
use super::ObjectStore;

#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self { root: config.root.clone() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing an object
    pub fn file_path(&self, path: &ObjectPath) -> PathBuf {
        let mut file = self.root.join(path.bucket().as_str());
        file.extend(path.key().split('/'));
        file
    }
}

fn io_error(file: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: file.display().to_string(),
        source,
    }
}

impl ObjectStore for LocalStore {
    fn put(&self, path: &ObjectPath, bytes: &[u8]) -> Result<(), StorageError> {
        let file = self.file_path(path);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        fs::write(&file, bytes).map_err(|e| io_error(&file, e))?;
        tracing::info!(path = %path, file = %file.display(), size = bytes.len(), "stored object");
        Ok(())
    }

    fn get(&self, path: &ObjectPath) -> Result<Option<Vec<u8>>, StorageError> {
        let file = self.file_path(path);
        match fs::read(&file) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&file, e)),
        }
    }

    fn delete(&self, path: &ObjectPath) -> Result<bool, StorageError> {
        let file = self.file_path(path);
        match fs::remove_file(&file) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error(&file, e)),
        }
    }
}
