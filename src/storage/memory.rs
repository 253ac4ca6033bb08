//! In-process object store

use parking_lot::RwLock;
use std::collections::HashMap;

use super::error::StorageError;
use super::path::ObjectPath;
use super::ObjectStore;

/// Object store backed by a map, for tests and in-process use
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<ObjectPath, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

impl ObjectStore for MemoryStore {
    fn put(&self, path: &ObjectPath, bytes: &[u8]) -> Result<(), StorageError> {
        tracing::info!(path = %path, size = bytes.len(), "storing object in memory");
        self.objects.write().insert(path.clone(), bytes.to_vec());
        Ok(())
    }

    fn get(&self, path: &ObjectPath) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.objects.read().get(path).cloned())
    }

    fn delete(&self, path: &ObjectPath) -> Result<bool, StorageError> {
        Ok(self.objects.write().remove(path).is_some())
    }
}
