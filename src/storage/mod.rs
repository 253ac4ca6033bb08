//! Dataset blob storage (verb module)
//!
//! Dataset contents are uploaded as opaque Parquet bytes to one of two
//! buckets. Lookups come in a lenient form ([`ObjectStore::get`], `None` on
//! a miss) and a strict form ([`ObjectStore::get_strict`]).

mod error;
mod local;
mod memory;
mod path;

pub use error::StorageError;
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use path::{Bucket, ObjectPath};

/// Blob storage keyed by [`ObjectPath`]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes`, replacing any existing object
    fn put(&self, path: &ObjectPath, bytes: &[u8]) -> Result<(), StorageError>;

    /// Fetch an object, `Ok(None)` if it does not exist
    fn get(&self, path: &ObjectPath) -> Result<Option<Vec<u8>>, StorageError>;

    /// Remove an object, returning whether it existed
    fn delete(&self, path: &ObjectPath) -> Result<bool, StorageError>;

    /// Fetch an object, failing with [`StorageError::NotFound`] if it does not exist
    fn get_strict(&self, path: &ObjectPath) -> Result<Vec<u8>, StorageError> {
        self.get(path)?
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &ObjectPath) -> Result<bool, StorageError> {
        Ok(self.get(path)?.is_some())
    }
}
