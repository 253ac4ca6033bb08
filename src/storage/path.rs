//! Bucket and object key conventions

use std::fmt;

use super::error::StorageError;

/// Storage buckets holding dataset blobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    /// Workspace datasets, keyed `{workspace_id}/{dataset_id}`
    Datasets,
    /// Snapshots served by published dashboards, keyed `{dashboard_id}/{dataset_id}`
    PublishedDatasets,
}

impl Bucket {
    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Datasets => "datasets",
            Bucket::PublishedDatasets => "published-datasets",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location of one object: a bucket plus a `owner/dataset` key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectPath {
    bucket: Bucket,
    key: String,
}

impl ObjectPath {
    /// `datasets/{workspace_id}/{dataset_id}`
    pub fn dataset(workspace_id: &str, dataset_id: &str) -> Result<Self, StorageError> {
        Self::new(Bucket::Datasets, workspace_id, dataset_id)
    }

    /// `published-datasets/{dashboard_id}/{dataset_id}`
    pub fn published_dataset(dashboard_id: &str, dataset_id: &str) -> Result<Self, StorageError> {
        Self::new(Bucket::PublishedDatasets, dashboard_id, dataset_id)
    }

    fn new(bucket: Bucket, owner: &str, dataset_id: &str) -> Result<Self, StorageError> {
        validate_segment(owner)?;
        validate_segment(dataset_id)?;
        Ok(Self {
            bucket,
            key: format!("{owner}/{dataset_id}"),
        })
    }

    pub fn bucket(&self) -> Bucket {
        self.bucket
    }

    /// Key within the bucket
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

// Segments end up as file names in the local store
fn validate_segment(segment: &str) -> Result<(), StorageError> {
    let invalid = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\']);
    if invalid {
        return Err(StorageError::InvalidPath(segment.to_string()));
    }
    Ok(())
}
