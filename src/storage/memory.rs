use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;

use super::traits::ObjectStore;
use crate::utils::error::StorageError;

/// In-process object store, keyed by `(bucket, key)`.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: RwLock<HashMap<(String, String), Vec<u8>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, bucket: &str, key: &str, body: impl Into<Vec<u8>>) -> Self {
        self.objects
            .get_mut()
            .insert((bucket.to_string(), key.to_string()), body.into());
        self
    }

    /// Seeds a store with one object read from the local filesystem.
    pub async fn from_file(bucket: &str, key: &str, path: impl AsRef<Path>) -> std::io::Result<Self> {
        let body = tokio::fs::read(path).await?;
        Ok(Self::new().with_object(bucket, key, body))
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let objects = self.objects.read().await;
        objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }
}
