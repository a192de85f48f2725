//! In-memory blob store.

use super::BlobStore;
use async_trait::async_trait;
use maestro_core::error::Result;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A blob store backed by a plain map.
///
/// Used as the test double for the file store and as the degradation target
/// of [`FallbackStore`](super::FallbackStore). Never fails.
#[derive(Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let blobs = self.blobs.read().await;
        Ok(blobs.get(key).cloned())
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        let mut blobs = self.blobs.write().await;
        blobs.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut blobs = self.blobs.write().await;
        blobs.remove(key);
        Ok(())
    }
}
