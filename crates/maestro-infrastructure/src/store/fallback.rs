//! Store wrapper that degrades to memory-only when the primary fails.

use super::{BlobStore, MemoryStore};
use async_trait::async_trait;
use maestro_core::error::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Wraps a primary store and keeps the session functional when it breaks.
///
/// Every successful primary read and every write is mirrored into an
/// in-memory store. The first time the primary reports a store failure
/// (I/O error, quota, corrupt blob), a warning is logged and the wrapper
/// permanently switches to the mirror for the remainder of the process:
/// history written after that point will not survive a restart, but the
/// current session keeps working.
///
/// Errors that are not store failures (e.g. `NotFound`) pass through
/// untouched.
pub struct FallbackStore {
    primary: Arc<dyn BlobStore>,
    mirror: MemoryStore,
    degraded: AtomicBool,
}

impl FallbackStore {
    pub fn new(primary: Arc<dyn BlobStore>) -> Self {
        Self {
            primary,
            mirror: MemoryStore::new(),
            degraded: AtomicBool::new(false),
        }
    }

    /// Whether the wrapper has switched to memory-only operation.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::SeqCst)
    }

    fn degrade(&self, operation: &str, key: &str, error: &maestro_core::MaestroError) {
        if !self.degraded.swap(true, Ordering::SeqCst) {
            tracing::warn!(
                "durable store failed during {operation} of '{key}': {error}; \
                 continuing in-memory, history will not survive a restart"
            );
        }
    }
}

#[async_trait]
impl BlobStore for FallbackStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        if self.is_degraded() {
            return self.mirror.get(key).await;
        }

        match self.primary.get(key).await {
            Ok(Some(value)) => {
                // Keep the mirror warm so a later degradation is seamless.
                self.mirror.set(key, value.clone()).await?;
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) if e.is_store_unavailable() => {
                self.degrade("read", key, &e);
                self.mirror.get(key).await
            }
            Err(e) => Err(e),
        }
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        self.mirror.set(key, value.clone()).await?;
        if self.is_degraded() {
            return Ok(());
        }

        match self.primary.set(key, value).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_store_unavailable() => {
                self.degrade("write", key, &e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.mirror.remove(key).await?;
        if self.is_degraded() {
            return Ok(());
        }

        match self.primary.remove(key).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_store_unavailable() => {
                self.degrade("delete", key, &e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
