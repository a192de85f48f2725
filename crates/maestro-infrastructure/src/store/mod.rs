//! Durable store abstractions.
//!
//! The durable store is a key-addressed JSON blob store: the only storage
//! medium in the system. Three implementations are available:
//!
//! - `JsonFileStore` - one `<key>.json` file per key under a base directory
//! - `MemoryStore` - in-memory (test double and degradation target)
//! - `FallbackStore` - wraps a primary store and degrades to memory-only
//!   for the rest of the process when the primary fails
//!
//! All implement the same `BlobStore` trait, making them interchangeable.

mod fallback;
mod json_file;
mod memory;

pub use fallback::FallbackStore;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use maestro_core::error::Result;

/// Key under which the conversation collection is persisted.
pub const CONVERSATIONS_KEY: &str = "conversations";

/// Key under which the active roster membership is persisted.
pub const ACTIVE_SESSIONS_KEY: &str = "activeSessions";

/// A key→JSON-blob store, the process-external persistence boundary.
///
/// Handles are passed explicitly into repository constructors; there is no
/// ambient singleton, so tests can substitute a double.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Reads the blob stored under a key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: the key exists
    /// - `Ok(None)`: the key has never been written (absence is not an error)
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Writes the blob stored under a key, replacing any previous value.
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()>;

    /// Deletes the blob stored under a key; no-op if absent.
    async fn remove(&self, key: &str) -> Result<()>;
}
