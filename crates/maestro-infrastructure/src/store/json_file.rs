//! File-backed JSON blob store.

use super::BlobStore;
use async_trait::async_trait;
use maestro_core::error::{MaestroError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// A blob store keeping one `<key>.json` file per key.
///
/// Directory structure:
/// ```text
/// base_dir/
/// ├── conversations.json
/// └── activeSessions.json
/// ```
pub struct JsonFileStore {
    base_dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `base_dir`, creating the directory if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).await?;
        Ok(Self { base_dir })
    }

    /// Returns the directory blobs are stored under.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl BlobStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let path = self.blob_path(key);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(MaestroError::store(format!(
                    "failed to read blob {path:?}: {e}"
                )));
            }
        };

        let value = serde_json::from_str(&content)?;
        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        let path = self.blob_path(key);
        let content = serde_json::to_string_pretty(&value).map_err(MaestroError::from)?;
        fs::write(&path, content)
            .await
            .map_err(|e| MaestroError::store(format!("failed to write blob {path:?}: {e}")))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.blob_path(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MaestroError::store(format!(
                "failed to delete blob {path:?}: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn get_returns_none_for_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path()).await.unwrap();
        assert_eq!(store.get("conversations").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path()).await.unwrap();

        let blob = json!({"hello": ["world", 1, 2]});
        store.set("conversations", blob.clone()).await.unwrap();

        assert_eq!(store.get("conversations").await.unwrap(), Some(blob));
    }

    #[tokio::test]
    async fn blobs_survive_a_new_store_instance() {
        let temp_dir = TempDir::new().unwrap();
        let blob = json!(["bach", "chopin"]);

        {
            let store = JsonFileStore::new(temp_dir.path()).await.unwrap();
            store.set("activeSessions", blob.clone()).await.unwrap();
        }

        let reopened = JsonFileStore::new(temp_dir.path()).await.unwrap();
        assert_eq!(reopened.get("activeSessions").await.unwrap(), Some(blob));
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path()).await.unwrap();

        store.set("conversations", json!([])).await.unwrap();
        store.remove("conversations").await.unwrap();
        store.remove("conversations").await.unwrap();
        assert_eq!(store.get("conversations").await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_blob_surfaces_as_store_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path()).await.unwrap();

        std::fs::write(temp_dir.path().join("conversations.json"), "{not json").unwrap();

        let err = store.get("conversations").await.unwrap_err();
        assert!(err.is_store_unavailable());
    }
}
