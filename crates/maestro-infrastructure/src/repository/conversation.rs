//! Blob-store-backed ConversationRepository implementation.

use crate::store::{BlobStore, CONVERSATIONS_KEY};
use async_trait::async_trait;
use maestro_core::conversation::{Conversation, ConversationRepository, Message, Sender};
use maestro_core::error::{MaestroError, Result};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Persists the whole conversation collection as one JSON array under the
/// `conversations` key.
///
/// Every mutation is a read-modify-write of the full collection: read the
/// persisted array, apply the change, write the array back. Reads always go
/// to the store, never to a cached copy, so a write made through another
/// handle to the same store is observed rather than overwritten.
///
/// The read-modify-write runs under `write_lock`. Under tokio the awaits
/// inside a mutation are real interleaving points, so without the critical
/// section two back-to-back appends could both read the same snapshot and
/// the second write would drop the first message.
pub struct JsonConversationRepository {
    store: Arc<dyn BlobStore>,
    write_lock: Mutex<()>,
}

impl JsonConversationRepository {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    async fn load_collection(&self) -> Result<Vec<Conversation>> {
        match self.store.get(CONVERSATIONS_KEY).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save_collection(&self, conversations: &[Conversation]) -> Result<()> {
        let value = serde_json::to_value(conversations)?;
        self.store.set(CONVERSATIONS_KEY, value).await
    }
}

#[async_trait]
impl ConversationRepository for JsonConversationRepository {
    async fn list_by_composer(&self, composer_id: &str) -> Result<Vec<Conversation>> {
        let mut rows: Vec<Conversation> = self
            .load_collection()
            .await?
            .into_iter()
            .filter(|c| c.composer_id == composer_id)
            .collect();

        // Most recent first.
        rows.sort_by(|a, b| Conversation::canonical_order(b, a));
        Ok(rows)
    }

    async fn find_by_id(&self, conversation_id: &str) -> Result<Option<Conversation>> {
        let rows = self.load_collection().await?;
        Ok(rows.into_iter().find(|c| c.id == conversation_id))
    }

    async fn create(&self, composer_id: &str) -> Result<Conversation> {
        let _guard = self.write_lock.lock().await;

        let mut rows = self.load_collection().await?;
        let conversation = Conversation::new(composer_id);
        rows.push(conversation.clone());
        self.save_collection(&rows).await?;

        tracing::debug!(
            "created conversation {} for composer {}",
            conversation.id,
            composer_id
        );
        Ok(conversation)
    }

    async fn append_message(
        &self,
        conversation_id: &str,
        text: &str,
        sender: Sender,
    ) -> Result<Message> {
        let _guard = self.write_lock.lock().await;

        let mut rows = self.load_collection().await?;
        let conversation = rows
            .iter_mut()
            .find(|c| c.id == conversation_id)
            .ok_or_else(|| MaestroError::not_found("Conversation", conversation_id))?;

        let message = conversation.append(text, sender);
        self.save_collection(&rows).await?;
        Ok(message)
    }

    async fn delete_by_id(&self, conversation_id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut rows = self.load_collection().await?;
        let before = rows.len();
        rows.retain(|c| c.id != conversation_id);
        if rows.len() != before {
            self.save_collection(&rows).await?;
        }
        Ok(())
    }

    async fn delete_all_for_composer(&self, composer_id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut rows = self.load_collection().await?;
        let before = rows.len();
        rows.retain(|c| c.composer_id != composer_id);
        if rows.len() != before {
            tracing::debug!(
                "deleted {} conversation(s) for composer {}",
                before - rows.len(),
                composer_id
            );
            self.save_collection(&rows).await?;
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.save_collection(&[]).await
    }
}
