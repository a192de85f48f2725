//! Conversation repository trait.
//!
//! Defines the interface for conversation persistence operations.

use super::model::{Conversation, Message, Sender};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for persisting conversations.
///
/// This trait is the single access path to the durable conversation
/// collection: every read goes to the store, every mutation is a
/// read-modify-write of the whole collection, so a stale in-memory copy can
/// never overwrite a newer persisted one.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Lists all conversations for a composer, most recent first
    /// (ordered by [`Conversation::canonical_order`], descending).
    ///
    /// Absence is not an error: returns an empty vector when the composer
    /// has no conversations.
    async fn list_by_composer(&self, composer_id: &str) -> Result<Vec<Conversation>>;

    /// Reads a single conversation straight from the store.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(conversation))`: the record exists
    /// - `Ok(None)`: no record with that id
    async fn find_by_id(&self, conversation_id: &str) -> Result<Option<Conversation>>;

    /// Allocates a new empty conversation for a composer and persists it.
    async fn create(&self, composer_id: &str) -> Result<Conversation>;

    /// Appends a message to the named conversation and bumps its
    /// `last_updated`, persisting atomically with respect to other appends.
    ///
    /// # Errors
    ///
    /// Returns `MaestroError::NotFound` if the id does not resolve to an
    /// existing record. This is surfaced, never swallowed: losing a user
    /// message silently is a correctness bug.
    async fn append_message(
        &self,
        conversation_id: &str,
        text: &str,
        sender: Sender,
    ) -> Result<Message>;

    /// Removes a conversation. Deleting a non-existent id is a no-op.
    async fn delete_by_id(&self, conversation_id: &str) -> Result<()>;

    /// Removes every conversation belonging to a composer.
    ///
    /// Used by roster eviction and by explicit per-composer removal.
    async fn delete_all_for_composer(&self, composer_id: &str) -> Result<()>;

    /// Wipes the entire collection.
    async fn delete_all(&self) -> Result<()>;
}
