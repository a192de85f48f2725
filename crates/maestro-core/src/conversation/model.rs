//! Conversation and message domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// Message typed by the user.
    User,
    /// Message produced for the composer.
    Assistant,
}

impl Sender {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in a conversation.
///
/// Timestamps are non-decreasing within a conversation: appends go through
/// [`Conversation::append`], which clamps against the previous message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier (UUID format)
    pub id: String,
    /// User-visible content, never empty
    pub text: String,
    /// Who authored the message
    pub sender: Sender,
    /// Logical send time
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a message with a fresh id.
    pub fn new(text: impl Into<String>, sender: Sender, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            timestamp,
        }
    }
}

/// The durable record of one chat thread with a composer.
///
/// Several records may exist for the same composer (reset keeps history
/// around); the one with the greatest `last_updated` is treated as current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Unique identifier (UUID format), assigned at creation, immutable
    pub id: String,
    /// The composer this conversation is with
    pub composer_id: String,
    /// Ordered messages, append-only
    pub messages: Vec<Message>,
    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,
    /// Timestamp of the most recent append
    pub last_updated: DateTime<Utc>,
}

impl Conversation {
    /// Creates an empty conversation for a composer.
    pub fn new(composer_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            composer_id: composer_id.into(),
            messages: Vec::new(),
            created_at: now,
            last_updated: now,
        }
    }

    /// Appends a message and bumps `last_updated`.
    ///
    /// The timestamp is `now`, clamped so it never goes below the previous
    /// message's timestamp (wall clocks can step backwards).
    pub fn append(&mut self, text: impl Into<String>, sender: Sender) -> Message {
        let message = Message::new(text, sender, self.next_timestamp());
        self.last_updated = message.timestamp;
        self.messages.push(message.clone());
        message
    }

    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        match self.messages.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        }
    }

    /// Total ordering for "which conversation is current".
    ///
    /// Greatest `last_updated` wins; ties fall back to greatest `created_at`
    /// (most-recently-created wins), then to the id so the ordering is total.
    pub fn canonical_order(a: &Conversation, b: &Conversation) -> std::cmp::Ordering {
        a.last_updated
            .cmp(&b.last_updated)
            .then(a.created_at.cmp(&b.created_at))
            .then(a.id.cmp(&b.id))
    }

    /// Picks the current conversation from a set of candidates.
    pub fn canonical(conversations: &[Conversation]) -> Option<&Conversation> {
        conversations
            .iter()
            .max_by(|a, b| Self::canonical_order(a, b))
    }
}
