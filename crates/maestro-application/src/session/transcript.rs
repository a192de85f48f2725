//! Published display state.

use maestro_core::conversation::Message;

/// Where the displayed conversation is in its send cycle.
///
/// The "uninitialized" and "resolving" phases are not observable: before the
/// first activation the reconciler publishes no transcript at all, and
/// resolution replaces the snapshot atomically once it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    /// Idle; the transcript reflects the durable store.
    Ready,
    /// A user message went out and the reply has not arrived yet.
    AwaitingReply,
    /// The last send could not be persisted ("message not sent").
    Undelivered,
}

/// The single source of truth handed to the display layer.
///
/// A snapshot of one conversation: whatever the reconciler last resolved,
/// plus any optimistic echo of a message still being persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    /// Composer the displayed conversation is with
    pub composer_id: String,
    /// Conversation the messages belong to
    pub conversation_id: String,
    /// Messages in display order
    pub messages: Vec<Message>,
    /// Send-cycle state
    pub state: SendState,
}

impl Transcript {
    /// Fresh transcript for a newly resolved conversation.
    pub fn new(
        composer_id: impl Into<String>,
        conversation_id: impl Into<String>,
        messages: Vec<Message>,
    ) -> Self {
        Self {
            composer_id: composer_id.into(),
            conversation_id: conversation_id.into(),
            messages,
            state: SendState::Ready,
        }
    }
}
