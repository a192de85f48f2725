//! Reply generation collaborator trait.

use crate::composer::ComposerProfile;
use crate::conversation::Message;
use crate::error::Result;
use async_trait::async_trait;

/// Produces the next assistant message for a conversation.
///
/// Implemented outside this core (LLM backend, scripted canned replies, …).
/// Both methods are fallible and may take unbounded time; the session layer
/// converts failures into placeholder content and never lets them reach the
/// transcript as raw errors.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Prepares the generator for a composer, with the prior transcript.
    ///
    /// Called on activation and after reset. A failure here is tolerated by
    /// the caller; generation simply degrades later.
    async fn initialize(&self, profile: &ComposerProfile, transcript: &[Message]) -> Result<()>;

    /// Generates the reply to a user message.
    async fn generate_reply(&self, user_text: &str) -> Result<String>;
}
