//! JSON repository implementations over the blob store.

mod conversation;
mod roster;

pub use conversation::JsonConversationRepository;
pub use roster::JsonActiveRosterRepository;
