//! Conversation domain module.
//!
//! Contains the durable conversation record, its messages, and the
//! repository contract for persisting them.

mod model;
mod repository;

pub use model::{Conversation, Message, Sender};
pub use repository::ConversationRepository;
