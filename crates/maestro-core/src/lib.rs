//! Domain layer for the maestro conversation system.
//!
//! This crate contains the pure domain models and the repository/collaborator
//! traits the rest of the workspace is built on:
//!
//! - `conversation`: `Conversation`, `Message`, `Sender`, and the
//!   `ConversationRepository` persistence contract
//! - `roster`: the bounded, recency-ordered `ActiveRoster` policy object and
//!   its persistence contract
//! - `composer`: the composer profile boundary types
//! - `generator`: the reply-generation collaborator contract
//! - `error`: the shared `MaestroError` type
//!
//! No I/O happens here; storage backends live in `maestro-infrastructure` and
//! orchestration in `maestro-application`.

pub mod composer;
pub mod conversation;
pub mod error;
pub mod generator;
pub mod roster;

// Re-export common error type
pub use error::MaestroError;
