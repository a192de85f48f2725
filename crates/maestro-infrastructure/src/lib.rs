//! Storage layer for the maestro workspace.
//!
//! Provides the durable blob store behind the domain repositories:
//!
//! - `store`: the `BlobStore` trait plus the file-backed, in-memory, and
//!   degrading implementations
//! - `repository`: JSON repositories implementing the `maestro-core`
//!   persistence traits via read-modify-write over a blob store
//! - `config`: storage configuration (base directory, roster capacity)

pub mod config;
pub mod repository;
pub mod store;

pub use config::StorageConfig;
pub use repository::{JsonActiveRosterRepository, JsonConversationRepository};
pub use store::{BlobStore, FallbackStore, JsonFileStore, MemoryStore};
