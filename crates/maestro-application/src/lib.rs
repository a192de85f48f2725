//! Orchestration layer for the maestro workspace.
//!
//! Hosts the `SessionReconciler`, the controller that decides which
//! conversation is current for a composer, mediates reads and writes around
//! it, and applies the active-roster eviction policy on every send.

pub mod session;

pub use session::{EvictionCallback, SendState, SessionReconciler, Transcript, bootstrap};
