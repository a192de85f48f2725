//! Active roster domain module.
//!
//! The roster is the bounded, recency-ordered set of composers whose chats
//! are currently "open". It drives eviction but knows nothing about
//! conversations; the caller cascades deletion when an eviction is reported.

mod model;
mod repository;

pub use model::{ActiveRoster, TouchOutcome, DEFAULT_CAPACITY};
pub use repository::ActiveRosterRepository;
