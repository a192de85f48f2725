//! Active roster repository trait.

use super::model::TouchOutcome;
use crate::error::Result;
use async_trait::async_trait;

/// Persistence contract for the active roster.
///
/// Implementations load the persisted membership, apply the
/// [`ActiveRoster`](super::ActiveRoster) policy, and write the result back,
/// so the capacity and uniqueness invariants hold across process restarts.
#[async_trait]
pub trait ActiveRosterRepository: Send + Sync {
    /// Marks a composer most-recently-used and persists the new membership.
    ///
    /// When the returned outcome carries an evicted id, the caller must
    /// cascade-delete that composer's conversations; the roster itself is
    /// deliberately ignorant of them.
    async fn touch(&self, composer_id: &str) -> Result<TouchOutcome>;

    /// Removes a composer from the roster; no-op if absent.
    async fn remove(&self, composer_id: &str) -> Result<()>;

    /// Empties the roster.
    async fn clear(&self) -> Result<()>;

    /// Current membership, most-recently-used first.
    async fn list(&self) -> Result<Vec<String>>;
}
