//! Blob-store-backed ActiveRosterRepository implementation.

use crate::store::{ACTIVE_SESSIONS_KEY, BlobStore};
use async_trait::async_trait;
use maestro_core::error::Result;
use maestro_core::roster::{ActiveRoster, ActiveRosterRepository, TouchOutcome};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Persists the roster membership as a JSON array of composer ids under the
/// `activeSessions` key, most-recently-used first.
///
/// Each mutation loads the persisted membership, applies the
/// [`ActiveRoster`] policy, and writes the result back, all under one
/// critical section so the capacity invariant holds even when touches
/// interleave.
pub struct JsonActiveRosterRepository {
    store: Arc<dyn BlobStore>,
    capacity: usize,
    write_lock: Mutex<()>,
}

impl JsonActiveRosterRepository {
    pub fn new(store: Arc<dyn BlobStore>, capacity: usize) -> Self {
        Self {
            store,
            capacity,
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<ActiveRoster> {
        let members = match self.store.get(ACTIVE_SESSIONS_KEY).await? {
            Some(value) => serde_json::from_value(value)?,
            None => Vec::new(),
        };
        Ok(ActiveRoster::from_members(members, self.capacity))
    }

    async fn save(&self, roster: &ActiveRoster) -> Result<()> {
        let value = serde_json::to_value(roster.members())?;
        self.store.set(ACTIVE_SESSIONS_KEY, value).await
    }
}

#[async_trait]
impl ActiveRosterRepository for JsonActiveRosterRepository {
    async fn touch(&self, composer_id: &str) -> Result<TouchOutcome> {
        let _guard = self.write_lock.lock().await;

        let mut roster = self.load().await?;
        let outcome = roster.touch(composer_id);
        self.save(&roster).await?;

        if let Some(evicted) = &outcome.evicted {
            tracing::info!("roster full, evicting composer {evicted}");
        }
        Ok(outcome)
    }

    async fn remove(&self, composer_id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut roster = self.load().await?;
        if roster.remove(composer_id) {
            self.save(&roster).await?;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut roster = self.load().await?;
        roster.clear();
        self.save(&roster).await
    }

    async fn list(&self) -> Result<Vec<String>> {
        Ok(self.load().await?.members().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn repository(capacity: usize) -> (Arc<MemoryStore>, JsonActiveRosterRepository) {
        let store = Arc::new(MemoryStore::new());
        let repository = JsonActiveRosterRepository::new(store.clone(), capacity);
        (store, repository)
    }

    #[tokio::test]
    async fn touch_sequence_orders_most_recent_first() {
        let (_, repository) = repository(5);
        for id in ["a", "b", "c", "d", "e"] {
            assert_eq!(repository.touch(id).await.unwrap().evicted, None);
        }
        assert_eq!(repository.list().await.unwrap(), ["e", "d", "c", "b", "a"]);
    }

    #[tokio::test]
    async fn sixth_touch_reports_the_evicted_composer() {
        let (_, repository) = repository(5);
        for id in ["a", "b", "c", "d", "e"] {
            repository.touch(id).await.unwrap();
        }

        let outcome = repository.touch("f").await.unwrap();
        assert_eq!(outcome.evicted.as_deref(), Some("a"));
        assert_eq!(outcome.members, ["f", "e", "d", "c", "b"]);
        assert_eq!(repository.list().await.unwrap(), ["f", "e", "d", "c", "b"]);
    }

    #[tokio::test]
    async fn membership_survives_a_new_repository_instance() {
        let (store, repository) = repository(5);
        repository.touch("bach").await.unwrap();
        repository.touch("chopin").await.unwrap();

        let reopened = JsonActiveRosterRepository::new(store, 5);
        assert_eq!(reopened.list().await.unwrap(), ["chopin", "bach"]);
    }

    #[tokio::test]
    async fn remove_and_clear_persist() {
        let (store, repository) = repository(5);
        repository.touch("bach").await.unwrap();
        repository.touch("chopin").await.unwrap();

        repository.remove("bach").await.unwrap();
        assert_eq!(repository.list().await.unwrap(), ["chopin"]);

        repository.clear().await.unwrap();
        assert!(repository.list().await.unwrap().is_empty());

        let reopened = JsonActiveRosterRepository::new(store, 5);
        assert!(reopened.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn capacity_shrink_drops_the_least_recent_members() {
        // A persisted membership larger than the configured capacity is
        // trimmed from the least-recently-used end on load.
        let (store, repository) = repository(5);
        for id in ["a", "b", "c", "d", "e"] {
            repository.touch(id).await.unwrap();
        }

        let narrowed = JsonActiveRosterRepository::new(store, 3);
        assert_eq!(narrowed.list().await.unwrap(), ["e", "d", "c"]);
    }
}
