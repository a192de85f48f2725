//! Default stack wiring.

use super::reconciler::SessionReconciler;
use maestro_core::composer::ComposerDirectory;
use maestro_core::generator::ReplyGenerator;
use maestro_infrastructure::{
    BlobStore, FallbackStore, JsonActiveRosterRepository, JsonConversationRepository,
    JsonFileStore, MemoryStore, StorageConfig,
};
use std::sync::Arc;

/// Builds a [`SessionReconciler`] over the default storage stack.
///
/// The file store is wrapped in a [`FallbackStore`], so a broken disk at any
/// point degrades to memory-only operation instead of failing. If the blob
/// directory cannot even be created, the stack starts memory-only outright
/// with a logged warning; the session works either way, history just won't
/// survive a restart.
pub async fn bootstrap(
    config: &StorageConfig,
    generator: Arc<dyn ReplyGenerator>,
    directory: Arc<dyn ComposerDirectory>,
) -> SessionReconciler {
    let store: Arc<dyn BlobStore> = match config.resolve_base_dir() {
        Ok(base_dir) => match JsonFileStore::new(&base_dir).await {
            Ok(primary) => Arc::new(FallbackStore::new(Arc::new(primary))),
            Err(e) => {
                tracing::warn!("blob directory {base_dir:?} unavailable ({e}); starting memory-only");
                Arc::new(MemoryStore::new())
            }
        },
        Err(e) => {
            tracing::warn!("no data directory ({e}); starting memory-only");
            Arc::new(MemoryStore::new())
        }
    };

    let conversations = Arc::new(JsonConversationRepository::new(store.clone()));
    let roster = Arc::new(JsonActiveRosterRepository::new(store, config.capacity));
    SessionReconciler::new(conversations, roster, generator, directory)
}
