//! Session reconciler: the per-composer conversation controller.

use super::transcript::{SendState, Transcript};
use chrono::Utc;
use maestro_core::composer::{ComposerDirectory, ComposerProfile};
use maestro_core::conversation::{Conversation, ConversationRepository, Message, Sender};
use maestro_core::error::{MaestroError, Result};
use maestro_core::generator::ReplyGenerator;
use maestro_core::roster::ActiveRosterRepository;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Callback invoked once per eviction with the evicted composer's id.
pub type EvictionCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Resolves which conversation is current for a composer and mediates all
/// reads and writes around it.
///
/// The reconciler owns the published [`Transcript`], the one snapshot the
/// display layer renders, and keeps it consistent with the durable store
/// across activations, optimistic sends, resets, and evictions. All
/// collaborators are injected as trait handles, so the whole controller runs
/// against test doubles.
pub struct SessionReconciler {
    conversations: Arc<dyn ConversationRepository>,
    roster: Arc<dyn ActiveRosterRepository>,
    generator: Arc<dyn ReplyGenerator>,
    directory: Arc<dyn ComposerDirectory>,
    /// Published display state; `None` until the first activation.
    transcript: RwLock<Option<Transcript>>,
    eviction_callback: RwLock<Option<EvictionCallback>>,
}

impl SessionReconciler {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        roster: Arc<dyn ActiveRosterRepository>,
        generator: Arc<dyn ReplyGenerator>,
        directory: Arc<dyn ComposerDirectory>,
    ) -> Self {
        Self {
            conversations,
            roster,
            generator,
            directory,
            transcript: RwLock::new(None),
            eviction_callback: RwLock::new(None),
        }
    }

    /// Registers the callback fired when a composer is evicted.
    pub async fn set_eviction_callback(&self, callback: EvictionCallback) {
        *self.eviction_callback.write().await = Some(callback);
    }

    /// Current published transcript, if any composer has been activated.
    pub async fn transcript(&self) -> Option<Transcript> {
        self.transcript.read().await.clone()
    }

    /// Composers currently on the active roster, most-recently-used first.
    pub async fn active_composers(&self) -> Result<Vec<String>> {
        self.roster.list().await
    }

    /// Activates a composer: resolves their current conversation and
    /// publishes it as the displayed transcript.
    ///
    /// Activation is a read path; it does not bump the composer's roster
    /// recency. Only a user-authored send does that.
    pub async fn activate(&self, composer_id: &str) -> Result<Transcript> {
        let conversation = self.resolve_or_create(composer_id).await?;

        let profile = self.profile_for(composer_id);
        if let Err(e) = self
            .generator
            .initialize(&profile, &conversation.messages)
            .await
        {
            tracing::warn!("generator initialization failed for composer {composer_id}: {e}");
        }

        let transcript = Transcript::new(composer_id, conversation.id, conversation.messages);
        *self.transcript.write().await = Some(transcript.clone());
        Ok(transcript)
    }

    /// Sends a user message to a composer.
    ///
    /// The message is echoed into the displayed transcript immediately, then
    /// persisted, then the composer is bumped on the roster (cascading an
    /// eviction if one falls out), and finally a reply is generated and
    /// appended. No lock is held across the generator call, so further input
    /// is never blocked on a slow reply.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the target conversation vanished and the
    /// retry against a freshly resolved conversation failed as well; the
    /// published transcript is marked [`SendState::Undelivered`] in that
    /// case.
    pub async fn send(&self, composer_id: &str, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MaestroError::internal("message text must not be empty"));
        }

        // Optimistic echo so the interface never appears to block. The echo
        // is swapped for the persisted record once the append completes;
        // persistence failure degrades the state instead of rolling back.
        let pending = Message::new(text, Sender::User, Utc::now());
        {
            let mut current = self.transcript.write().await;
            if let Some(shown) = current.as_mut() {
                if shown.composer_id == composer_id {
                    shown.messages.push(pending.clone());
                    shown.state = SendState::AwaitingReply;
                }
            }
        }

        // Resolve the target conversation: the displayed one if this
        // composer is on screen, otherwise whatever the store considers
        // current (creating on first contact).
        let displayed_id = {
            let current = self.transcript.read().await;
            current
                .as_ref()
                .filter(|shown| shown.composer_id == composer_id)
                .map(|shown| shown.conversation_id.clone())
        };
        let mut conversation_id = match displayed_id {
            Some(id) => id,
            None => self.resolve_or_create(composer_id).await?.id,
        };

        // Persist the user message, retrying once if the id went stale.
        let persisted = match self
            .conversations
            .append_message(&conversation_id, text, Sender::User)
            .await
        {
            Ok(message) => message,
            Err(e) if e.is_not_found() => {
                tracing::warn!(
                    "conversation {conversation_id} vanished, re-resolving for composer {composer_id}"
                );
                let fresh = self.resolve_or_create(composer_id).await?;
                conversation_id = fresh.id;
                match self
                    .conversations
                    .append_message(&conversation_id, text, Sender::User)
                    .await
                {
                    Ok(message) => message,
                    Err(second) => {
                        self.mark_undelivered(composer_id).await;
                        return Err(second);
                    }
                }
            }
            Err(e) => return Err(e),
        };

        // Reconcile the optimistic echo with the persisted record.
        {
            let mut current = self.transcript.write().await;
            if let Some(shown) = current.as_mut() {
                if shown.composer_id == composer_id {
                    shown.conversation_id = conversation_id.clone();
                    if let Some(slot) = shown.messages.iter_mut().rfind(|m| m.id == pending.id) {
                        *slot = persisted;
                    }
                }
            }
        }

        // Recency bump; a send (not a view) is what keeps a chat alive.
        let outcome = self.roster.touch(composer_id).await?;
        if let Some(evicted) = outcome.evicted {
            self.conversations.delete_all_for_composer(&evicted).await?;
            {
                let mut current = self.transcript.write().await;
                if current
                    .as_ref()
                    .is_some_and(|shown| shown.composer_id == evicted)
                {
                    *current = None;
                }
            }
            tracing::info!("evicted composer {evicted} and deleted their conversations");
            let callback = self.eviction_callback.read().await.clone();
            if let Some(callback) = callback {
                callback(&evicted);
            }
        }

        // Generate the reply. Failures become the composer's placeholder,
        // persisted like any other message; the raw error never reaches the
        // transcript.
        let profile = self.profile_for(composer_id);
        let reply_text = match self.generator.generate_reply(text).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("reply generation failed for composer {composer_id}: {e}");
                profile.placeholder_reply()
            }
        };

        let reply = match self
            .conversations
            .append_message(&conversation_id, &reply_text, Sender::Assistant)
            .await
        {
            Ok(message) => Some(message),
            Err(e) if e.is_not_found() => {
                // The conversation was evicted while the reply was in
                // flight; the row it belonged to no longer exists.
                tracing::debug!("dropping reply for deleted conversation {conversation_id}");
                None
            }
            Err(e) => return Err(e),
        };

        // Apply to the display only if this conversation is still the one
        // shown; a reply for a conversation the user has navigated away
        // from stays persisted but must not leak into another transcript.
        if let Some(reply) = reply {
            let mut current = self.transcript.write().await;
            match current.as_mut() {
                Some(shown) if shown.conversation_id == conversation_id => {
                    shown.messages.push(reply);
                    shown.state = SendState::Ready;
                }
                _ => {
                    tracing::debug!(
                        "discarding display update for inactive conversation {conversation_id}"
                    );
                }
            }
        }

        Ok(())
    }

    /// Starts the composer over on a brand-new empty conversation.
    ///
    /// Prior conversations are retained (they are simply no longer current);
    /// this deliberately differs from eviction, which hard-deletes them.
    pub async fn reset(&self, composer_id: &str) -> Result<Transcript> {
        let fresh = self.conversations.create(composer_id).await?;
        tracing::debug!("reset composer {composer_id} onto conversation {}", fresh.id);

        let profile = self.profile_for(composer_id);
        if let Err(e) = self.generator.initialize(&profile, &[]).await {
            tracing::warn!("generator initialization failed for composer {composer_id}: {e}");
        }

        let transcript = Transcript::new(composer_id, fresh.id, Vec::new());
        *self.transcript.write().await = Some(transcript.clone());
        Ok(transcript)
    }

    /// Explicitly removes a composer: roster membership and every stored
    /// conversation. Clears the display if that composer was shown.
    pub async fn remove(&self, composer_id: &str) -> Result<()> {
        self.roster.remove(composer_id).await?;
        self.conversations
            .delete_all_for_composer(composer_id)
            .await?;

        let mut current = self.transcript.write().await;
        if current
            .as_ref()
            .is_some_and(|shown| shown.composer_id == composer_id)
        {
            *current = None;
        }
        Ok(())
    }

    /// Wipes every conversation and empties the roster.
    pub async fn clear_all(&self) -> Result<()> {
        self.roster.clear().await?;
        self.conversations.delete_all().await?;
        *self.transcript.write().await = None;
        Ok(())
    }

    /// Two-phase read of the current conversation for a composer.
    ///
    /// Phase one picks the canonical row from the listing (greatest
    /// `last_updated`, most-recently-created on ties). Phase two re-reads
    /// that row directly, so an append that landed between the listing and
    /// now is observed; the listed copy is the fallback when the direct
    /// read comes back without messages. No conversation at all means first
    /// contact: create one.
    async fn resolve_or_create(&self, composer_id: &str) -> Result<Conversation> {
        let rows = self.conversations.list_by_composer(composer_id).await?;
        let Some(cached) = Conversation::canonical(&rows).cloned() else {
            return self.conversations.create(composer_id).await;
        };

        match self.conversations.find_by_id(&cached.id).await? {
            Some(direct) if !direct.messages.is_empty() || cached.messages.is_empty() => Ok(direct),
            _ => Ok(cached),
        }
    }

    fn profile_for(&self, composer_id: &str) -> ComposerProfile {
        self.directory
            .profile(composer_id)
            .unwrap_or_else(|| ComposerProfile::unknown(composer_id))
    }

    async fn mark_undelivered(&self, composer_id: &str) {
        let mut current = self.transcript.write().await;
        if let Some(shown) = current.as_mut() {
            if shown.composer_id == composer_id {
                shown.state = SendState::Undelivered;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use maestro_infrastructure::{
        JsonActiveRosterRepository, JsonConversationRepository, MemoryStore,
    };
    use std::sync::Mutex as StdMutex;
    use tokio::sync::{Mutex, mpsc, oneshot};

    struct TestDirectory;

    impl ComposerDirectory for TestDirectory {
        fn profile(&self, composer_id: &str) -> Option<ComposerProfile> {
            Some(ComposerProfile {
                id: composer_id.to_string(),
                name: format!("Maestro {composer_id}"),
                era: "Test".to_string(),
                style_notes: String::new(),
            })
        }
    }

    /// Echoes the user's text back.
    struct EchoGenerator;

    #[async_trait]
    impl ReplyGenerator for EchoGenerator {
        async fn initialize(&self, _: &ComposerProfile, _: &[Message]) -> Result<()> {
            Ok(())
        }

        async fn generate_reply(&self, user_text: &str) -> Result<String> {
            Ok(format!("You said: {user_text}"))
        }
    }

    /// Always fails to generate.
    struct FailingGenerator;

    #[async_trait]
    impl ReplyGenerator for FailingGenerator {
        async fn initialize(&self, _: &ComposerProfile, _: &[Message]) -> Result<()> {
            Ok(())
        }

        async fn generate_reply(&self, _: &str) -> Result<String> {
            Err(MaestroError::generator("backend offline"))
        }
    }

    /// Blocks inside `generate_reply` until the test releases the gate,
    /// signalling entry so the test can interleave deterministically.
    struct GatedGenerator {
        gate: Mutex<Option<oneshot::Receiver<String>>>,
        entered: mpsc::UnboundedSender<()>,
    }

    #[async_trait]
    impl ReplyGenerator for GatedGenerator {
        async fn initialize(&self, _: &ComposerProfile, _: &[Message]) -> Result<()> {
            Ok(())
        }

        async fn generate_reply(&self, _: &str) -> Result<String> {
            let receiver = self
                .gate
                .lock()
                .await
                .take()
                .expect("gate already consumed");
            let _ = self.entered.send(());
            receiver
                .await
                .map_err(|_| MaestroError::generator("gate dropped"))
        }
    }

    struct Stack {
        reconciler: Arc<SessionReconciler>,
        conversations: Arc<dyn ConversationRepository>,
    }

    fn stack(capacity: usize, generator: Arc<dyn ReplyGenerator>) -> Stack {
        let store = Arc::new(MemoryStore::new());
        let conversations: Arc<dyn ConversationRepository> =
            Arc::new(JsonConversationRepository::new(store.clone()));
        let roster: Arc<dyn ActiveRosterRepository> =
            Arc::new(JsonActiveRosterRepository::new(store, capacity));
        let reconciler = Arc::new(SessionReconciler::new(
            conversations.clone(),
            roster,
            generator,
            Arc::new(TestDirectory),
        ));
        Stack {
            reconciler,
            conversations,
        }
    }

    #[tokio::test]
    async fn activate_creates_a_conversation_on_first_contact() {
        let stack = stack(5, Arc::new(EchoGenerator));

        let transcript = stack.reconciler.activate("bach").await.unwrap();
        assert!(transcript.messages.is_empty());
        assert_eq!(transcript.state, SendState::Ready);

        let rows = stack.conversations.list_by_composer("bach").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, transcript.conversation_id);
    }

    #[tokio::test]
    async fn activate_resumes_the_most_recent_conversation() {
        let stack = stack(5, Arc::new(EchoGenerator));
        stack.reconciler.activate("bach").await.unwrap();
        stack.reconciler.send("bach", "good evening").await.unwrap();

        // A remount resolves the same conversation and the same messages.
        let transcript = stack.reconciler.activate("bach").await.unwrap();
        assert_eq!(transcript.messages.len(), 2);
        assert_eq!(transcript.messages[0].text, "good evening");
        assert_eq!(transcript.messages[1].sender, Sender::Assistant);
    }

    #[tokio::test]
    async fn send_persists_user_message_and_reply() {
        let stack = stack(5, Arc::new(EchoGenerator));
        stack.reconciler.activate("holst").await.unwrap();
        stack.reconciler.send("holst", "hello there").await.unwrap();

        let transcript = stack.reconciler.transcript().await.unwrap();
        assert_eq!(transcript.state, SendState::Ready);
        assert_eq!(transcript.messages.len(), 2);
        assert_eq!(transcript.messages[0].sender, Sender::User);
        assert_eq!(transcript.messages[1].text, "You said: hello there");

        let rows = stack.conversations.list_by_composer("holst").await.unwrap();
        assert_eq!(rows[0].messages, transcript.messages);

        assert_eq!(
            stack.reconciler.active_composers().await.unwrap(),
            ["holst"]
        );
    }

    #[tokio::test]
    async fn whitespace_only_input_is_rejected() {
        let stack = stack(5, Arc::new(EchoGenerator));
        stack.reconciler.activate("bach").await.unwrap();

        assert!(stack.reconciler.send("bach", "   ").await.is_err());
        assert!(
            stack
                .reconciler
                .transcript()
                .await
                .unwrap()
                .messages
                .is_empty()
        );
    }

    #[tokio::test]
    async fn sixth_composer_evicts_and_cascades() {
        let stack = stack(5, Arc::new(EchoGenerator));
        let evictions: Arc<StdMutex<Vec<String>>> = Arc::new(StdMutex::new(Vec::new()));
        {
            let evictions = evictions.clone();
            stack
                .reconciler
                .set_eviction_callback(Arc::new(move |id: &str| {
                    evictions.lock().unwrap().push(id.to_string());
                }))
                .await;
        }

        for id in ["a", "b", "c", "d", "e"] {
            stack.reconciler.send(id, "one message").await.unwrap();
        }
        assert_eq!(
            stack.reconciler.active_composers().await.unwrap(),
            ["e", "d", "c", "b", "a"]
        );

        stack.reconciler.send("f", "one message").await.unwrap();

        assert_eq!(
            stack.reconciler.active_composers().await.unwrap(),
            ["f", "e", "d", "c", "b"]
        );
        assert!(stack.conversations.list_by_composer("a").await.unwrap().is_empty());
        for id in ["b", "c", "d", "e", "f"] {
            assert_eq!(
                stack.conversations.list_by_composer(id).await.unwrap().len(),
                1
            );
        }
        assert_eq!(*evictions.lock().unwrap(), ["a"]);
    }

    #[tokio::test]
    async fn viewing_does_not_refresh_recency() {
        let stack = stack(2, Arc::new(EchoGenerator));
        stack.reconciler.send("a", "first").await.unwrap();
        stack.reconciler.send("b", "second").await.unwrap();

        // Viewing a's chat must not resurrect it on the roster.
        stack.reconciler.activate("a").await.unwrap();
        stack.reconciler.send("c", "third").await.unwrap();

        assert_eq!(stack.reconciler.active_composers().await.unwrap(), ["c", "b"]);
        assert!(stack.conversations.list_by_composer("a").await.unwrap().is_empty());
        // The display pointed at the evicted chat, so it was cleared.
        assert!(stack.reconciler.transcript().await.is_none());
    }

    #[tokio::test]
    async fn reset_retains_history_under_a_new_conversation() {
        let stack = stack(5, Arc::new(EchoGenerator));
        stack.reconciler.activate("chopin").await.unwrap();
        stack.reconciler.send("chopin", "nocturne?").await.unwrap();
        let before = stack.reconciler.transcript().await.unwrap();

        let after = stack.reconciler.reset("chopin").await.unwrap();
        assert!(after.messages.is_empty());
        assert_ne!(after.conversation_id, before.conversation_id);

        // History is retained: both rows still exist, the old one untouched.
        let rows = stack
            .conversations
            .list_by_composer("chopin")
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        let old = rows.iter().find(|c| c.id == before.conversation_id).unwrap();
        assert_eq!(old.messages.len(), 2);
    }

    #[tokio::test]
    async fn generator_failure_yields_a_persisted_placeholder() {
        let stack = stack(5, Arc::new(FailingGenerator));
        stack.reconciler.activate("ravel").await.unwrap();
        stack.reconciler.send("ravel", "bonjour").await.unwrap();

        let expected = TestDirectory.profile("ravel").unwrap().placeholder_reply();
        let transcript = stack.reconciler.transcript().await.unwrap();
        assert_eq!(transcript.state, SendState::Ready);
        assert_eq!(transcript.messages[1].text, expected);
        assert_eq!(transcript.messages[1].sender, Sender::Assistant);

        // The placeholder is a real persisted message, not display-only.
        let rows = stack.conversations.list_by_composer("ravel").await.unwrap();
        assert_eq!(rows[0].messages[1].text, expected);
    }

    #[tokio::test]
    async fn vanished_conversation_is_recreated_on_retry() {
        let stack = stack(5, Arc::new(EchoGenerator));
        let before = stack.reconciler.activate("bach").await.unwrap();

        // Another path wiped the conversation out from under the display.
        stack
            .conversations
            .delete_by_id(&before.conversation_id)
            .await
            .unwrap();

        stack.reconciler.send("bach", "still there?").await.unwrap();

        let transcript = stack.reconciler.transcript().await.unwrap();
        assert_ne!(transcript.conversation_id, before.conversation_id);
        assert_eq!(transcript.state, SendState::Ready);
        assert_eq!(transcript.messages.len(), 2);

        let rows = stack.conversations.list_by_composer("bach").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].messages.len(), 2);
    }

    /// Repository whose appends always miss, to drive the second failure.
    struct AppendlessRepository {
        inner: Arc<dyn ConversationRepository>,
    }

    #[async_trait]
    impl ConversationRepository for AppendlessRepository {
        async fn list_by_composer(&self, composer_id: &str) -> Result<Vec<Conversation>> {
            self.inner.list_by_composer(composer_id).await
        }

        async fn find_by_id(&self, conversation_id: &str) -> Result<Option<Conversation>> {
            self.inner.find_by_id(conversation_id).await
        }

        async fn create(&self, composer_id: &str) -> Result<Conversation> {
            self.inner.create(composer_id).await
        }

        async fn append_message(
            &self,
            conversation_id: &str,
            _text: &str,
            _sender: Sender,
        ) -> Result<Message> {
            Err(MaestroError::not_found("Conversation", conversation_id))
        }

        async fn delete_by_id(&self, conversation_id: &str) -> Result<()> {
            self.inner.delete_by_id(conversation_id).await
        }

        async fn delete_all_for_composer(&self, composer_id: &str) -> Result<()> {
            self.inner.delete_all_for_composer(composer_id).await
        }

        async fn delete_all(&self) -> Result<()> {
            self.inner.delete_all().await
        }
    }

    #[tokio::test]
    async fn second_not_found_marks_the_send_undelivered() {
        let store = Arc::new(MemoryStore::new());
        let conversations: Arc<dyn ConversationRepository> = Arc::new(AppendlessRepository {
            inner: Arc::new(JsonConversationRepository::new(store.clone())),
        });
        let roster: Arc<dyn ActiveRosterRepository> =
            Arc::new(JsonActiveRosterRepository::new(store, 5));
        let reconciler = SessionReconciler::new(
            conversations,
            roster,
            Arc::new(EchoGenerator),
            Arc::new(TestDirectory),
        );

        reconciler.activate("bach").await.unwrap();
        let err = reconciler.send("bach", "anyone home?").await.unwrap_err();
        assert!(err.is_not_found());

        let transcript = reconciler.transcript().await.unwrap();
        assert_eq!(transcript.state, SendState::Undelivered);
        // The optimistic echo stays visible; it degraded, it did not roll back.
        assert_eq!(transcript.messages.len(), 1);
        assert_eq!(transcript.messages[0].text, "anyone home?");
    }

    #[tokio::test]
    async fn late_reply_is_persisted_but_not_displayed() {
        let (reply_tx, reply_rx) = oneshot::channel();
        let (entered_tx, mut entered_rx) = mpsc::unbounded_channel();
        let generator = Arc::new(GatedGenerator {
            gate: Mutex::new(Some(reply_rx)),
            entered: entered_tx,
        });
        let stack = stack(5, generator);

        stack.reconciler.activate("bach").await.unwrap();
        let send_task = {
            let reconciler = stack.reconciler.clone();
            tokio::spawn(async move { reconciler.send("bach", "are you there?").await })
        };

        // Wait until the send is parked inside the generator, then switch
        // the display away and release the reply.
        entered_rx.recv().await.unwrap();
        stack.reconciler.activate("holst").await.unwrap();
        reply_tx.send("I am, always.".to_string()).unwrap();
        send_task.await.unwrap().unwrap();

        // The reply landed in bach's durable conversation...
        let rows = stack.conversations.list_by_composer("bach").await.unwrap();
        assert_eq!(rows[0].messages.len(), 2);
        assert_eq!(rows[0].messages[1].text, "I am, always.");

        // ...but the displayed transcript belongs to holst and never saw it.
        let shown = stack.reconciler.transcript().await.unwrap();
        assert_eq!(shown.composer_id, "holst");
        assert!(shown.messages.is_empty());
    }

    #[tokio::test]
    async fn remove_deletes_roster_entry_and_rows() {
        let stack = stack(5, Arc::new(EchoGenerator));
        stack.reconciler.send("bach", "hello").await.unwrap();
        stack.reconciler.activate("bach").await.unwrap();

        stack.reconciler.remove("bach").await.unwrap();

        assert!(stack.reconciler.active_composers().await.unwrap().is_empty());
        assert!(stack.conversations.list_by_composer("bach").await.unwrap().is_empty());
        assert!(stack.reconciler.transcript().await.is_none());
    }

    #[tokio::test]
    async fn clear_all_wipes_everything() {
        let stack = stack(5, Arc::new(EchoGenerator));
        stack.reconciler.send("bach", "hello").await.unwrap();
        stack.reconciler.send("holst", "hello").await.unwrap();

        stack.reconciler.clear_all().await.unwrap();

        assert!(stack.reconciler.active_composers().await.unwrap().is_empty());
        assert!(stack.conversations.list_by_composer("bach").await.unwrap().is_empty());
        assert!(stack.conversations.list_by_composer("holst").await.unwrap().is_empty());
        assert!(stack.reconciler.transcript().await.is_none());
    }
}
