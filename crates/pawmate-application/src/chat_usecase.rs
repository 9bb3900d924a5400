//! Chat use case.
//!
//! Owns the local message cache for one conversation and routes user
//! actions through the match state machine. The remote write always comes
//! first; local state only reflects what the store has already taken, so a
//! failed action leaves the visible conversation unchanged.

use chrono::{DateTime, Utc};
use pawmate_core::chat::{Message, MessageDisplayKind, MessageRepository, MessageStore};
use pawmate_core::error::Result;
use pawmate_core::matching::{Match, MatchStateMachine, ProposalDetails, WalkDecision};
use pawmate_core::sync::Synchronizer;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub struct ChatUseCase {
    local_user_id: String,
    conversation_id: String,
    store: Arc<MessageStore>,
    messages: Arc<dyn MessageRepository>,
    machine: Arc<MatchStateMachine>,
    synchronizer: Arc<dyn Synchronizer>,
}

impl ChatUseCase {
    pub fn new(
        local_user_id: impl Into<String>,
        conversation_id: impl Into<String>,
        messages: Arc<dyn MessageRepository>,
        machine: Arc<MatchStateMachine>,
        synchronizer: Arc<dyn Synchronizer>,
    ) -> Self {
        let local_user_id = local_user_id.into();
        Self {
            store: Arc::new(MessageStore::new(&local_user_id)),
            local_user_id,
            conversation_id: conversation_id.into(),
            messages,
            machine,
            synchronizer,
        }
    }

    /// The ordered local cache, for consumers that want to observe it
    /// directly.
    pub fn store(&self) -> &Arc<MessageStore> {
        &self.store
    }

    /// Replaces the local cache with the conversation as currently stored.
    pub async fn load_history(&self) -> Result<()> {
        let history = self.messages.conversation(&self.conversation_id).await?;
        self.store.set_messages(history).await;
        Ok(())
    }

    /// Sends a free-text message: persisted first, reflected locally only
    /// after the store took it.
    pub async fn send_text(&self, content: &str) -> Result<Message> {
        let message = Message::text(
            &self.local_user_id,
            &self.conversation_id,
            content,
            Utc::now(),
        );
        self.messages.append(&message).await?;
        self.store.append(message.clone()).await;
        Ok(message)
    }

    /// Consumes the conversation's change feed into the local cache until
    /// the feed ends or fails. The caller decides whether to resubscribe
    /// after a failure.
    pub async fn spawn_sync(&self) -> JoinHandle<()> {
        let mut feed = self
            .synchronizer
            .subscribe_messages(&self.conversation_id)
            .await;
        let store = self.store.clone();
        let conversation_id = self.conversation_id.clone();
        tokio::spawn(async move {
            while let Some(item) = feed.recv().await {
                match item {
                    Ok(message) => store.append(message).await,
                    Err(error) => {
                        tracing::error!(conversation = %conversation_id, %error, "message feed failed");
                        break;
                    }
                }
            }
            tracing::debug!(conversation = %conversation_id, "message feed ended");
        })
    }

    /// Ordered snapshot paired with each message's display classification.
    pub async fn visible_messages(&self) -> Vec<(Message, MessageDisplayKind)> {
        self.store
            .all_ordered()
            .await
            .into_iter()
            .map(|message| {
                let kind = self.store.classify(&message);
                (message, kind)
            })
            .collect()
    }

    /// Proposes a walk to another user in this conversation.
    pub async fn propose_walk(&self, invitee_id: &str, walk_at: DateTime<Utc>) -> Result<Match> {
        self.machine
            .propose(&self.local_user_id, invitee_id, &self.conversation_id, walk_at)
            .await
    }

    /// Answers a walk proposal as the local user.
    pub async fn respond_to_walk(&self, match_key: &str, decision: WalkDecision) -> Result<Match> {
        self.machine
            .respond(match_key, &self.local_user_id, decision)
            .await
    }

    /// Withdraws a proposal the local user made.
    pub async fn cancel_walk(&self, match_key: &str) -> Result<Match> {
        self.machine.cancel(match_key, &self.local_user_id).await
    }

    /// Looks up the match a walk-mate message points at, for rendering its
    /// details. Never fails; an unresolvable proposal renders without them.
    pub async fn resolve_proposal(&self, message: &Message) -> ProposalDetails {
        self.machine.resolve_proposal(message).await
    }
}
