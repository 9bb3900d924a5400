//! Chat message types.
//!
//! A conversation is an append-only log of [`Message`] values. Each message
//! carries exactly one [`MessageKind`]; the walk-mate kinds reference a
//! match by its key through the `content` field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The semantic kind of a chat message.
///
/// This is the exhaustive domain enum: an unhandled kind is a compile-time
/// error. Out-of-range wire tags never reach this type; they fail decoding
/// at the document boundary with `UnknownMessageKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Free-text message.
    Text,
    /// Synthetic day-boundary marker in the conversation.
    DateSeparator,
    /// Walk-mate proposal; `content` holds the match key.
    WalkMateRequest,
    /// Proposal accepted; `content` holds the match key.
    WalkMateAccept,
    /// Proposal rejected; `content` holds the match key.
    WalkMateReject,
}

/// A single entry in a conversation's chat stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Opaque stable identifier (UUID for locally created messages).
    pub id: String,
    /// User who sent the message.
    pub sender_id: String,
    /// Conversation the message belongs to.
    pub conversation_id: String,
    /// Semantic kind of the message.
    pub kind: MessageKind,
    /// Free text for `Text`; the match key for walk-mate kinds.
    pub content: String,
    /// Logical send time. Together with `id` it totally orders the
    /// conversation, independent of delivery order.
    pub sent_at: DateTime<Utc>,
}

impl Message {
    /// Creates a free-text message with a fresh id.
    pub fn text(
        sender_id: impl Into<String>,
        conversation_id: impl Into<String>,
        content: impl Into<String>,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender_id: sender_id.into(),
            conversation_id: conversation_id.into(),
            kind: MessageKind::Text,
            content: content.into(),
            sent_at,
        }
    }

    /// Creates a walk-mate message referencing `match_key`.
    pub fn walk_mate(
        kind: MessageKind,
        sender_id: impl Into<String>,
        conversation_id: impl Into<String>,
        match_key: impl Into<String>,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender_id: sender_id.into(),
            conversation_id: conversation_id.into(),
            kind,
            content: match_key.into(),
            sent_at,
        }
    }

    /// The total-order key within a conversation: send time, id as tiebreak.
    pub fn ordering_key(&self) -> (DateTime<Utc>, &str) {
        (self.sent_at, self.id.as_str())
    }
}

/// How a message is rendered, derived purely from the message and the
/// identity of the local user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageDisplayKind {
    /// `Text` sent by the local user.
    OutgoingText,
    /// `Text` sent by anyone else.
    IncomingText,
    DateSeparator,
    WalkMateRequest,
    WalkMateAccept,
    WalkMateReject,
}

/// Classifies a message for display. Pure function of the message kind and,
/// for `Text`, whether the sender is the local user.
pub fn classify(message: &Message, local_user_id: &str) -> MessageDisplayKind {
    match message.kind {
        MessageKind::Text => {
            if message.sender_id == local_user_id {
                MessageDisplayKind::OutgoingText
            } else {
                MessageDisplayKind::IncomingText
            }
        }
        MessageKind::DateSeparator => MessageDisplayKind::DateSeparator,
        MessageKind::WalkMateRequest => MessageDisplayKind::WalkMateRequest,
        MessageKind::WalkMateAccept => MessageDisplayKind::WalkMateAccept,
        MessageKind::WalkMateReject => MessageDisplayKind::WalkMateReject,
    }
}
