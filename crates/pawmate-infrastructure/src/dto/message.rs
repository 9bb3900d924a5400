//! Wire format of message documents.

use chrono::{DateTime, Utc};
use pawmate_core::chat::{Message, MessageKind};
use pawmate_core::error::{PawmateError, Result};
use serde::{Deserialize, Serialize};

/// Numeric message-kind tags as stored in the message collection.
/// These never appear outside the wire boundary; the domain works with the
/// exhaustive [`MessageKind`] enum.
pub const TAG_TEXT: u32 = 0;
pub const TAG_DATE_SEPARATOR: u32 = 1;
pub const TAG_WALK_MATE_REQUEST: u32 = 2;
pub const TAG_WALK_MATE_ACCEPT: u32 = 3;
pub const TAG_WALK_MATE_REJECT: u32 = 4;

/// Maps a wire tag into the domain enum.
///
/// An out-of-range tag is a protocol violation (most likely version skew)
/// and fails with `UnknownMessageKind`.
pub fn kind_from_tag(tag: u32) -> Result<MessageKind> {
    match tag {
        TAG_TEXT => Ok(MessageKind::Text),
        TAG_DATE_SEPARATOR => Ok(MessageKind::DateSeparator),
        TAG_WALK_MATE_REQUEST => Ok(MessageKind::WalkMateRequest),
        TAG_WALK_MATE_ACCEPT => Ok(MessageKind::WalkMateAccept),
        TAG_WALK_MATE_REJECT => Ok(MessageKind::WalkMateReject),
        other => Err(PawmateError::UnknownMessageKind { code: other }),
    }
}

pub fn kind_tag(kind: MessageKind) -> u32 {
    match kind {
        MessageKind::Text => TAG_TEXT,
        MessageKind::DateSeparator => TAG_DATE_SEPARATOR,
        MessageKind::WalkMateRequest => TAG_WALK_MATE_REQUEST,
        MessageKind::WalkMateAccept => TAG_WALK_MATE_ACCEPT,
        MessageKind::WalkMateReject => TAG_WALK_MATE_REJECT,
    }
}

/// One message document as the store keeps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDocument {
    pub id: String,
    pub sender_id: String,
    pub conversation_id: String,
    pub kind: u32,
    pub content: String,
    pub sent_at_ms: i64,
}

impl MessageDocument {
    pub fn from_domain(message: &Message) -> Self {
        Self {
            id: message.id.clone(),
            sender_id: message.sender_id.clone(),
            conversation_id: message.conversation_id.clone(),
            kind: kind_tag(message.kind),
            content: message.content.clone(),
            sent_at_ms: message.sent_at.timestamp_millis(),
        }
    }
}

pub(crate) fn timestamp_from_ms(ms: i64, field: &str) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms).ok_or_else(|| PawmateError::Serialization {
        format: "document".to_string(),
        message: format!("{field} out of range: {ms}"),
    })
}

impl TryFrom<&MessageDocument> for Message {
    type Error = PawmateError;

    fn try_from(document: &MessageDocument) -> Result<Self> {
        Ok(Message {
            id: document.id.clone(),
            sender_id: document.sender_id.clone(),
            conversation_id: document.conversation_id.clone(),
            kind: kind_from_tag(document.kind)?,
            content: document.content.clone(),
            sent_at: timestamp_from_ms(document.sent_at_ms, "sent_at_ms")?,
        })
    }
}
