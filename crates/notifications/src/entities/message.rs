use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ConversationId, UserId};

/// A chat message record as created by the TecChat client application.
/// This system only ever reads these; it never writes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Conversation the message belongs to (direct chat or group id)
    pub conversation_id: ConversationId,
    /// Author of the message
    pub sender_id: UserId,
    /// Content type tag
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// Raw message content
    pub content: String,
    /// Storage reference for media messages
    #[serde(default)]
    pub media_url: Option<String>,
    /// Creation timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(
        conversation_id: impl Into<ConversationId>,
        sender_id: impl Into<UserId>,
        kind: MessageKind,
        content: impl Into<String>,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            sender_id: sender_id.into(),
            kind,
            content: content.into(),
            media_url: None,
            timestamp: Utc::now(),
        }
    }
}

/// Message content type enumeration. Unknown tags are preserved rather
/// than rejected, so records written by newer clients still dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageKind {
    Text,
    Image,
    Video,
    Audio,
    Document,
    Emoji,
    Other(String),
}

impl MessageKind {
    pub fn as_str(&self) -> &str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Image => "image",
            MessageKind::Video => "video",
            MessageKind::Audio => "audio",
            MessageKind::Document => "document",
            MessageKind::Emoji => "emoji",
            MessageKind::Other(tag) => tag,
        }
    }
}

impl From<&str> for MessageKind {
    fn from(s: &str) -> Self {
        match s {
            "text" => MessageKind::Text,
            "image" => MessageKind::Image,
            "video" => MessageKind::Video,
            "audio" => MessageKind::Audio,
            "document" => MessageKind::Document,
            "emoji" => MessageKind::Emoji,
            other => MessageKind::Other(other.to_string()),
        }
    }
}

impl From<String> for MessageKind {
    fn from(s: String) -> Self {
        MessageKind::from(s.as_str())
    }
}

impl From<MessageKind> for String {
    fn from(kind: MessageKind) -> Self {
        kind.as_str().to_string()
    }
}
