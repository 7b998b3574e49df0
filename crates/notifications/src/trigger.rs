//! The created-message trigger seam.
//!
//! The hosting runtime (whatever fires one callback per new document)
//! translates its native event format into [`MessageCreated`] and hands
//! it to an [`OnMessageCreated`] implementation. The core never talks to
//! the runtime directly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entities::Message;

/// Plain record for a fired trigger. `snapshot` is `None` when the
/// message was deleted before the event was delivered.
///
/// ```
/// use tecchat_notifications::trigger::MessageCreated;
///
/// let raw = r#"{
///     "snapshot": {
///         "conversationId": "conv-1",
///         "senderId": "user-a",
///         "type": "text",
///         "content": "hola",
///         "timestamp": "2024-05-01T12:00:00Z"
///     }
/// }"#;
/// let event: MessageCreated = serde_json::from_str(raw).unwrap();
/// assert!(event.snapshot.is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageCreated {
    #[serde(default)]
    pub snapshot: Option<Message>,
}

impl MessageCreated {
    pub fn new(message: Message) -> Self {
        Self {
            snapshot: Some(message),
        }
    }

    /// An event whose record vanished before delivery.
    pub fn without_snapshot() -> Self {
        Self { snapshot: None }
    }
}

/// Handler interface the hosting adapter invokes once per created
/// message record. Implementations must not fail: errors are contained
/// and logged, never surfaced to the runtime.
#[async_trait]
pub trait OnMessageCreated: Send + Sync {
    async fn on_message_created(&self, event: MessageCreated);
}
