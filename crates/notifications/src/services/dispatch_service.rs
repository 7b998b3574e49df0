//! The message-created dispatch pipeline.
//!
//! One invocation per newly created message: resolve the sender, classify
//! the conversation, gather recipient tokens, send one multicast, then
//! hand the report to token cleanup. Every failure is contained here;
//! the hosting trigger never sees an error, only log output.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::entities::{Message, User};
use crate::push::{AndroidHints, AndroidPriority, MulticastPush, PushClient, PushNotification, CLICK_ACTION};
use crate::repositories::{ConversationRepository, UserRepository};
use crate::services::CleanupService;
use crate::trigger::{MessageCreated, OnMessageCreated};
use crate::types::{DeviceToken, DispatchResult};
use crate::utils::format_content;

/// Resolved fanout target for one message. An empty token list is the
/// no-op sentinel for every missing-data case, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationTarget {
    pub tokens: Vec<DeviceToken>,
    pub title: String,
    pub body: String,
}

impl NotificationTarget {
    pub fn empty() -> Self {
        Self {
            tokens: Vec::new(),
            title: String::new(),
            body: String::new(),
        }
    }
}

/// Service that turns a created-message event into one multicast push.
pub struct DispatchService {
    users: Arc<dyn UserRepository>,
    conversations: Arc<dyn ConversationRepository>,
    push: Arc<dyn PushClient>,
    cleanup: CleanupService,
    channel_id: String,
}

impl DispatchService {
    pub fn new(
        config: &tecchat_config::AppConfig,
        users: Arc<dyn UserRepository>,
        conversations: Arc<dyn ConversationRepository>,
        push: Arc<dyn PushClient>,
    ) -> Self {
        Self {
            cleanup: CleanupService::new(users.clone(), config.cleanup.query_chunk),
            users,
            conversations,
            push,
            channel_id: config.push.channel_id.clone(),
        }
    }

    async fn dispatch(&self, message: &Message) -> DispatchResult<()> {
        let Some(sender) = self.users.find_by_id(&message.sender_id).await? else {
            info!(sender_id = %message.sender_id, "sender not found, skipping notification");
            return Ok(());
        };

        // Group existence is the classification signal; a direct record
        // under the same id would be shadowed.
        let is_group = self
            .conversations
            .group_exists(&message.conversation_id)
            .await?;

        let target = if is_group {
            self.resolve_group(message, &sender).await?
        } else {
            self.resolve_direct(message, &sender).await?
        };

        if target.tokens.is_empty() {
            info!(
                conversation_id = %message.conversation_id,
                "no recipient tokens, skipping notification"
            );
            return Ok(());
        }

        let push = self.build_multicast(message, is_group, target);
        let report = self.push.send_multicast(&push).await?;

        info!(
            delivered = report.success_count(),
            failed = report.failure_count(),
            "notifications sent"
        );

        self.cleanup
            .cleanup_invalid_tokens(&push.tokens, &report)
            .await?;

        Ok(())
    }

    /// Direct chats notify the one participant who is not the sender.
    /// Title is the sender's name; the body carries no name prefix.
    async fn resolve_direct(
        &self,
        message: &Message,
        sender: &User,
    ) -> DispatchResult<NotificationTarget> {
        let Some(chat) = self
            .conversations
            .find_direct(&message.conversation_id)
            .await?
        else {
            return Ok(NotificationTarget::empty());
        };

        let Some(recipient_id) = chat.other_participant(&message.sender_id) else {
            return Ok(NotificationTarget::empty());
        };

        let Some(recipient) = self.users.find_by_id(recipient_id).await? else {
            return Ok(NotificationTarget::empty());
        };

        Ok(NotificationTarget {
            tokens: recipient.fcm_tokens,
            title: sender.name.clone(),
            body: format_content(&message.kind, &message.content, None),
        })
    }

    /// Group chats notify every other participant. Tokens accumulate in
    /// participant order without dedup; title is the group name and the
    /// body is prefixed with the sender's name.
    async fn resolve_group(
        &self,
        message: &Message,
        sender: &User,
    ) -> DispatchResult<NotificationTarget> {
        let Some(group) = self
            .conversations
            .find_group(&message.conversation_id)
            .await?
        else {
            return Ok(NotificationTarget::empty());
        };

        let mut tokens = Vec::new();
        for recipient_id in group.recipients(&message.sender_id) {
            if let Some(recipient) = self.users.find_by_id(recipient_id).await? {
                tokens.extend(recipient.fcm_tokens);
            }
        }

        Ok(NotificationTarget {
            tokens,
            title: group.name.clone(),
            body: format_content(&message.kind, &message.content, Some(&sender.name)),
        })
    }

    fn build_multicast(
        &self,
        message: &Message,
        is_group: bool,
        target: NotificationTarget,
    ) -> MulticastPush {
        let mut data = BTreeMap::new();
        data.insert(
            "conversationId".to_string(),
            message.conversation_id.clone(),
        );
        data.insert("senderId".to_string(), message.sender_id.clone());
        data.insert("isGroup".to_string(), is_group.to_string());
        data.insert("type".to_string(), message.kind.as_str().to_string());
        data.insert("click_action".to_string(), CLICK_ACTION.to_string());

        MulticastPush {
            tokens: target.tokens,
            notification: PushNotification {
                title: target.title,
                body: target.body,
            },
            data,
            android: AndroidHints {
                channel_id: self.channel_id.clone(),
                priority: AndroidPriority::High,
                default_sound: true,
                default_vibrate_timings: true,
            },
        }
    }
}

#[async_trait]
impl OnMessageCreated for DispatchService {
    /// Trigger boundary. Missing snapshots are logged and dropped; any
    /// pipeline error is logged and swallowed so the hosting runtime
    /// never retries on our account.
    async fn on_message_created(&self, event: MessageCreated) {
        let Some(message) = event.snapshot else {
            info!("trigger fired without a snapshot");
            return;
        };

        if let Err(err) = self.dispatch(&message).await {
            error!(
                conversation_id = %message.conversation_id,
                error = %err,
                "failed to deliver notification"
            );
        }
    }
}
