//! Integration tests for the notifications crate.
//!
//! The full pipeline runs against in-memory repositories and a scripted
//! push client: no store, no provider, no trigger runtime.

use std::sync::Arc;

use tecchat_config::AppConfig;
use tecchat_notifications::push::mock::ScriptedPushClient;
use tecchat_notifications::repositories::memory::{
    InMemoryConversationRepository, InMemoryUserRepository,
};
use tecchat_notifications::{
    AndroidPriority, DirectChat, DispatchService, GroupChat, Message, MessageCreated, MessageKind,
    OnMessageCreated, PushError, PushErrorCode, StoreError, User,
};

struct Fixture {
    users: Arc<InMemoryUserRepository>,
    conversations: Arc<InMemoryConversationRepository>,
    push: Arc<ScriptedPushClient>,
    service: DispatchService,
}

impl Fixture {
    fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let conversations = Arc::new(InMemoryConversationRepository::new());
        let push = Arc::new(ScriptedPushClient::new());
        let service = DispatchService::new(
            &AppConfig::default(),
            users.clone(),
            conversations.clone(),
            push.clone(),
        );
        Self {
            users,
            conversations,
            push,
            service,
        }
    }

    async fn fire(&self, message: Message) {
        self.service
            .on_message_created(MessageCreated::new(message))
            .await;
    }
}

#[tokio::test]
async fn direct_message_notifies_the_other_participant() {
    let fx = Fixture::new();
    fx.users.insert(User::new("user-a", "Alice")).await;
    fx.users
        .insert(User::with_tokens("user-b", "Bob", ["t1", "t2"]))
        .await;
    fx.conversations
        .insert_direct("conv-1", DirectChat::new("user-a", "user-b"))
        .await;

    fx.fire(Message::new("conv-1", "user-a", MessageKind::Text, "hola"))
        .await;

    let sent = fx.push.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].tokens, vec!["t1".to_string(), "t2".to_string()]);
    assert_eq!(sent[0].notification.title, "Alice");
    assert_eq!(sent[0].notification.body, "hola");
}

#[tokio::test]
async fn multicast_carries_data_payload_and_android_hints() {
    let fx = Fixture::new();
    fx.users.insert(User::new("user-a", "Alice")).await;
    fx.users
        .insert(User::with_tokens("user-b", "Bob", ["t1"]))
        .await;
    fx.conversations
        .insert_direct("conv-1", DirectChat::new("user-a", "user-b"))
        .await;

    fx.fire(Message::new("conv-1", "user-a", MessageKind::Image, ""))
        .await;

    let sent = fx.push.sent().await;
    assert_eq!(sent.len(), 1);
    let push = &sent[0];

    assert_eq!(push.data.get("conversationId").unwrap(), "conv-1");
    assert_eq!(push.data.get("senderId").unwrap(), "user-a");
    assert_eq!(push.data.get("isGroup").unwrap(), "false");
    assert_eq!(push.data.get("type").unwrap(), "image");
    assert_eq!(
        push.data.get("click_action").unwrap(),
        "FLUTTER_NOTIFICATION_CLICK"
    );

    assert_eq!(push.android.channel_id, "tecchat_messages_channel");
    assert_eq!(push.android.priority, AndroidPriority::High);
    assert!(push.android.default_sound);
    assert!(push.android.default_vibrate_timings);

    assert_eq!(push.notification.body, "📷 Foto");
}

#[tokio::test]
async fn group_message_fans_out_to_every_other_participant() {
    let fx = Fixture::new();
    fx.users.insert(User::new("user-a", "Alice")).await;
    fx.users
        .insert(User::with_tokens("user-b", "Bob", ["t1"]))
        .await;
    fx.users.insert(User::new("user-c", "Carol")).await;
    fx.conversations
        .insert_group(
            "group-1",
            GroupChat::new("Equipo", ["user-a", "user-b", "user-c"]),
        )
        .await;

    fx.fire(Message::new("group-1", "user-a", MessageKind::Text, "hola"))
        .await;

    let sent = fx.push.sent().await;
    assert_eq!(sent.len(), 1);
    // Carol has no tokens and contributes nothing
    assert_eq!(sent[0].tokens, vec!["t1".to_string()]);
    assert_eq!(sent[0].notification.title, "Equipo");
    assert_eq!(sent[0].notification.body, "Alice: hola");
    assert_eq!(sent[0].data.get("isGroup").unwrap(), "true");
}

#[tokio::test]
async fn group_fanout_accumulates_duplicate_tokens() {
    let fx = Fixture::new();
    fx.users.insert(User::new("user-a", "Alice")).await;
    // Two members sharing a device token: both entries survive fanout.
    fx.users
        .insert(User::with_tokens("user-b", "Bob", ["shared"]))
        .await;
    fx.users
        .insert(User::with_tokens("user-c", "Carol", ["shared"]))
        .await;
    fx.conversations
        .insert_group(
            "group-1",
            GroupChat::new("Equipo", ["user-a", "user-b", "user-c"]),
        )
        .await;

    fx.fire(Message::new("group-1", "user-a", MessageKind::Text, "hola"))
        .await;

    let sent = fx.push.sent().await;
    assert_eq!(
        sent[0].tokens,
        vec!["shared".to_string(), "shared".to_string()]
    );
}

#[tokio::test]
async fn group_record_shadows_direct_record_with_same_id() {
    let fx = Fixture::new();
    fx.users.insert(User::new("user-a", "Alice")).await;
    fx.users
        .insert(User::with_tokens("user-b", "Bob", ["t1"]))
        .await;
    fx.conversations
        .insert_direct("conv-1", DirectChat::new("user-a", "user-b"))
        .await;
    fx.conversations
        .insert_group("conv-1", GroupChat::new("Equipo", ["user-a", "user-b"]))
        .await;

    fx.fire(Message::new("conv-1", "user-a", MessageKind::Text, "hola"))
        .await;

    let sent = fx.push.sent().await;
    assert_eq!(sent.len(), 1);
    // Group semantics win: group title, prefixed body.
    assert_eq!(sent[0].notification.title, "Equipo");
    assert_eq!(sent[0].notification.body, "Alice: hola");
    assert_eq!(sent[0].data.get("isGroup").unwrap(), "true");
}

#[tokio::test]
async fn nothing_sent_when_snapshot_is_missing() {
    let fx = Fixture::new();
    fx.service
        .on_message_created(MessageCreated::without_snapshot())
        .await;
    assert!(fx.push.sent().await.is_empty());
}

#[tokio::test]
async fn nothing_sent_when_sender_is_unknown() {
    let fx = Fixture::new();
    fx.users
        .insert(User::with_tokens("user-b", "Bob", ["t1"]))
        .await;
    fx.conversations
        .insert_direct("conv-1", DirectChat::new("user-a", "user-b"))
        .await;

    fx.fire(Message::new("conv-1", "user-a", MessageKind::Text, "hola"))
        .await;

    assert!(fx.push.sent().await.is_empty());
}

#[tokio::test]
async fn nothing_sent_when_conversation_is_unknown() {
    let fx = Fixture::new();
    fx.users.insert(User::new("user-a", "Alice")).await;

    fx.fire(Message::new("conv-missing", "user-a", MessageKind::Text, "hola"))
        .await;

    assert!(fx.push.sent().await.is_empty());
}

#[tokio::test]
async fn nothing_sent_for_degenerate_direct_chat() {
    let fx = Fixture::new();
    fx.users.insert(User::new("user-a", "Alice")).await;
    fx.conversations
        .insert_direct(
            "conv-1",
            DirectChat {
                participant_ids: vec!["user-a".to_string()],
                chat_type: tecchat_notifications::ChatType::Direct,
            },
        )
        .await;

    fx.fire(Message::new("conv-1", "user-a", MessageKind::Text, "hola"))
        .await;

    assert!(fx.push.sent().await.is_empty());
}

#[tokio::test]
async fn nothing_sent_when_recipient_has_no_tokens() {
    let fx = Fixture::new();
    fx.users.insert(User::new("user-a", "Alice")).await;
    fx.users.insert(User::new("user-b", "Bob")).await;
    fx.conversations
        .insert_direct("conv-1", DirectChat::new("user-a", "user-b"))
        .await;

    fx.fire(Message::new("conv-1", "user-a", MessageKind::Text, "hola"))
        .await;

    assert!(fx.push.sent().await.is_empty());
}

#[tokio::test]
async fn dead_tokens_are_pruned_after_dispatch() {
    let fx = Fixture::new();
    fx.users.insert(User::new("user-a", "Alice")).await;
    fx.users
        .insert(User::with_tokens("user-b", "Bob", ["t1", "t2", "t3"]))
        .await;
    fx.conversations
        .insert_direct("conv-1", DirectChat::new("user-a", "user-b"))
        .await;
    fx.push
        .fail_token("t2", PushErrorCode::Unregistered)
        .await;
    fx.push
        .fail_token("t3", PushErrorCode::Other("quota-exceeded".to_string()))
        .await;

    fx.fire(Message::new("conv-1", "user-a", MessageKind::Text, "hola"))
        .await;

    // Only the unregistered token is pruned; the quota failure is merely
    // counted.
    assert_eq!(
        fx.users.tokens_of("user-b").await,
        vec!["t1".to_string(), "t3".to_string()]
    );
}

#[tokio::test]
async fn store_failure_is_swallowed_at_the_trigger_boundary() {
    let fx = Fixture::new();
    fx.users
        .fail_with(StoreError::Unavailable("connection reset".to_string()))
        .await;

    // Must not panic or propagate; the only trace is a log line.
    fx.fire(Message::new("conv-1", "user-a", MessageKind::Text, "hola"))
        .await;

    assert!(fx.push.sent().await.is_empty());
}

#[tokio::test]
async fn push_rejection_is_swallowed_and_leaves_tokens_alone() {
    let fx = Fixture::new();
    fx.users.insert(User::new("user-a", "Alice")).await;
    fx.users
        .insert(User::with_tokens("user-b", "Bob", ["t1"]))
        .await;
    fx.conversations
        .insert_direct("conv-1", DirectChat::new("user-a", "user-b"))
        .await;
    fx.push
        .reject_with(PushError::Unavailable("provider down".to_string()))
        .await;

    fx.fire(Message::new("conv-1", "user-a", MessageKind::Text, "hola"))
        .await;

    // No report means no cleanup; the token list is untouched.
    assert_eq!(fx.users.tokens_of("user-b").await, vec!["t1".to_string()]);
}

#[tokio::test]
async fn long_text_is_truncated_in_the_delivered_body() {
    let fx = Fixture::new();
    fx.users.insert(User::new("user-a", "Alice")).await;
    fx.users
        .insert(User::with_tokens("user-b", "Bob", ["t1"]))
        .await;
    fx.conversations
        .insert_direct("conv-1", DirectChat::new("user-a", "user-b"))
        .await;

    let content = "x".repeat(140);
    fx.fire(Message::new("conv-1", "user-a", MessageKind::Text, content))
        .await;

    let sent = fx.push.sent().await;
    let body = &sent[0].notification.body;
    assert_eq!(body.chars().count(), 103);
    assert!(body.ends_with("..."));
}
