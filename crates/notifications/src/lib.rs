//! # TecChat Notifications Crate
//!
//! Push-notification fanout for newly created chat messages. One
//! event-triggered pipeline resolves the sender, classifies the
//! conversation as direct or group, gathers recipient device tokens,
//! sends a single multicast push, and prunes tokens the provider reports
//! as dead.
//!
//! ## Architecture
//!
//! - **Entities**: passive records read from the document store
//!   (Message, User, DirectChat, GroupChat)
//! - **Repositories**: trait seams over the external store, with
//!   in-memory implementations for tests
//! - **Push**: the multicast contract against the push provider
//! - **Services**: the dispatch pipeline and token cleanup
//! - **Trigger**: the plain created-message event the hosting adapter
//!   feeds into the pipeline
//!
//! The document store, push transport, and trigger runtime are external
//! managed services; everything here is written against their contracts,
//! never their implementations.

pub mod entities;
pub mod push;
pub mod repositories;
pub mod services;
pub mod trigger;
pub mod types;
pub mod utils;

pub use entities::{ChatType, DirectChat, GroupChat, Message, MessageKind, User};
pub use push::{
    AndroidHints, AndroidPriority, MulticastPush, PushClient, PushErrorCode, PushNotification,
    PushReport, SendOutcome,
};
pub use repositories::{ConversationRepository, TokenRewrite, UserRepository};
pub use services::{CleanupService, DispatchService, NotificationTarget};
pub use trigger::{MessageCreated, OnMessageCreated};
pub use types::{
    ConversationId, DeviceToken, DispatchError, DispatchResult, PushError, PushResult, StoreError,
    StoreResult, UserId,
};
