//! Push-delivery seam.
//!
//! The real transport (FCM HTTP, credential handling, size limits) lives
//! in the managed provider; this module captures only the multicast
//! contract the dispatch pipeline depends on: one call, many tokens, one
//! ordered outcome per token.

pub mod mock;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::types::{DeviceToken, PushResult};

/// Client-side intent marker carried in every data payload.
pub const CLICK_ACTION: &str = "FLUTTER_NOTIFICATION_CLICK";

/// A single multicast push: one notification fanned out to many device
/// tokens at once.
#[derive(Debug, Clone, Serialize)]
pub struct MulticastPush {
    pub tokens: Vec<DeviceToken>,
    pub notification: PushNotification,
    /// Free-form key-value payload handed to the client app unchanged
    pub data: BTreeMap<String, String>,
    pub android: AndroidHints,
}

#[derive(Debug, Clone, Serialize)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
}

/// Android delivery hints attached to the multicast.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidHints {
    pub channel_id: String,
    pub priority: AndroidPriority,
    pub default_sound: bool,
    pub default_vibrate_timings: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AndroidPriority {
    Normal,
    High,
}

/// Per-token multicast result, in the same order as the request tokens.
#[derive(Debug, Clone)]
pub struct PushReport {
    pub responses: Vec<SendOutcome>,
}

impl PushReport {
    pub fn success_count(&self) -> usize {
        self.responses
            .iter()
            .filter(|outcome| matches!(outcome, SendOutcome::Delivered))
            .count()
    }

    pub fn failure_count(&self) -> usize {
        self.responses.len() - self.success_count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Delivered,
    Failed(PushErrorCode),
}

/// Typed provider error codes for a failed token delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushErrorCode {
    /// The token is syntactically invalid
    InvalidToken,
    /// The token was valid once but the device is no longer registered
    Unregistered,
    /// Any other provider code; left alone by cleanup
    Other(String),
}

impl PushErrorCode {
    /// Whether the token behind this failure should be pruned from the
    /// owning user records.
    pub fn is_prune_worthy(&self) -> bool {
        matches!(self, PushErrorCode::InvalidToken | PushErrorCode::Unregistered)
    }
}

/// Multicast send access to the push provider.
#[async_trait]
pub trait PushClient: Send + Sync {
    async fn send_multicast(&self, push: &MulticastPush) -> PushResult<PushReport>;
}
