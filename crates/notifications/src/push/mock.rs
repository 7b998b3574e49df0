//! Scripted push client for testing the dispatch pipeline.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::types::{PushError, PushResult};

use super::{MulticastPush, PushClient, PushErrorCode, PushReport, SendOutcome};

/// Push client that records every multicast and answers each token from a
/// pre-scripted failure table (unscripted tokens deliver).
#[derive(Clone, Default)]
pub struct ScriptedPushClient {
    failures: Arc<RwLock<HashMap<String, PushErrorCode>>>,
    reject_with: Arc<RwLock<Option<PushError>>>,
    sent: Arc<RwLock<Vec<MulticastPush>>>,
}

impl ScriptedPushClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a per-token failure for every subsequent multicast.
    pub async fn fail_token(&self, token: impl Into<String>, code: PushErrorCode) {
        let mut failures = self.failures.write().await;
        failures.insert(token.into(), code);
    }

    /// Reject the whole multicast call instead of reporting per token.
    pub async fn reject_with(&self, error: PushError) {
        let mut reject = self.reject_with.write().await;
        *reject = Some(error);
    }

    pub async fn sent(&self) -> Vec<MulticastPush> {
        let sent = self.sent.read().await;
        sent.clone()
    }
}

#[async_trait]
impl PushClient for ScriptedPushClient {
    async fn send_multicast(&self, push: &MulticastPush) -> PushResult<PushReport> {
        {
            let reject = self.reject_with.read().await;
            if let Some(error) = reject.as_ref() {
                return Err(error.clone());
            }
        }

        let failures = self.failures.read().await;
        let responses = push
            .tokens
            .iter()
            .map(|token| match failures.get(token) {
                Some(code) => SendOutcome::Failed(code.clone()),
                None => SendOutcome::Delivered,
            })
            .collect();

        let mut sent = self.sent.write().await;
        sent.push(push.clone());

        Ok(PushReport { responses })
    }
}
