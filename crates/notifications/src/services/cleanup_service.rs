//! Best-effort pruning of delivery tokens the provider has rejected.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::push::{PushReport, SendOutcome};
use crate::repositories::{TokenRewrite, UserRepository};
use crate::types::{DeviceToken, StoreResult};

/// Service that removes invalid tokens from every user record holding
/// them. Idempotent: a second pass over already-pruned tokens matches no
/// users and writes nothing.
pub struct CleanupService {
    users: Arc<dyn UserRepository>,
    query_chunk: usize,
}

impl CleanupService {
    pub fn new(users: Arc<dyn UserRepository>, query_chunk: usize) -> Self {
        Self {
            users,
            query_chunk: query_chunk.max(1),
        }
    }

    /// Prune tokens whose delivery failed with a prune-worthy code.
    ///
    /// `tokens` is the multicast target list; `report` outcomes are
    /// positional, so index i of the report classifies token i.
    pub async fn cleanup_invalid_tokens(
        &self,
        tokens: &[DeviceToken],
        report: &PushReport,
    ) -> StoreResult<()> {
        let invalid: Vec<DeviceToken> = report
            .responses
            .iter()
            .zip(tokens)
            .filter_map(|(outcome, token)| match outcome {
                SendOutcome::Failed(code) if code.is_prune_worthy() => Some(token.clone()),
                _ => None,
            })
            .collect();

        if invalid.is_empty() {
            debug!("no invalid tokens in multicast report");
            return Ok(());
        }

        info!(count = invalid.len(), "cleaning invalid tokens");

        // The store bounds how many values one array-membership query may
        // carry, so oversized invalid batches are looked up in chunks. A
        // user can match more than one chunk; collect each only once.
        let mut seen = HashSet::new();
        let mut rewrites = Vec::new();
        let invalid_set: HashSet<&str> = invalid.iter().map(String::as_str).collect();

        for chunk in invalid.chunks(self.query_chunk) {
            for user in self.users.find_with_any_token(chunk).await? {
                if !seen.insert(user.id.clone()) {
                    continue;
                }
                let kept: Vec<DeviceToken> = user
                    .fcm_tokens
                    .iter()
                    .filter(|token| !invalid_set.contains(token.as_str()))
                    .cloned()
                    .collect();
                rewrites.push(TokenRewrite {
                    user_id: user.id,
                    fcm_tokens: kept,
                });
            }
        }

        if rewrites.is_empty() {
            return Ok(());
        }

        self.users.rewrite_tokens(&rewrites).await
    }
}
