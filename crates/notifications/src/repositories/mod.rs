//! Data-access seams over the external document store.
//!
//! The store itself (query engine, wire protocol, retries) is an external
//! managed service; these traits capture the exact operations the fanout
//! relies on so the pipeline can be exercised against the in-memory
//! implementations in [`memory`].

pub mod memory;

use async_trait::async_trait;

use crate::entities::{DirectChat, GroupChat, User};
use crate::types::{DeviceToken, StoreResult, UserId};

/// Replacement token list for a single user, applied by a batched write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRewrite {
    pub user_id: UserId,
    pub fcm_tokens: Vec<DeviceToken>,
}

/// Read and token-maintenance access to user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Point-read a user by id.
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>>;

    /// All users whose stored token set contains any of `tokens`.
    ///
    /// `tokens` must stay within the store's array-membership query bound;
    /// callers chunk larger batches.
    async fn find_with_any_token(&self, tokens: &[DeviceToken]) -> StoreResult<Vec<User>>;

    /// Replace each listed user's token list, committed as one atomic
    /// batched write across all of them.
    async fn rewrite_tokens(&self, rewrites: &[TokenRewrite]) -> StoreResult<()>;
}

/// Read access to conversation records.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Existence check against the group collection. This is the
    /// classification signal: a conversation id is a group iff a group
    /// record exists, regardless of the direct-chat collection.
    async fn group_exists(&self, id: &str) -> StoreResult<bool>;

    async fn find_group(&self, id: &str) -> StoreResult<Option<GroupChat>>;

    async fn find_direct(&self, id: &str) -> StoreResult<Option<DirectChat>>;
}
