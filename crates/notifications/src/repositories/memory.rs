//! In-memory repository implementations for tests and local runs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::entities::{DirectChat, GroupChat, User};
use crate::types::{DeviceToken, StoreError, StoreResult};

use super::{ConversationRepository, TokenRewrite, UserRepository};

/// In-memory user repository
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
    fail_with: Arc<RwLock<Option<StoreError>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: User) {
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user);
    }

    /// Make every subsequent call fail with `error`, for exercising the
    /// error-swallowing path at the trigger boundary.
    pub async fn fail_with(&self, error: StoreError) {
        let mut fail = self.fail_with.write().await;
        *fail = Some(error);
    }

    pub async fn tokens_of(&self, id: &str) -> Vec<DeviceToken> {
        let users = self.users.read().await;
        users
            .get(id)
            .map(|user| user.fcm_tokens.clone())
            .unwrap_or_default()
    }

    async fn check_failure(&self) -> StoreResult<()> {
        let fail = self.fail_with.read().await;
        match fail.as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        self.check_failure().await?;
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn find_with_any_token(&self, tokens: &[DeviceToken]) -> StoreResult<Vec<User>> {
        self.check_failure().await?;
        let users = self.users.read().await;
        let mut matches: Vec<User> = users
            .values()
            .filter(|user| user.fcm_tokens.iter().any(|t| tokens.contains(t)))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(matches)
    }

    async fn rewrite_tokens(&self, rewrites: &[TokenRewrite]) -> StoreResult<()> {
        self.check_failure().await?;
        let mut users = self.users.write().await;
        // All-or-nothing, matching the store's batched-write contract.
        for rewrite in rewrites {
            if !users.contains_key(&rewrite.user_id) {
                return Err(StoreError::BatchWriteFailed(format!(
                    "no such user: {}",
                    rewrite.user_id
                )));
            }
        }
        for rewrite in rewrites {
            if let Some(user) = users.get_mut(&rewrite.user_id) {
                user.fcm_tokens = rewrite.fcm_tokens.clone();
            }
        }
        Ok(())
    }
}

/// In-memory conversation repository over both chat collections.
#[derive(Clone, Default)]
pub struct InMemoryConversationRepository {
    direct: Arc<RwLock<HashMap<String, DirectChat>>>,
    groups: Arc<RwLock<HashMap<String, GroupChat>>>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_direct(&self, id: impl Into<String>, chat: DirectChat) {
        let mut direct = self.direct.write().await;
        direct.insert(id.into(), chat);
    }

    pub async fn insert_group(&self, id: impl Into<String>, group: GroupChat) {
        let mut groups = self.groups.write().await;
        groups.insert(id.into(), group);
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn group_exists(&self, id: &str) -> StoreResult<bool> {
        let groups = self.groups.read().await;
        Ok(groups.contains_key(id))
    }

    async fn find_group(&self, id: &str) -> StoreResult<Option<GroupChat>> {
        let groups = self.groups.read().await;
        Ok(groups.get(id).cloned())
    }

    async fn find_direct(&self, id: &str) -> StoreResult<Option<DirectChat>> {
        let direct = self.direct.read().await;
        Ok(direct.get(id).cloned())
    }
}
