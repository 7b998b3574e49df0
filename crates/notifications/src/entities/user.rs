use serde::{Deserialize, Serialize};

use crate::types::{DeviceToken, UserId};

/// A TecChat user record. The token list is the only field this system
/// mutates, and only to prune entries the push provider has rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Display name shown as the notification title for direct messages
    pub name: String,
    /// Push delivery tokens for the user's devices; may be empty
    #[serde(default)]
    pub fcm_tokens: Vec<DeviceToken>,
}

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fcm_tokens: Vec::new(),
        }
    }

    pub fn with_tokens(
        id: impl Into<UserId>,
        name: impl Into<String>,
        tokens: impl IntoIterator<Item = impl Into<DeviceToken>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fcm_tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}
