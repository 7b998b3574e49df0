use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// A two-party conversation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectChat {
    /// The two participants; degenerate records with fewer entries exist
    /// upstream and are treated as a no-op by resolution
    pub participant_ids: Vec<UserId>,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
}

impl DirectChat {
    pub fn new(a: impl Into<UserId>, b: impl Into<UserId>) -> Self {
        Self {
            participant_ids: vec![a.into(), b.into()],
            chat_type: ChatType::Direct,
        }
    }

    /// The participant who is not `sender_id`, i.e. the sole recipient.
    pub fn other_participant(&self, sender_id: &str) -> Option<&UserId> {
        self.participant_ids.iter().find(|id| *id != sender_id)
    }
}

/// A group conversation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupChat {
    pub participant_ids: Vec<UserId>,
    /// Group display name, used as the notification title
    pub name: String,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
}

impl GroupChat {
    pub fn new(
        name: impl Into<String>,
        participants: impl IntoIterator<Item = impl Into<UserId>>,
    ) -> Self {
        Self {
            participant_ids: participants.into_iter().map(Into::into).collect(),
            name: name.into(),
            chat_type: ChatType::Group,
        }
    }

    /// Every participant except the sender, in stored order.
    pub fn recipients<'a>(&'a self, sender_id: &'a str) -> impl Iterator<Item = &'a UserId> {
        self.participant_ids.iter().filter(move |id| *id != sender_id)
    }
}

/// Conversation type enumeration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    Direct,
    Group,
}

impl From<&str> for ChatType {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "group" => ChatType::Group,
            _ => ChatType::Direct,
        }
    }
}

impl std::fmt::Display for ChatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatType::Direct => write!(f, "direct"),
            ChatType::Group => write!(f, "group"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_participant_skips_sender() {
        let chat = DirectChat::new("user-a", "user-b");
        assert_eq!(
            chat.other_participant("user-a").map(String::as_str),
            Some("user-b")
        );
        assert_eq!(
            chat.other_participant("user-b").map(String::as_str),
            Some("user-a")
        );
    }

    #[test]
    fn test_other_participant_handles_degenerate_record() {
        let chat = DirectChat {
            participant_ids: vec!["user-a".to_string()],
            chat_type: ChatType::Direct,
        };
        assert!(chat.other_participant("user-a").is_none());
    }

    #[test]
    fn test_group_recipients_preserve_order() {
        let group = GroupChat::new("Equipo", ["user-a", "user-b", "user-c"]);
        let recipients: Vec<&str> = group.recipients("user-b").map(String::as_str).collect();
        assert_eq!(recipients, vec!["user-a", "user-c"]);
    }

    #[test]
    fn test_chat_type_from_str() {
        assert_eq!(ChatType::from("group"), ChatType::Group);
        assert_eq!(ChatType::from("direct"), ChatType::Direct);
        assert_eq!(ChatType::from("anything-else"), ChatType::Direct);
    }
}
