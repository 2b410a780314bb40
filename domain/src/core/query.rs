//! Query value object and its conversational context

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of chat the query was posted in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    #[default]
    Direct,
    Group,
}

/// Metadata about the chat a query belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatMetadata {
    pub chat_id: Option<String>,
    pub chat_type: ChatKind,
    /// Id of the user who sent the query
    pub user_id: Option<String>,
    /// Display name of the user who sent the query
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    /// Participant count declared by the chat itself, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Who sent a message in the conversation history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    User,
    Ai,
}

/// One prior message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub sender_type: SenderType,
    pub content: String,
}

impl HistoryEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            sender_type: SenderType::User,
            content: content.into(),
        }
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self {
            sender_type: SenderType::Ai,
            content: content.into(),
        }
    }
}

/// Member of a group chat's roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl GroupMember {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Conversational context attached to a query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationContext {
    pub chat: ChatMetadata,
    /// Recent messages, oldest first
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    /// Group roster, empty for direct chats or when not yet loaded
    #[serde(default)]
    pub roster: Vec<GroupMember>,
}

impl ConversationContext {
    pub fn new(chat: ChatMetadata) -> Self {
        Self {
            chat,
            history: Vec::new(),
            roster: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<HistoryEntry>) -> Self {
        self.history = history;
        self
    }

    pub fn with_roster(mut self, roster: Vec<GroupMember>) -> Self {
        self.roster = roster;
        self
    }
}

/// A free-text user query (Value Object)
///
/// Immutable once created; carries the time it was issued, which anchors
/// every "today"-relative computation downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    text: String,
    context: ConversationContext,
    issued_at: DateTime<Utc>,
}

impl Query {
    pub fn new(
        text: impl Into<String>,
        context: ConversationContext,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            text: text.into(),
            context,
            issued_at,
        }
    }

    /// Create a query issued now with an empty direct-chat context
    pub fn now(text: impl Into<String>) -> Self {
        Self::new(text, ConversationContext::default(), Utc::now())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Whether the query carries no question at all
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_query_accessors() {
        let at = Utc.with_ymd_and_hms(2025, 11, 9, 12, 0, 0).unwrap();
        let chat = ChatMetadata {
            chat_type: ChatKind::Group,
            group_id: Some("2".to_string()),
            ..Default::default()
        };
        let query = Query::new(
            "split $120",
            ConversationContext::new(chat).with_roster(vec![GroupMember::new("Alice")]),
            at,
        );

        assert_eq!(query.text(), "split $120");
        assert_eq!(query.issued_at(), at);
        assert_eq!(query.context().chat.chat_type, ChatKind::Group);
        assert_eq!(query.context().roster.len(), 1);
    }

    #[test]
    fn test_blank_query() {
        assert!(Query::now("   ").is_blank());
        assert!(!Query::now("hi").is_blank());
    }

    #[test]
    fn test_chat_metadata_skips_empty_fields() {
        let json = serde_json::to_value(ChatMetadata::default()).unwrap();
        assert!(json.get("group_id").is_none());
        assert_eq!(json["chat_type"], "direct");
    }
}
