//! Conversation types for the ordering assistant

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
    /// Context-only message, sent upstream but never shown to the customer
    #[serde(default)]
    pub hidden: bool,
    pub created_at: DateTime<Utc>,
}

impl ConversationMessage {
    fn build(role: Role, content: impl Into<String>, hidden: bool) -> Self {
        Self {
            role,
            content: content.into(),
            hidden,
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::build(Role::User, content, false)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::build(Role::Assistant, content, false)
    }

    /// Hidden system note (e.g. stated party size)
    pub fn system_note(content: impl Into<String>) -> Self {
        Self::build(Role::System, content, true)
    }
}

/// Request body for one chat turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let m = ConversationMessage::user("add fries");
        assert_eq!(m.role, Role::User);
        assert!(!m.hidden);

        let m = ConversationMessage::system_note("party of 4");
        assert_eq!(m.role, Role::System);
        assert!(m.hidden);
    }

    #[test]
    fn test_role_serde() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        assert_eq!(Role::System.as_str(), "system");
    }

    #[test]
    fn test_hidden_defaults_false() {
        let json = r#"{"role":"user","content":"hi","created_at":"2024-01-01T00:00:00Z"}"#;
        let m: ConversationMessage = serde_json::from_str(json).unwrap();
        assert!(!m.hidden);
    }
}
