use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message in a conversation transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// State of one chat session.
///
/// Created by the caller, threaded through each turn-processing call, and
/// returned updated. Nothing in the pipeline holds conversation history as
/// ambient state, so turns can be driven without a UI attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    pub session_id: Uuid,
    /// Stable identity of the person chatting, used to key memory storage.
    pub actor_id: String,
    pub transcript: Vec<ChatMessage>,
}

impl ConversationState {
    pub fn new(actor_id: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            actor_id: actor_id.into(),
            transcript: Vec::new(),
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.transcript.push(ChatMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.transcript.push(ChatMessage::assistant(content));
    }

    /// The most recent `k` messages, oldest first.
    pub fn last_k(&self, k: usize) -> &[ChatMessage] {
        let start = self.transcript.len().saturating_sub(k);
        &self.transcript[start..]
    }

    /// True before the first user message of the session.
    pub fn is_first_turn(&self) -> bool {
        self.transcript.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut state = ConversationState::new("actor-1");
        state.push_user("weather in Doha?");
        state.push_assistant("30C and sunny.");

        assert_eq!(state.transcript.len(), 2);
        assert_eq!(state.transcript[0].role, Role::User);
        assert_eq!(state.transcript[1].role, Role::Assistant);
        assert_eq!(state.transcript[1].content, "30C and sunny.");
    }

    #[test]
    fn test_last_k_clamps_to_length() {
        let mut state = ConversationState::new("actor-1");
        state.push_user("one");
        state.push_assistant("two");

        assert_eq!(state.last_k(10).len(), 2);
        let last = state.last_k(1);
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].content, "two");
    }

    #[test]
    fn test_first_turn_flag() {
        let mut state = ConversationState::new("actor-1");
        assert!(state.is_first_turn());
        state.push_user("hi");
        assert!(!state.is_first_turn());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut state = ConversationState::new("actor-1");
        state.push_user("hello");

        let json = serde_json::to_string(&state).unwrap();
        let back: ConversationState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.session_id, state.session_id);
        assert_eq!(back.transcript[0].content, "hello");
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }
}
