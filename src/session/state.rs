//! Conversation client state and message types

use crate::llm::{ChatMessage, Role};
use chrono::{DateTime, Local};
use uuid::Uuid;

/// Fixed id of the synthetic welcome entry. Messages carrying this id
/// exist only in display state and are excluded from every outbound
/// payload.
pub const WELCOME_ID: &str = "welcome";

/// Greeting inserted once when the session becomes ready
pub const WELCOME_TEXT: &str = "Hi! I'm RelayChat, an AI chat assistant. \
I can answer questions and hold a conversation, with replies formatted \
in Markdown. What can I help you with?";

/// Fixed assistant reply appended when a relay call fails
pub const FALLBACK_REPLY: &str = "Sorry, I can't respond to your message \
right now. Please check your connection and try again.";

/// Role of a client-visible message. The system role is injected
/// server-side only and never appears in the display list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

impl From<MessageRole> for Role {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::User => Role::User,
            MessageRole::Assistant => Role::Assistant,
        }
    }
}

/// A message in the client's display list. Append-only for the
/// lifetime of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    /// Display-only; never sent to the server
    pub timestamp: DateTime<Local>,
}

impl Message {
    fn tagged(id: impl Into<String>, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
            timestamp: Local::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::tagged(Uuid::new_v4().to_string(), MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::tagged(Uuid::new_v4().to_string(), MessageRole::Assistant, content)
    }

    pub fn welcome() -> Self {
        Self::tagged(WELCOME_ID, MessageRole::Assistant, WELCOME_TEXT)
    }

    pub fn is_welcome(&self) -> bool {
        self.id == WELCOME_ID
    }

    /// Project to the `{role, content}` pair sent over the wire
    pub fn to_wire(&self) -> ChatMessage {
        ChatMessage::new(self.role.into(), self.content.clone())
    }
}

/// Conversation client state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Fresh session, welcome message not yet inserted
    #[default]
    Empty,
    /// Ready for user input
    Idle,
    /// A relay call is in flight; new submissions are rejected
    AwaitingReply,
}
