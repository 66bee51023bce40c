//! Fixed system preamble prepended to every outbound conversation
//!
//! The preamble is injected server-side only. It never appears in the
//! client's own message list and the client cannot override it.

use crate::llm::{ChatMessage, Role};

/// Instructional message establishing the assistant's role
const SYSTEM_PREAMBLE: &str = "You are RelayChat, a helpful AI chat assistant. \
Answer the user's questions and provide useful, accurate information. \
You may use Markdown formatting to keep answers clear and readable. \
Keep a friendly, professional tone.";

/// Build the system message that leads every provider-bound payload
pub fn system_message() -> ChatMessage {
    ChatMessage {
        role: Role::System,
        content: SYSTEM_PREAMBLE.to_string(),
    }
}
