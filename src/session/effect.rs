//! Effects produced by state transitions

use super::state::Message;
use crate::llm::ChatMessage;

/// Effects to be executed after a state transition
#[derive(Debug, Clone)]
pub enum Effect {
    /// Append a message to the display list
    AppendMessage(Message),
    /// Clear any visible error banner
    ClearBanner,
    /// Show a dismissible error banner
    ShowBanner(String),
    /// Send the payload to the relay endpoint
    SendChat { messages: Vec<ChatMessage> },
}
