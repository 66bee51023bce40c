//! Pure state transition function for the conversation client
//!
//! Given the current state, the display history, and an event, produce
//! the next state and the effects to execute. No I/O happens here; the
//! driver owns the message list and performs the effects.

use super::state::{Message, SessionState, FALLBACK_REPLY};
use super::{Effect, Event};
use crate::llm::ChatMessage;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Rejected events. Rejection leaves state and history untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Input is blank")]
    BlankInput,
    #[error("A reply is already pending")]
    ReplyPending,
    #[error("Session is not initialized yet")]
    NotReady,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
pub fn transition(
    state: &SessionState,
    history: &[Message],
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Welcome insertion happens exactly once, when the session
        // becomes ready and the list is still empty.
        (SessionState::Empty, Event::Ready) => {
            let result = TransitionResult::new(SessionState::Idle);
            if history.is_empty() {
                Ok(result.with_effect(Effect::AppendMessage(Message::welcome())))
            } else {
                Ok(result)
            }
        }

        // Ready after seeding is a no-op.
        (SessionState::Idle | SessionState::AwaitingReply, Event::Ready) => {
            Ok(TransitionResult::new(*state))
        }

        (SessionState::Empty, Event::Submit { .. }) => Err(TransitionError::NotReady),

        // Sole concurrency guard: at most one in-flight relay call.
        (SessionState::AwaitingReply, Event::Submit { .. }) => Err(TransitionError::ReplyPending),

        (SessionState::Idle, Event::Submit { text }) => {
            if text.trim().is_empty() {
                return Err(TransitionError::BlankInput);
            }

            let user_message = Message::user(text);
            let payload = outbound_payload(history, &user_message);

            Ok(TransitionResult::new(SessionState::AwaitingReply)
                .with_effect(Effect::AppendMessage(user_message))
                .with_effect(Effect::ClearBanner)
                .with_effect(Effect::SendChat { messages: payload }))
        }

        (SessionState::AwaitingReply, Event::ReplyReceived { message }) => {
            Ok(TransitionResult::new(SessionState::Idle)
                .with_effect(Effect::AppendMessage(Message::assistant(message))))
        }

        // Failure is never silent: banner AND fallback reply, then
        // back to accepting input.
        (SessionState::AwaitingReply, Event::ReplyFailed { message }) => {
            Ok(TransitionResult::new(SessionState::Idle)
                .with_effect(Effect::ShowBanner(message))
                .with_effect(Effect::AppendMessage(Message::assistant(FALLBACK_REPLY))))
        }

        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {state:?} with event {event:?}"
        ))),
    }
}

/// Display order minus the welcome entry, projected to wire messages,
/// with the new user message appended. The entire history is resent on
/// every turn.
fn outbound_payload(history: &[Message], user_message: &Message) -> Vec<ChatMessage> {
    history
        .iter()
        .filter(|msg| !msg.is_welcome())
        .map(Message::to_wire)
        .chain(std::iter::once(user_message.to_wire()))
        .collect()
}
