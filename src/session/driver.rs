//! Effect-executing driver for the conversation client
//!
//! Owns the message list, runs the pure transition function, and
//! performs the effects it emits. The relay transport is a trait so
//! tests can inject a mock and the REPL can plug in HTTP.

use super::state::{Message, SessionState};
use super::transition::{transition, TransitionError, TransitionResult};
use super::{Effect, Event};
use crate::llm::ChatMessage;
use async_trait::async_trait;
use serde_json::Value;

/// Successful reply from the relay endpoint
#[derive(Debug, Clone)]
pub struct RelayReply {
    pub message: String,
    pub usage: Value,
}

/// Relay failure. The client does not distinguish error kinds: every
/// failure produces the same banner plus fallback reply.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct RelayError {
    pub message: String,
}

impl RelayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Transport to the relay endpoint
#[async_trait]
pub trait Relay: Send + Sync {
    async fn send(&self, messages: Vec<ChatMessage>) -> Result<RelayReply, RelayError>;
}

/// What a submission did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The assistant's reply was appended
    Replied,
    /// A banner was shown and the fallback reply appended
    Failed,
    /// Blank input or a reply already pending; nothing changed
    Ignored,
}

/// One conversation session. Lives entirely in memory; the list is
/// append-only and dropped with the session.
pub struct ChatSession<R: Relay> {
    relay: R,
    state: SessionState,
    messages: Vec<Message>,
    banner: Option<String>,
}

impl<R: Relay> ChatSession<R> {
    pub fn new(relay: R) -> Self {
        Self {
            relay,
            state: SessionState::Empty,
            messages: Vec::new(),
            banner: None,
        }
    }

    /// Mark the session initialized. Inserts the welcome message the
    /// first time; later calls are no-ops.
    pub fn start(&mut self) {
        if let Ok(result) = transition(&self.state, &self.messages, Event::Ready) {
            self.apply(result);
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Submit user input and await the reply.
    ///
    /// The user message is appended optimistically before the relay
    /// call; on failure the session shows a banner, appends the
    /// fallback reply, and stays usable.
    pub async fn submit(&mut self, text: &str) -> SubmitOutcome {
        let result = match transition(
            &self.state,
            &self.messages,
            Event::Submit {
                text: text.to_string(),
            },
        ) {
            Ok(result) => result,
            Err(
                TransitionError::BlankInput
                | TransitionError::ReplyPending
                | TransitionError::NotReady,
            ) => return SubmitOutcome::Ignored,
            Err(TransitionError::InvalidTransition(_)) => return SubmitOutcome::Ignored,
        };

        let Some(payload) = self.apply(result) else {
            return SubmitOutcome::Ignored;
        };

        let (event, outcome) = match self.relay.send(payload).await {
            Ok(reply) => (
                Event::ReplyReceived {
                    message: reply.message,
                },
                SubmitOutcome::Replied,
            ),
            Err(e) => (
                Event::ReplyFailed { message: e.message },
                SubmitOutcome::Failed,
            ),
        };

        if let Ok(result) = transition(&self.state, &self.messages, event) {
            self.apply(result);
        }
        outcome
    }

    /// Apply a transition result, returning any outbound payload
    fn apply(&mut self, result: TransitionResult) -> Option<Vec<ChatMessage>> {
        self.state = result.new_state;
        let mut payload = None;
        for effect in result.effects {
            match effect {
                Effect::AppendMessage(msg) => self.messages.push(msg),
                Effect::ClearBanner => self.banner = None,
                Effect::ShowBanner(text) => self.banner = Some(text),
                Effect::SendChat { messages } => payload = Some(messages),
            }
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;
    use crate::session::state::{MessageRole, FALLBACK_REPLY};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Mock relay with queued results and recorded payloads
    struct MockRelay {
        responses: Mutex<VecDeque<Result<RelayReply, RelayError>>>,
        payloads: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl MockRelay {
        fn new() -> Self {
            Self {
                responses: Mutex::new(VecDeque::new()),
                payloads: Mutex::new(Vec::new()),
            }
        }

        fn queue_reply(&self, message: &str) {
            self.responses.lock().unwrap().push_back(Ok(RelayReply {
                message: message.to_string(),
                usage: Value::Null,
            }));
        }

        fn queue_error(&self, message: &str) {
            self.responses
                .lock()
                .unwrap()
                .push_back(Err(RelayError::new(message)));
        }
    }

    #[async_trait]
    impl Relay for &MockRelay {
        async fn send(&self, messages: Vec<ChatMessage>) -> Result<RelayReply, RelayError> {
            self.payloads.lock().unwrap().push(messages);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(RelayError::new("No mock response queued")))
        }
    }

    #[test]
    fn start_seeds_welcome_exactly_once() {
        let relay = MockRelay::new();
        let mut session = ChatSession::new(&relay);

        session.start();
        session.start();

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.messages().len(), 1);
        assert!(session.messages()[0].is_welcome());
    }

    #[tokio::test]
    async fn successful_turn_appends_both_messages() {
        let relay = MockRelay::new();
        relay.queue_reply("the answer");
        let mut session = ChatSession::new(&relay);
        session.start();

        let outcome = session.submit("the question").await;

        assert_eq!(outcome, SubmitOutcome::Replied);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.banner().is_none());

        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].content, "the question");
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[2].content, "the answer");
        assert_eq!(messages[2].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn payload_never_contains_welcome_entry() {
        let relay = MockRelay::new();
        relay.queue_reply("a");
        relay.queue_reply("b");
        let mut session = ChatSession::new(&relay);
        session.start();

        session.submit("first").await;
        session.submit("second").await;

        for payload in relay.payloads.lock().unwrap().iter() {
            assert!(payload.iter().all(|m| m.role != Role::System));
            assert!(payload
                .iter()
                .all(|m| !m.content.starts_with("Hi! I'm RelayChat")));
        }
        // Second turn resends the whole first turn plus the new input
        let payloads = relay.payloads.lock().unwrap();
        let contents: Vec<&str> = payloads[1].iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["first", "a", "second"]);
    }

    #[tokio::test]
    async fn blank_submission_changes_nothing() {
        let relay = MockRelay::new();
        let mut session = ChatSession::new(&relay);
        session.start();

        let outcome = session.submit("   ").await;

        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert_eq!(session.messages().len(), 1);
        assert!(relay.payloads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failure_shows_one_banner_and_one_fallback() {
        let relay = MockRelay::new();
        relay.queue_error("relay unreachable");
        let mut session = ChatSession::new(&relay);
        session.start();

        let outcome = session.submit("hello?").await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(session.banner(), Some("relay unreachable"));

        let fallbacks = session
            .messages()
            .iter()
            .filter(|m| m.content == FALLBACK_REPLY)
            .count();
        assert_eq!(fallbacks, 1);

        // Session returns to an input-accepting state
        assert_eq!(session.state(), SessionState::Idle);
        relay.queue_reply("recovered");
        assert_eq!(session.submit("again").await, SubmitOutcome::Replied);
    }

    #[tokio::test]
    async fn new_submission_clears_previous_banner() {
        let relay = MockRelay::new();
        relay.queue_error("boom");
        relay.queue_reply("fine now");
        let mut session = ChatSession::new(&relay);
        session.start();

        session.submit("one").await;
        assert!(session.banner().is_some());

        session.submit("two").await;
        assert!(session.banner().is_none());
    }

    #[tokio::test]
    async fn turns_accumulate_in_submission_order() {
        let relay = MockRelay::new();
        for i in 0..4 {
            relay.queue_reply(&format!("reply {i}"));
        }
        let mut session = ChatSession::new(&relay);
        session.start();

        for i in 0..4 {
            session.submit(&format!("turn {i}")).await;
        }

        // Welcome plus four user/assistant pairs, in order, unchanged
        let messages = session.messages();
        assert_eq!(messages.len(), 9);
        for i in 0..4 {
            assert_eq!(messages[1 + i * 2].content, format!("turn {i}"));
            assert_eq!(messages[2 + i * 2].content, format!("reply {i}"));
        }
    }
}
