//! Property-based tests for the outbound payload construction
//!
//! Verify the payload invariants over arbitrary histories:
//! - the welcome entry never reaches the wire
//! - order and content of the remaining history are preserved
//! - roles project one-to-one (user stays user, assistant stays assistant)
//! - the submitted text is always the final element

use super::state::{Message, MessageRole, SessionState};
use super::transition::transition;
use super::{Effect, Event};
use crate::llm::Role;
use proptest::prelude::*;

/// A user or assistant message with printable content
fn arb_message() -> impl Strategy<Value = Message> {
    (any::<bool>(), "[a-zA-Z0-9 _.!?,]{1,80}").prop_map(|(is_user, content)| {
        if is_user {
            Message::user(content)
        } else {
            Message::assistant(content)
        }
    })
}

/// A display history: optionally seeded with the welcome entry,
/// followed by up to eight ordinary messages
fn arb_history() -> impl Strategy<Value = Vec<Message>> {
    (any::<bool>(), proptest::collection::vec(arb_message(), 0..8)).prop_map(
        |(seeded, mut rest)| {
            if seeded {
                rest.insert(0, Message::welcome());
            }
            rest
        },
    )
}

fn submit(history: &[Message], text: &str) -> Vec<crate::llm::ChatMessage> {
    let result = transition(
        &SessionState::Idle,
        history,
        Event::Submit {
            text: text.to_string(),
        },
    )
    .expect("non-blank submission from Idle must succeed");

    result
        .effects
        .into_iter()
        .find_map(|effect| match effect {
            Effect::SendChat { messages } => Some(messages),
            _ => None,
        })
        .expect("submission must emit a SendChat effect")
}

proptest! {
    #[test]
    fn welcome_never_reaches_the_wire(history in arb_history(), text in "[a-zA-Z0-9 ]{1,40}") {
        let payload = submit(&history, &text);
        let welcome = Message::welcome();
        prop_assert!(payload.iter().all(|m| m.content != welcome.content));
    }

    #[test]
    fn payload_is_history_in_order_plus_new_input(
        history in arb_history(),
        text in "[a-zA-Z0-9 ]{1,40}",
    ) {
        let payload = submit(&history, &text);
        let expected: Vec<&Message> = history.iter().filter(|m| !m.is_welcome()).collect();

        prop_assert_eq!(payload.len(), expected.len() + 1);
        for (wire, original) in payload.iter().zip(&expected) {
            prop_assert_eq!(&wire.content, &original.content);
            let expected_role = match original.role {
                MessageRole::User => Role::User,
                MessageRole::Assistant => Role::Assistant,
            };
            prop_assert_eq!(wire.role, expected_role);
        }

        let last = payload.last().unwrap();
        prop_assert_eq!(last.role, Role::User);
        prop_assert_eq!(&last.content, &text);
    }

    #[test]
    fn client_payload_never_carries_system_role(
        history in arb_history(),
        text in "[a-zA-Z0-9 ]{1,40}",
    ) {
        let payload = submit(&history, &text);
        prop_assert!(payload.iter().all(|m| m.role != Role::System));
    }
}
