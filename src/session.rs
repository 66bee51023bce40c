//! Conversation client
//!
//! Implements the Elm Architecture pattern: a pure transition function
//! over session state, plus a driver that owns the message list and
//! executes the resulting effects against a relay transport.

mod driver;
mod effect;
mod event;
#[cfg(test)]
mod proptests;
mod state;
mod transition;

pub use driver::{ChatSession, Relay, RelayError, RelayReply, SubmitOutcome};
pub use effect::Effect;
pub use event::Event;
pub use state::{Message, MessageRole, SessionState, FALLBACK_REPLY, WELCOME_ID};
pub use transition::{transition, TransitionError, TransitionResult};
