//! RelayChat - a minimal chat relay
//!
//! A thin HTTP endpoint that forwards conversations to an
//! OpenAI-compatible chat-completion provider, plus the conversation
//! client state machine that drives it.

pub mod api;
pub mod config;
pub mod llm;
pub mod session;
pub mod system_prompt;
