//! HTTP API for the relay server

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::{ChatResponse, ErrorResponse};

use crate::config::RelayConfig;
use crate::llm::ChatService;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<dyn ChatService>,
    pub config: Arc<RelayConfig>,
}

impl AppState {
    pub fn new(chat: Arc<dyn ChatService>, config: RelayConfig) -> Self {
        Self {
            chat,
            config: Arc::new(config),
        }
    }
}
