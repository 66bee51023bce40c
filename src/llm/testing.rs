//! Mock chat service for testing without real I/O

use super::{ChatMessage, ChatService, Completion, LlmError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock chat service that returns queued responses
pub struct MockChatService {
    responses: Mutex<VecDeque<Result<Completion, LlmError>>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockChatService {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful completion
    pub fn queue_completion(&self, message: impl Into<String>, usage: serde_json::Value) {
        self.responses.lock().unwrap().push_back(Ok(Completion {
            message: message.into(),
            usage,
        }));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded outbound payloads
    pub fn recorded_requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of outbound calls made
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for MockChatService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChatService {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Completion, LlmError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }
}
