//! Chat-completion provider abstraction
//!
//! A single trait over the outbound provider call so the relay
//! endpoint can be exercised against a mock in tests.

mod error;
mod openai;
#[cfg(test)]
pub mod testing;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use openai::OpenAIService;
pub use types::{ChatMessage, Completion, Role};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for chat-completion providers
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Make a single completion request. No retries.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Completion, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Logging wrapper for chat services
pub struct LoggingService {
    inner: Arc<dyn ChatService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn ChatService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl ChatService for LoggingService {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Completion, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(messages).await;
        let duration = start.elapsed();

        match &result {
            Ok(completion) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    messages = messages.len(),
                    usage = %completion.usage,
                    "Completion request succeeded"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    "Completion request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
