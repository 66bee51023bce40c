//! API request and response types

use serde::Serialize;
use serde_json::Value;

/// Success payload of the relay endpoint
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// The assistant's reply text
    pub message: String,
    /// Provider token accounting, passed through opaquely
    pub usage: Value,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
