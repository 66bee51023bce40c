//! OpenAI-compatible chat-completion client
//!
//! Works against any provider exposing the `chat/completions` wire
//! format (DeepSeek in the default configuration).

use super::types::{ChatMessage, Completion};
use super::{ChatService, LlmError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Sampling temperature, deterministic-leaning
const TEMPERATURE: f32 = 0.7;
/// Output-length cap, generous but finite
const MAX_TOKENS: u32 = 4000;

/// OpenAI-compatible service implementation
pub struct OpenAIService {
    client: Client,
    api_key: String,
    model: String,
    completions_url: String,
}

impl OpenAIService {
    /// `api_base` is the provider root, e.g. `https://api.deepseek.com`
    pub fn new(api_key: String, api_base: &str, model: String) -> Self {
        // No request timeout: the relay makes a single synchronous
        // call and relies on the transport defaults.
        let completions_url = format!("{}/chat/completions", api_base.trim_end_matches('/'));

        Self {
            client: Client::new(),
            api_key,
            model,
            completions_url,
        }
    }

    fn build_request(&self, messages: &[ChatMessage]) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            stream: false,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[async_trait]
impl ChatService for OpenAIService {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Completion, LlmError> {
        let request = self.build_request(messages);

        let response = self
            .client
            .post(&self.completions_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    LlmError::network(format!("Connection failed: {e}"))
                } else {
                    LlmError::network(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let retry_after = parse_retry_after(response.headers());
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<CompletionErrorResponse>(&body) {
                Ok(error_resp) => error_resp.error.message,
                Err(_) => body,
            };
            return Err(classify_status(status.as_u16(), &message, retry_after));
        }

        let completion_response: CompletionResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::malformed(format!("Failed to parse response: {e}")))?;

        normalize_response(completion_response)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// Map a non-success provider status to a classified error
fn classify_status(status: u16, message: &str, retry_after: Option<Duration>) -> LlmError {
    match status {
        401 | 403 => LlmError::auth(format!("Authentication failed: {message}")),
        429 => {
            let err = LlmError::rate_limit(format!("Rate limit exceeded: {message}"));
            match retry_after {
                Some(delay) => err.with_retry_after(delay),
                None => err,
            }
        }
        _ => LlmError::upstream(format!("HTTP {status}: {message}")),
    }
}

fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Extract `choices[0].message.content` and the usage object
fn normalize_response(resp: CompletionResponse) -> Result<Completion, LlmError> {
    let choice = resp
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::malformed("No choices in response"))?;

    let message = choice
        .message
        .content
        .ok_or_else(|| LlmError::malformed("Choice has no message content"))?;

    Ok(Completion {
        message,
        usage: resp.usage,
    })
}

// Provider wire types

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
    #[serde(default)]
    usage: Value,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletionErrorResponse {
    error: CompletionError,
}

#[derive(Debug, Deserialize)]
struct CompletionError {
    message: String,
}
