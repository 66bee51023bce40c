//! HTTP request handlers

use super::types::{ChatResponse, ErrorResponse};
use super::AppState;
use crate::llm::{ChatMessage, LlmError, LlmErrorKind};
use crate::system_prompt;
use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Message relay
        .route("/api/chat", post(relay_chat))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Message Relay
// ============================================================

/// Relay one conversation turn to the completion provider.
///
/// The request is validated and the configuration checked before any
/// outbound call is made; every failure is classified once and
/// returned immediately. No retries, no caching, no state.
async fn relay_chat(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<ChatResponse>, AppError> {
    let history = parse_messages(&body)?;

    // Fail closed on a missing or placeholder credential without
    // touching the provider.
    if state.config.credential().is_none() {
        return Err(AppError::ConfigurationMissing);
    }

    // The system preamble always leads; the client-supplied history
    // follows unmodified, in order.
    let mut outbound = Vec::with_capacity(history.len() + 1);
    outbound.push(system_prompt::system_message());
    outbound.extend(history);

    let completion = state.chat.complete(&outbound).await?;

    Ok(Json(ChatResponse {
        message: completion.message,
        usage: completion.usage,
    }))
}

/// Validate the `messages` field: present, an array, and every element
/// a well-formed `{role, content}` pair.
fn parse_messages(body: &Value) -> Result<Vec<ChatMessage>, AppError> {
    let messages = body
        .get("messages")
        .ok_or_else(|| AppError::InvalidInput("Missing messages field".to_string()))?;

    let items = messages
        .as_array()
        .ok_or_else(|| AppError::InvalidInput("Messages must be an array".to_string()))?;

    items
        .iter()
        .map(|item| {
            serde_json::from_value::<ChatMessage>(item.clone())
                .map_err(|e| AppError::InvalidInput(format!("Malformed message: {e}")))
        })
        .collect()
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("relaychat ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

/// Endpoint failure, classified once
enum AppError {
    /// Malformed request to the endpoint (400)
    InvalidInput(String),
    /// Credential unset or placeholder (500)
    ConfigurationMissing,
    /// Outbound provider failure (429 for rate limits, 500 otherwise)
    Provider(LlmError),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Provider(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, retry_after) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::ConfigurationMissing => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "API credential is not configured".to_string(),
                None,
            ),
            AppError::Provider(e) => {
                let status = match e.kind {
                    LlmErrorKind::RateLimit => StatusCode::TOO_MANY_REQUESTS,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.message, e.retry_after)
            }
        };

        let mut response = (status, Json(ErrorResponse::new(message))).into_response();
        if let Some(delay) = retry_after {
            if let Ok(value) = HeaderValue::from_str(&delay.as_secs().to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}
