//! Terminal conversation client
//!
//! Drives the session state machine against a running relaychat
//! server. Each stdin line is one turn; failures surface as a banner
//! line plus the fixed fallback reply, never silently.

use async_trait::async_trait;
use relaychat::llm::ChatMessage;
use relaychat::session::{
    ChatSession, Message, MessageRole, Relay, RelayError, RelayReply, SubmitOutcome,
};
use serde::Deserialize;
use serde_json::json;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// HTTP transport to the relay endpoint
struct HttpRelay {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRelay {
    fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/chat", base_url.trim_end_matches('/')),
        }
    }
}

#[derive(Deserialize)]
struct ReplyBody {
    message: String,
    #[serde(default)]
    usage: serde_json::Value,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[async_trait]
impl Relay for HttpRelay {
    async fn send(&self, messages: Vec<ChatMessage>) -> Result<RelayReply, RelayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "messages": messages }))
            .send()
            .await
            .map_err(|e| RelayError::new(format!("Request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::new(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("HTTP {status}"));
            return Err(RelayError::new(message));
        }

        let reply: ReplyBody = serde_json::from_str(&body)
            .map_err(|e| RelayError::new(format!("Malformed reply: {e}")))?;

        Ok(RelayReply {
            message: reply.message,
            usage: reply.usage,
        })
    }
}

fn print_message(msg: &Message) {
    let who = match msg.role {
        MessageRole::User => "you",
        MessageRole::Assistant => "relaychat",
    };
    println!("[{}] {}: {}", msg.timestamp.format("%H:%M:%S"), who, msg.content);
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url =
        std::env::var("RELAYCHAT_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());

    let mut session = ChatSession::new(HttpRelay::new(&base_url));
    session.start();

    if let Some(welcome) = session.messages().first() {
        print_message(welcome);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt();
    while let Some(line) = lines.next_line().await? {
        match session.submit(&line).await {
            SubmitOutcome::Ignored => {
                // Blank input: nothing changed, just re-prompt.
            }
            SubmitOutcome::Replied | SubmitOutcome::Failed => {
                if let Some(banner) = session.banner() {
                    eprintln!("error: {banner}");
                    session.dismiss_banner();
                }
                if let Some(reply) = session.messages().last() {
                    print_message(reply);
                }
            }
        }
        prompt();
    }

    Ok(())
}
