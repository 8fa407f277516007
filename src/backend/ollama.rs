//! Ollama chat backend
//!
//! Non-streaming client for `POST {base_url}/api/chat`. The query is sent as
//! a single user-role message framed with the demo's assistant persona, and
//! the assistant's `message.content` comes back verbatim.

use std::sync::OnceLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::error::{Result, VoxgateError};

use super::Generator;

const SYSTEM_PROMPT: &str =
    "You are a helpful financial assistant. Answer the following query:";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

/// Ollama-compatible chat-completion backend.
pub struct OllamaBackend {
    base_url: String,
    model: String,
    // Shared handle, built once on first use; race-safe under concurrent
    // first requests.
    client: OnceLock<reqwest::Client>,
}

impl OllamaBackend {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> &reqwest::Client {
        self.client.get_or_init(reqwest::Client::new)
    }
}

#[async_trait]
impl Generator for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, text: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: format!("{SYSTEM_PROMPT} {text}"),
            }],
            stream: false,
        };

        let url = format!("{}/api/chat", self.base_url);
        tracing::debug!(url = %url, model = %self.model, "Requesting chat completion");

        let response = self.client().post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VoxgateError::Generation(format!(
                "chat server returned {status}: {body}"
            )));
        }

        let parsed: ChatResponse = response.json().await?;
        Ok(parsed.message.content)
    }
}
