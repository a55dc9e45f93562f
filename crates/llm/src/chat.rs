//! Minimal OpenAI-compatible chat-completions client.
//!
//! Works against OpenAI, Ollama, vLLM, Groq, OpenRouter, etc. No streaming:
//! the pipeline consumes whole labels and whole responses.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Endpoint, model, and credentials for the chat model.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub api_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
}

impl ChatConfig {
    /// Read the endpoint from `TRIAGE_API_URL`, the model from
    /// `TRIAGE_MODEL`, and the key from `TRIAGE_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("TRIAGE_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            model: std::env::var("TRIAGE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_key: std::env::var("TRIAGE_API_KEY").ok(),
            // Labels must be reproducible; generation inherits the same knob.
            temperature: 0.0,
        }
    }
}

// Request types
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

// Response types
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// One configured chat model, shared by the classifier and the generator.
pub struct ChatModel {
    http: Client,
    config: ChatConfig,
}

impl ChatModel {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// One system+user exchange; returns the whole reply body.
    pub(crate) async fn complete(&self, system: &str, user: &str) -> Result<String, String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.config.temperature,
        };

        let mut call = self.http.post(&self.config.api_url).json(&request);
        if let Some(key) = &self.config.api_key {
            call = call.bearer_auth(key);
        }

        let response = call.send().await.map_err(|e| format!("request failed: {e}"))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("API returned {status}: {body}"));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| format!("malformed response: {e}"))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        debug!(chars = content.len(), model = %self.config.model, "chat completion received");
        Ok(content)
    }
}
