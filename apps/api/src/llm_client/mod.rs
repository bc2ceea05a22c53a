/// Completion client — the single point of entry for all DeepSeek API calls.
///
/// ARCHITECTURAL RULE: No other module may call the completion API directly.
/// The card producer reaches it through the [`CompletionBackend`] trait so
/// tests can substitute a fake backend.
///
/// Model: deepseek-chat (hardcoded — do not make configurable to prevent drift)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Chat-completions path, appended to the configured base URL.
const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
/// The model used for all card generation calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "deepseek-chat";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("LLM attempt exceeded the {}s budget", .0.as_secs())]
    Timeout(Duration),
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct DeepSeekError {
    error: DeepSeekErrorBody,
}

#[derive(Debug, Deserialize)]
struct DeepSeekErrorBody {
    message: String,
}

/// A chat-style completion backend: system and user prompt in, assistant
/// text out. One attempt per call; the caller decides what a failure means.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;
}

/// DeepSeek chat-completions client.
/// No retry logic: the producer treats any failed attempt as a signal to
/// fall back to the local template, so a second attempt would only burn
/// more of the request budget.
#[derive(Clone)]
pub struct DeepSeekClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl DeepSeekClient {
    /// `timeout` is the transport-level ceiling. The producer applies the
    /// same budget around the whole attempt, so this mainly guards against
    /// a connection that stalls without failing.
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Makes a single chat-completions call and returns the assistant text.
    async fn chat(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request_body = ChatCompletionRequest {
            model: MODEL,
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
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}{}", self.base_url, CHAT_COMPLETIONS_PATH))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Try to parse the {"error": {"message": ...}} envelope
            let message = serde_json::from_str::<DeepSeekError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        extract_content(completion)
    }
}

#[async_trait]
impl CompletionBackend for DeepSeekClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        self.chat(system, user).await
    }
}

/// Pulls the assistant text out of a completion. A response with no choices
/// or nothing but whitespace counts as empty.
fn extract_content(completion: ChatCompletionResponse) -> Result<String, LlmError> {
    completion
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(LlmError::EmptyContent)
}
