//! Completion API client boundary.
//!
//! The transport response is accepted in two shapes and normalized here
//! into [`Completion`] before any other code sees it.

use crate::config::Config;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Normalized result of one completion call.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Text of the first generated message, verbatim.
    pub text: String,
}

/// Trait for chat-completion providers.
///
/// The pipeline only depends on this trait, so tests can inject a fake
/// provider instead of a live endpoint.
pub trait CompletionClient: Send + Sync {
    /// Submits a single user-role message and returns the generated text.
    ///
    /// One synchronous request, no streaming, no multi-turn context.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// normalized.
    fn complete(&self, content: &str) -> Result<Completion>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Blocking client for an OpenAI-compatible chat-completion endpoint.
pub struct OpenAiClient {
    http: reqwest::blocking::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, content: &str) -> Result<Completion> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content,
            }],
        };

        let url = format!("{}/chat/completions", self.api_base);
        debug!("POST {} (model {})", url, self.model);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::ApiStatus {
                status: status.as_u16(),
                message: truncate(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        let body: serde_json::Value = response.json()?;
        normalize(&body)
    }
}

/// Converts either accepted transport shape into a [`Completion`].
///
/// Shape one is the structured body where every choice deserializes to a
/// message with text content. Shape two is a loose mapping carrying a
/// `choices` key; only the first entry is inspected. Anything else is the
/// per-candidate "unexpected response format" error.
fn normalize(body: &serde_json::Value) -> Result<Completion> {
    if let Ok(parsed) = serde_json::from_value::<ChatResponse>(body.clone()) {
        if let Some(choice) = parsed.choices.into_iter().next() {
            return Ok(Completion {
                text: choice.message.content,
            });
        }
    }

    body.get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(|text| Completion {
            text: text.to_string(),
        })
        .ok_or(Error::UnexpectedResponse)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    text.chars().take(max_chars).collect()
}
