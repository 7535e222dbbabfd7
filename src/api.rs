//! Language-model client for article composition.
//!
//! This module provides the interface for the single model call the pipeline
//! makes per run. It uses a trait-based design for flexibility:
//! - [`TextModel`]: core trait defining async prompt-in/text-out completion
//! - [`OpenAiCompatClient`]: production implementation speaking the
//!   OpenAI-compatible chat-completions protocol over HTTP
//!
//! The client is constructed once at startup from CLI/environment
//! configuration and passed into the pipeline as a parameter; there is no
//! process-wide model instance, which keeps tests free to substitute a stub.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// Trait for async prompt-in/text-out model interaction.
///
/// Implementors send a prompt to a language model and return its plain-text
/// reply. The pipeline depends only on this trait, so backends can be
/// swapped or stubbed without touching the steps.
pub trait TextModel {
    /// Send a prompt to the model and receive its reply as plain text.
    ///
    /// # Errors
    ///
    /// Any transport or protocol failure is returned as-is; callers decide
    /// whether it is fatal (for article composition it is).
    async fn complete(&self, prompt: &str) -> Result<String, Box<dyn Error>>;
}

/// One message in a chat-completions request.
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Request body for the chat-completions endpoint.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// # Response Handling
///
/// The success body is parsed as a structured chat-completion object and the
/// first choice's message content is extracted; if the body is not such an
/// object (some compatible backends reply with bare text), the raw body is
/// used instead. Either way the caller receives plain text.
#[derive(Debug)]
pub struct OpenAiCompatClient {
    api_key: String,
    base_url: String,
    model: String,
    http: reqwest::Client,
}

impl OpenAiCompatClient {
    /// Create a client for the given endpoint, model, and credential.
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn headers(&self) -> Result<HeaderMap, Box<dyn Error>> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

impl TextModel for OpenAiCompatClient {
    #[instrument(level = "info", skip_all)]
    async fn complete(&self, prompt: &str) -> Result<String, Box<dyn Error>> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            temperature: 0.7,
        };

        debug!(model = %self.model, %url, "Model completion request");
        let t0 = Instant::now();

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let dt = t0.elapsed();

        if !status.is_success() {
            warn!(elapsed_ms = dt.as_millis() as u128, %status, "Model API call failed");
            return Err(format!("model API error ({status}): {body}").into());
        }

        debug!(elapsed_ms = dt.as_millis() as u128, bytes = body.len(), "Model API call succeeded");
        Ok(extract_text(&body))
    }
}

/// Pull plain text out of a model response body.
///
/// Accepts either a structured chat-completion object (first choice's
/// message content wins) or raw text from a backend that skips the wrapper.
fn extract_text(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ChatResponse>(body) {
        if let Some(content) = parsed.choices.into_iter().next().and_then(|c| c.message.content) {
            return content;
        }
    }
    body.to_string()
}
