//! Chat-completion transport (OpenAI compatible `chat/completions`, e.g. Groq).

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{error::EvalError, registry::ProviderKind};

use super::http::{format_error, join_url, normalize_base_url, read_body};
use super::traits::{Transport, TransportRequest};
use super::DEFAULT_TEMPERATURE;

/// Configuration for a chat-completion endpoint.
#[derive(Debug)]
pub struct ChatCompletionConfig {
    /// Provider label used in error messages.
    pub name: String,
    pub base_url: Url,
    pub api_key: SecretString,
    pub temperature: f32,
}

/// Client for chat-completion providers.
///
/// Configuration sits behind an `Arc`, so clones share it.
#[derive(Debug, Clone)]
pub struct ChatCompletionTransport {
    pub config: Arc<ChatCompletionConfig>,
    pub client: Client,
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize, Debug)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionResponse {
    fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
    }
}

impl ChatCompletionTransport {
    pub fn new(
        name: impl Into<String>,
        base_url: &str,
        api_key: impl Into<String>,
        temperature: Option<f32>,
    ) -> Result<Self, EvalError> {
        Self::with_client(Client::new(), name, base_url, api_key, temperature)
    }

    /// Creates a transport around an existing HTTP client.
    pub fn with_client(
        client: Client,
        name: impl Into<String>,
        base_url: &str,
        api_key: impl Into<String>,
        temperature: Option<f32>,
    ) -> Result<Self, EvalError> {
        Ok(Self {
            config: Arc::new(ChatCompletionConfig {
                name: name.into(),
                base_url: normalize_base_url(base_url)?,
                api_key: SecretString::new(api_key.into()),
                temperature: temperature.unwrap_or(DEFAULT_TEMPERATURE),
            }),
            client,
        })
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn endpoint(&self) -> Result<Url, EvalError> {
        join_url(&self.config.base_url, "chat/completions")
    }
}

fn build_messages<'a>(request: &TransportRequest<'a>) -> Vec<ChatMessage<'a>> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = request.system() {
        messages.push(ChatMessage {
            role: "system",
            content: system,
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: request.prompt,
    });
    messages
}

#[async_trait]
impl Transport for ChatCompletionTransport {
    fn kind(&self) -> ProviderKind {
        ProviderKind::ChatCompletion
    }

    async fn call(&self, request: &TransportRequest<'_>) -> Result<String, EvalError> {
        let api_key = self.config.api_key.expose_secret();
        if api_key.is_empty() {
            return Err(EvalError::AuthError(format!(
                "Missing {} API key",
                self.config.name
            )));
        }

        let body = ChatCompletionRequest {
            model: request.model,
            messages: build_messages(request),
            temperature: self.config.temperature,
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("{} request payload: {}", self.config.name, json);
            }
        }

        let resp = self
            .client
            .post(self.endpoint()?)
            .bearer_auth(api_key)
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await?;

        let raw = read_body(&self.config.name, resp).await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&raw)
            .map_err(|e| format_error(format!("unexpected chat completion shape: {e}"), &raw))?;

        parsed
            .into_text()
            .ok_or_else(|| format_error("chat completion returned no choices", &raw))
    }
}
