//! Text-completion transport (Hugging Face inference style).

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{error::EvalError, registry::ProviderKind};

use super::http::{format_error, join_url, normalize_base_url, provider_error_message, read_body};
use super::traits::{Transport, TransportRequest};
use super::{DEFAULT_MAX_NEW_TOKENS, DEFAULT_TEMPERATURE};

/// Configuration for a text-completion endpoint.
#[derive(Debug)]
pub struct TextCompletionConfig {
    /// Provider label used in error messages.
    pub name: String,
    /// Model names are appended to this URL.
    pub base_url: Url,
    pub api_key: SecretString,
    pub temperature: f32,
    pub max_new_tokens: u32,
}

/// Client for text-completion providers.
#[derive(Debug, Clone)]
pub struct TextCompletionTransport {
    pub config: Arc<TextCompletionConfig>,
    pub client: Client,
}

#[derive(Serialize, Debug)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Serialize, Debug)]
struct TextCompletionRequest {
    inputs: String,
    parameters: GenerationParameters,
}

#[derive(Deserialize, Debug)]
struct Generation {
    #[serde(default)]
    generated_text: Option<String>,
}

impl TextCompletionTransport {
    pub fn new(
        name: impl Into<String>,
        base_url: &str,
        api_key: impl Into<String>,
        temperature: Option<f32>,
        max_new_tokens: Option<u32>,
    ) -> Result<Self, EvalError> {
        Self::with_client(
            Client::new(),
            name,
            base_url,
            api_key,
            temperature,
            max_new_tokens,
        )
    }

    /// Creates a transport around an existing HTTP client.
    pub fn with_client(
        client: Client,
        name: impl Into<String>,
        base_url: &str,
        api_key: impl Into<String>,
        temperature: Option<f32>,
        max_new_tokens: Option<u32>,
    ) -> Result<Self, EvalError> {
        Ok(Self {
            config: Arc::new(TextCompletionConfig {
                name: name.into(),
                base_url: normalize_base_url(base_url)?,
                api_key: SecretString::new(api_key.into()),
                temperature: temperature.unwrap_or(DEFAULT_TEMPERATURE),
                max_new_tokens: max_new_tokens.unwrap_or(DEFAULT_MAX_NEW_TOKENS),
            }),
            client,
        })
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn endpoint(&self, model: &str) -> Result<Url, EvalError> {
        join_url(&self.config.base_url, model)
    }

    fn build_request(&self, request: &TransportRequest<'_>) -> TextCompletionRequest {
        TextCompletionRequest {
            inputs: build_input(request),
            parameters: GenerationParameters {
                max_new_tokens: self.config.max_new_tokens,
                temperature: self.config.temperature,
                return_full_text: false,
            },
        }
    }

    fn extract_text(&self, raw: &str) -> Result<String, EvalError> {
        match serde_json::from_str::<Vec<Generation>>(raw) {
            Ok(generations) => generations
                .into_iter()
                .next()
                .map(|g| g.generated_text.unwrap_or_default().trim().to_string())
                .ok_or_else(|| format_error("text completion returned no generations", raw)),
            Err(e) => match provider_error_message(raw) {
                Some(message) => Err(EvalError::ProviderError {
                    provider: self.config.name.clone(),
                    message,
                }),
                None => Err(format_error(
                    format!("unexpected text completion shape: {e}"),
                    raw,
                )),
            },
        }
    }
}

/// System prompt first, separated from the prompt by a blank line.
fn build_input(request: &TransportRequest<'_>) -> String {
    match request.system() {
        Some(system) => format!("{system}\n\n{}", request.prompt),
        None => request.prompt.to_string(),
    }
}

#[async_trait]
impl Transport for TextCompletionTransport {
    fn kind(&self) -> ProviderKind {
        ProviderKind::TextCompletion
    }

    async fn call(&self, request: &TransportRequest<'_>) -> Result<String, EvalError> {
        let api_key = self.config.api_key.expose_secret();
        if api_key.is_empty() {
            return Err(EvalError::AuthError(format!(
                "Missing {} API key",
                self.config.name
            )));
        }

        let body = self.build_request(request);

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("{} request payload: {}", self.config.name, json);
            }
        }

        let resp = self
            .client
            .post(self.endpoint(request.model)?)
            .bearer_auth(api_key)
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await?;

        let raw = read_body(&self.config.name, resp).await?;
        self.extract_text(&raw)
    }
}
