use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::{error::EvalError, registry::ProviderKind};

/// Everything a transport needs for one call.
#[derive(Debug, Clone, Copy)]
pub struct TransportRequest<'a> {
    pub prompt: &'a str,
    /// Empty means "no system prompt".
    pub system_prompt: &'a str,
    /// Model name as the provider knows it.
    pub model: &'a str,
    pub timeout: Duration,
}

impl<'a> TransportRequest<'a> {
    pub fn new(prompt: &'a str, system_prompt: &'a str, model: &'a str, timeout: Duration) -> Self {
        Self {
            prompt,
            system_prompt,
            model,
            timeout,
        }
    }

    pub fn system(&self) -> Option<&'a str> {
        if self.system_prompt.is_empty() {
            None
        } else {
            Some(self.system_prompt)
        }
    }
}

/// A provider-specific network adapter.
///
/// Implementations must return every failure as an [`EvalError`]; they never panic on
/// provider input.
#[async_trait]
pub trait Transport: Send + Sync {
    /// The API shape this transport speaks.
    fn kind(&self) -> ProviderKind;

    /// Sends the prompt and returns the raw reply text.
    async fn call(&self, request: &TransportRequest<'_>) -> Result<String, EvalError>;
}

pub type SharedTransport = Arc<dyn Transport>;
