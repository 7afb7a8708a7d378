use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;

use crate::{
    error::EvalError,
    registry::{ModelRegistry, ProviderKind},
    scoring::score_response,
    transport::{SharedTransport, TransportRequest},
};

use super::types::{DispatchRequest, Metrics, ResultEntry};

/// Per-call budget when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends one prompt to every requested model concurrently and scores the replies.
///
/// Every requested model yields exactly one [`ResultEntry`], in request order. A failing
/// or slow model never affects its siblings.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ModelRegistry>,
    transports: HashMap<ProviderKind, SharedTransport>,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self {
            registry,
            transports: HashMap::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Wires a transport in for the provider kind it reports.
    pub fn transport(mut self, transport: SharedTransport) -> Self {
        let kind = transport.kind();
        if self.transports.insert(kind, transport).is_some() {
            log::warn!("Replacing transport for {kind} models");
        }
        self
    }

    /// Sets the per-call timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn timeout_duration(&self) -> Duration {
        self.timeout
    }

    /// Dispatches the request and waits for every model to finish or time out.
    pub async fn dispatch(&self, request: &DispatchRequest) -> Vec<ResultEntry> {
        if request.models.is_empty() {
            return Vec::new();
        }
        log::info!("Dispatching prompt to {} model(s)", request.models.len());

        let units = request
            .models
            .iter()
            .map(|model| self.run_unit(request, model));

        join_all(units).await
    }

    async fn run_unit(&self, request: &DispatchRequest, model: &str) -> ResultEntry {
        let binding = match self.registry.resolve(model) {
            Ok(binding) => binding,
            Err(err) => return failure(model, err),
        };
        let Some(transport) = self.transports.get(&binding.provider_kind) else {
            return failure(model, EvalError::NoTransport(binding.provider_kind.to_string()));
        };

        let call = TransportRequest::new(
            &request.prompt,
            &request.system_prompt,
            &binding.provider_model_name,
            self.timeout,
        );

        let start = Instant::now();
        let result = match tokio::time::timeout(self.timeout, transport.call(&call)).await {
            Ok(result) => result,
            Err(_) => Err(EvalError::Timeout),
        };
        let elapsed = start.elapsed();

        match result {
            Ok(text) => {
                log::debug!("{model} answered in {} ms", elapsed.as_millis());
                let metrics = Metrics::scored(score_response(&text), elapsed);
                ResultEntry::success(model, text, metrics)
            }
            Err(err) => failure(model, err),
        }
    }
}

fn failure(model: &str, err: EvalError) -> ResultEntry {
    log::warn!("Error from model {model}: {err}");
    ResultEntry::failure(model, err.to_string())
}
