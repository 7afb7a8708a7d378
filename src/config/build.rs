use std::sync::Arc;
use std::time::Duration;

use crate::{
    dispatch::Dispatcher,
    registry::{ModelRegistry, ProviderBinding, ProviderKind},
    service::ExperimentService,
    store::{JsonExperimentStore, MemoryExperimentStore, SharedStore},
    transport::{ChatCompletionTransport, SharedTransport, TextCompletionTransport},
};

use super::error::ConfigError;
use super::types::{AppConfig, ProviderConfig};

struct KindDefaults {
    name: &'static str,
    base_url: &'static str,
    api_key_env: &'static str,
}

fn defaults_for(kind: ProviderKind) -> KindDefaults {
    match kind {
        ProviderKind::ChatCompletion => KindDefaults {
            name: "Groq",
            base_url: "https://api.groq.com/openai/v1/",
            api_key_env: "GROQ_API_KEY",
        },
        ProviderKind::TextCompletion => KindDefaults {
            name: "HuggingFace",
            base_url: "https://api-inference.huggingface.co/models/",
            api_key_env: "HUGGING_FACE_API_KEY",
        },
    }
}

impl AppConfig {
    /// Registry from the `[models]` table, or the built-in table when it is empty.
    pub fn registry(&self) -> Result<ModelRegistry, ConfigError> {
        if self.models.is_empty() {
            return Ok(ModelRegistry::default_table());
        }
        let mut builder = ModelRegistry::builder();
        for (id, model) in &self.models {
            builder = builder
                .try_register(ProviderBinding::new(id.clone(), model.kind, model.model.clone()))
                .map_err(|e| ConfigError::InvalidModel(e.to_string()))?;
        }
        Ok(builder.build())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch.timeout_seconds)
    }

    /// Builds the service, reading credentials from the process environment.
    pub fn build_service(&self) -> Result<ExperimentService, ConfigError> {
        self.build_service_with(|name| std::env::var(name).ok())
    }

    /// Builds the service with a custom credential lookup.
    pub fn build_service_with<F>(&self, env: F) -> Result<ExperimentService, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.dispatch.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        let registry = self.registry()?;
        let mut dispatcher = Dispatcher::new(Arc::new(registry.clone())).timeout(self.timeout());
        for kind in registry.kinds() {
            dispatcher = dispatcher.transport(self.build_transport(kind, &env)?);
        }
        Ok(ExperimentService::new(dispatcher, self.build_store()))
    }

    pub fn build_store(&self) -> SharedStore {
        match &self.storage.path {
            Some(path) => {
                log::info!("Persisting experiments to {}", path.display());
                Arc::new(JsonExperimentStore::new(path.clone()))
            }
            None => {
                log::info!("Keeping experiments in memory");
                Arc::new(MemoryExperimentStore::new())
            }
        }
    }

    fn build_transport<F>(&self, kind: ProviderKind, env: &F) -> Result<SharedTransport, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cfg = self.providers.get(kind);
        let defaults = defaults_for(kind);
        let name = cfg.name.clone().unwrap_or_else(|| defaults.name.to_string());
        let base_url = cfg.base_url.as_deref().unwrap_or(defaults.base_url);
        let api_key = resolve_api_key(kind, cfg, &name, defaults.api_key_env, env)?;

        let transport: SharedTransport = match kind {
            ProviderKind::ChatCompletion => Arc::new(
                ChatCompletionTransport::new(name, base_url, api_key, cfg.temperature)
                    .map_err(|e| ConfigError::InvalidEndpoint(e.to_string()))?,
            ),
            ProviderKind::TextCompletion => Arc::new(
                TextCompletionTransport::new(
                    name,
                    base_url,
                    api_key,
                    cfg.temperature,
                    cfg.max_new_tokens,
                )
                .map_err(|e| ConfigError::InvalidEndpoint(e.to_string()))?,
            ),
        };
        Ok(transport)
    }
}

fn resolve_api_key<F>(
    kind: ProviderKind,
    cfg: &ProviderConfig,
    name: &str,
    default_env: &str,
    env: &F,
) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = cfg.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
        return Ok(key.clone());
    }
    let env_name = cfg.api_key_env.as_deref().unwrap_or(default_env);
    env(env_name)
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingCredential {
            provider: name.to_string(),
            kind: kind.to_string(),
            env: env_name.to_string(),
        })
}
