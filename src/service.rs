//! Dispatch-then-persist flow shared by the HTTP API and the CLI.

use crate::{
    dispatch::{DispatchRequest, Dispatcher},
    error::EvalError,
    registry::ProviderBinding,
    store::{Experiment, NewExperiment, SharedStore},
};

/// Immutable service built once at startup and shared by reference.
#[derive(Clone)]
pub struct ExperimentService {
    dispatcher: Dispatcher,
    store: SharedStore,
}

impl ExperimentService {
    pub fn new(dispatcher: Dispatcher, store: SharedStore) -> Self {
        Self { dispatcher, store }
    }

    /// Queries every requested model, then stores the assembled experiment.
    ///
    /// Per-model failures are embedded in the result; only invalid input and storage
    /// failures are returned as errors.
    pub async fn run(&self, request: DispatchRequest) -> Result<Experiment, EvalError> {
        request.validate()?;
        let responses = self.dispatcher.dispatch(&request).await;
        let experiment = self
            .store
            .create(NewExperiment::new(request.prompt, request.models, responses))
            .await?;
        log::info!("Created experiment with ID: {}", experiment.id);
        Ok(experiment)
    }

    pub async fn experiments(&self) -> Result<Vec<Experiment>, EvalError> {
        let experiments = self.store.list().await?;
        log::info!("Retrieved {} experiments", experiments.len());
        Ok(experiments)
    }

    /// Registered models, sorted by identifier.
    pub fn models(&self) -> Vec<&ProviderBinding> {
        self.dispatcher.registry().bindings()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::{
        registry::ModelRegistry,
        store::{ExperimentStore, MemoryExperimentStore},
    };

    struct FailingStore;

    #[async_trait]
    impl ExperimentStore for FailingStore {
        async fn create(&self, _experiment: NewExperiment) -> Result<Experiment, EvalError> {
            Err(EvalError::StorageError("disk full".to_string()))
        }

        async fn list(&self) -> Result<Vec<Experiment>, EvalError> {
            Ok(Vec::new())
        }
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(ModelRegistry::default_table()))
    }

    #[tokio::test]
    async fn run_persists_unresolved_entries() {
        let service = ExperimentService::new(dispatcher(), Arc::new(MemoryExperimentStore::new()));
        let experiment = service
            .run(DispatchRequest::new("hi", vec!["unknown-model".to_string()]))
            .await
            .unwrap();
        assert_eq!(experiment.id, 1);
        assert_eq!(experiment.responses.len(), 1);
        assert!(!experiment.responses[0].is_success());

        let all = service.experiments().await.unwrap();
        assert_eq!(all, vec![experiment]);
    }

    #[tokio::test]
    async fn empty_prompt_is_rejected_before_dispatch() {
        let service = ExperimentService::new(dispatcher(), Arc::new(MemoryExperimentStore::new()));
        let err = service
            .run(DispatchRequest::new("", vec!["gpt-2".to_string()]))
            .await
            .unwrap_err();
        assert!(matches!(err, EvalError::InvalidRequest(_)));
        assert!(service.experiments().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn storage_failure_is_request_level() {
        let service = ExperimentService::new(dispatcher(), Arc::new(FailingStore));
        let err = service
            .run(DispatchRequest::new("hi", Vec::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, EvalError::StorageError(_)));
    }

    #[test]
    fn models_come_from_the_registry() {
        let service = ExperimentService::new(dispatcher(), Arc::new(MemoryExperimentStore::new()));
        let ids: Vec<&str> = service.models().iter().map(|b| b.identifier.as_str()).collect();
        assert_eq!(ids, vec!["gpt-2", "mixtral-8x7b"]);
    }
}
