use std::sync::Arc;

use async_trait::async_trait;

use crate::error::EvalError;

use super::types::{Experiment, NewExperiment};

/// Generic create/list persistence for experiments.
#[async_trait]
pub trait ExperimentStore: Send + Sync {
    /// Persists the whole record atomically and returns it with id and timestamps set.
    async fn create(&self, experiment: NewExperiment) -> Result<Experiment, EvalError>;

    /// All experiments in creation order.
    async fn list(&self) -> Result<Vec<Experiment>, EvalError>;
}

pub type SharedStore = Arc<dyn ExperimentStore>;
