use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::EvalError;

use super::traits::ExperimentStore;
use super::types::{Experiment, NewExperiment};

/// Process-local store; contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryExperimentStore {
    experiments: RwLock<Vec<Experiment>>,
}

impl MemoryExperimentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExperimentStore for MemoryExperimentStore {
    async fn create(&self, experiment: NewExperiment) -> Result<Experiment, EvalError> {
        let mut experiments = self.experiments.write().await;
        let id = experiments.last().map_or(1, |last| last.id + 1);
        let stored = Experiment::from_new(id, experiment, Utc::now());
        experiments.push(stored.clone());
        log::debug!("Stored experiment {id} in memory");
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Experiment>, EvalError> {
        Ok(self.experiments.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{Metrics, ResultEntry};

    #[tokio::test]
    async fn ids_increase_and_order_is_kept() {
        let store = MemoryExperimentStore::new();
        let first = store
            .create(NewExperiment::new("one", vec!["gpt-2".into()], Vec::new()))
            .await
            .unwrap();
        let second = store
            .create(NewExperiment::new(
                "two",
                vec!["mixtral-8x7b".into(), "gpt-2".into()],
                vec![
                    ResultEntry::success("mixtral-8x7b", "ok.".into(), Metrics::zero()),
                    ResultEntry::failure("gpt-2", "request timed out"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!((first.id, second.id), (1, 2));
        assert!(second.updated_at.is_none());

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![first, second]);
    }
}
