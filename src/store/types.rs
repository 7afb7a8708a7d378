use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dispatch::ResultEntry;

/// A dispatch ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExperiment {
    pub prompt: String,
    pub models: Vec<String>,
    pub responses: Vec<ResultEntry>,
}

impl NewExperiment {
    pub fn new(prompt: impl Into<String>, models: Vec<String>, responses: Vec<ResultEntry>) -> Self {
        Self {
            prompt: prompt.into(),
            models,
            responses,
        }
    }
}

/// Persisted record of one dispatch and its results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub id: i64,
    pub prompt: String,
    pub models: Vec<String>,
    pub responses: Vec<ResultEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Experiment {
    pub(super) fn from_new(id: i64, new: NewExperiment, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            prompt: new.prompt,
            models: new.models,
            responses: new.responses,
            created_at,
            updated_at: None,
        }
    }
}
