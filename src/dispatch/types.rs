use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{error::EvalError, scoring::Score};

/// One prompt to send to a list of models.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchRequest {
    pub prompt: String,
    /// Empty means "no system prompt".
    pub system_prompt: String,
    /// Requested identifiers, duplicates allowed.
    pub models: Vec<String>,
}

impl DispatchRequest {
    pub fn new(prompt: impl Into<String>, models: Vec<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: String::new(),
            models,
        }
    }

    pub fn system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn validate(&self) -> Result<(), EvalError> {
        if self.prompt.is_empty() {
            return Err(EvalError::InvalidRequest(
                "prompt must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-entry measurements. Failures carry all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub accuracy: u8,
    pub relevancy: u8,
    /// Wall-clock milliseconds, two decimals.
    #[serde(rename = "responseTime")]
    pub response_time_ms: f64,
}

impl Metrics {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn scored(score: Score, elapsed: Duration) -> Self {
        Self {
            accuracy: score.accuracy,
            relevancy: score.relevancy,
            response_time_ms: round_ms(elapsed),
        }
    }
}

fn round_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100_000.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success { response: String, metrics: Metrics },
    Failure { error: String },
}

/// Result for one requested model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ResultEntryRecord", into = "ResultEntryRecord")]
pub struct ResultEntry {
    pub model: String,
    pub outcome: Outcome,
}

impl ResultEntry {
    pub fn success(model: impl Into<String>, response: String, metrics: Metrics) -> Self {
        Self {
            model: model.into(),
            outcome: Outcome::Success { response, metrics },
        }
    }

    pub fn failure(model: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            outcome: Outcome::Failure {
                error: error.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    pub fn metrics(&self) -> Metrics {
        match &self.outcome {
            Outcome::Success { metrics, .. } => *metrics,
            Outcome::Failure { .. } => Metrics::zero(),
        }
    }

    pub fn response(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success { response, .. } => Some(response),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success { .. } => None,
            Outcome::Failure { error } => Some(error),
        }
    }
}

/// Highest combined score among successful entries; the earliest wins ties.
pub fn best_entry(entries: &[ResultEntry]) -> Option<&ResultEntry> {
    entries
        .iter()
        .filter(|entry| entry.is_success())
        .fold(None, |best: Option<&ResultEntry>, entry| {
            let total = |e: &ResultEntry| {
                let m = e.metrics();
                u16::from(m.accuracy) + u16::from(m.relevancy)
            };
            match best {
                Some(current) if total(current) >= total(entry) => Some(current),
                _ => Some(entry),
            }
        })
}

/// Persisted layout: `{model, response | error, metrics}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResultEntryRecord {
    model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(default)]
    metrics: Metrics,
}

impl From<ResultEntry> for ResultEntryRecord {
    fn from(entry: ResultEntry) -> Self {
        match entry.outcome {
            Outcome::Success { response, metrics } => Self {
                model: entry.model,
                response: Some(response),
                error: None,
                metrics,
            },
            Outcome::Failure { error } => Self {
                model: entry.model,
                response: None,
                error: Some(error),
                metrics: Metrics::zero(),
            },
        }
    }
}

impl TryFrom<ResultEntryRecord> for ResultEntry {
    type Error = String;

    fn try_from(record: ResultEntryRecord) -> Result<Self, Self::Error> {
        match (record.error, record.response) {
            (Some(error), _) => Ok(ResultEntry::failure(record.model, error)),
            (None, Some(response)) => Ok(ResultEntry::success(
                record.model,
                response,
                record.metrics,
            )),
            (None, None) => Err(format!(
                "result for {} has neither response nor error",
                record.model
            )),
        }
    }
}
