use serde::{Deserialize, Serialize};

/// Body of `POST /api/experiments`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExperimentRequest {
    pub prompt: String,
    pub models: Vec<String>,
    #[serde(default, alias = "systemPrompt")]
    pub system_prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusBody {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_system_prompt_spellings() {
        let snake: CreateExperimentRequest = serde_json::from_str(
            r#"{"prompt":"p","models":["gpt-2"],"system_prompt":"s"}"#,
        )
        .unwrap();
        let camel: CreateExperimentRequest =
            serde_json::from_str(r#"{"prompt":"p","models":[],"systemPrompt":"s"}"#).unwrap();
        assert_eq!(snake.system_prompt.as_deref(), Some("s"));
        assert_eq!(camel.system_prompt.as_deref(), Some("s"));
    }

    #[test]
    fn system_prompt_is_optional() {
        let req: CreateExperimentRequest =
            serde_json::from_str(r#"{"prompt":"p","models":["a","a"]}"#).unwrap();
        assert!(req.system_prompt.is_none());
        assert_eq!(req.models, vec!["a", "a"]);
    }
}
