use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// Shape of the remote API a model is served through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ProviderKind {
    /// `messages`-based chat endpoint (OpenAI compatible)
    ChatCompletion,
    /// Single `inputs` string, list-shaped `generated_text` reply
    TextCompletion,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::ChatCompletion => "chat_completion",
            ProviderKind::TextCompletion => "text_completion",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "chat_completion" | "chat" => Ok(ProviderKind::ChatCompletion),
            "text_completion" | "text" => Ok(ProviderKind::TextCompletion),
            _ => Err(EvalError::InvalidRequest(format!(
                "Unknown provider kind: {s}"
            ))),
        }
    }
}

impl TryFrom<String> for ProviderKind {
    type Error = EvalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Resolved target for a logical model identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderBinding {
    /// Identifier callers use, e.g. `mixtral-8x7b`.
    pub identifier: String,
    pub provider_kind: ProviderKind,
    /// Name the provider itself expects, e.g. `mixtral-8x7b-32768`.
    pub provider_model_name: String,
}

impl ProviderBinding {
    pub fn new(
        identifier: impl Into<String>,
        provider_kind: ProviderKind,
        provider_model_name: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            provider_kind,
            provider_model_name: provider_model_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_config_spellings() {
        assert_eq!(
            "chat_completion".parse::<ProviderKind>().unwrap(),
            ProviderKind::ChatCompletion
        );
        assert_eq!(
            "Text-Completion".parse::<ProviderKind>().unwrap(),
            ProviderKind::TextCompletion
        );
        assert!("embedding".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn kind_deserializes_through_the_same_spellings() {
        let kinds: Vec<ProviderKind> =
            serde_json::from_str(r#"["chat", "Text-Completion", "chat_completion"]"#).unwrap();
        assert_eq!(
            kinds,
            vec![
                ProviderKind::ChatCompletion,
                ProviderKind::TextCompletion,
                ProviderKind::ChatCompletion
            ]
        );
        assert!(serde_json::from_str::<ProviderKind>(r#""embedding""#).is_err());
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&ProviderKind::TextCompletion).unwrap();
        assert_eq!(json, "\"text_completion\"");
    }
}
