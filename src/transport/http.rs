use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;

use crate::error::EvalError;

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Object { message: String },
    Text(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorField,
}

/// Pulls `error.message` (chat APIs) or `error` (inference APIs) out of a failure body.
pub(super) fn provider_error_message(raw: &str) -> Option<String> {
    let body: ErrorBody = serde_json::from_str(raw).ok()?;
    let message = match body.error {
        ErrorField::Object { message } => message,
        ErrorField::Text(text) => text,
    };
    Some(message)
}

pub(super) fn provider_error(provider: &str, status: StatusCode, raw: &str) -> EvalError {
    let message = provider_error_message(raw)
        .unwrap_or_else(|| format!("Unknown error (HTTP {})", status.as_u16()));
    EvalError::ProviderError {
        provider: provider.to_string(),
        message,
    }
}

/// Reads the whole body, mapping non-2xx statuses to a provider error.
pub(super) async fn read_body(provider: &str, resp: Response) -> Result<String, EvalError> {
    let status = resp.status();
    log::debug!("{provider} HTTP status: {status}");
    let raw = resp.text().await?;
    if !status.is_success() {
        return Err(provider_error(provider, status, &raw));
    }
    Ok(raw)
}

pub(super) fn format_error(message: impl Into<String>, raw: &str) -> EvalError {
    EvalError::ResponseFormatError {
        message: message.into(),
        raw_response: raw.to_string(),
    }
}

/// Ensures the base URL ends with `/` so relative joins append instead of replacing.
pub(super) fn normalize_base_url(base_url: &str) -> Result<Url, EvalError> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Url::parse(&base).map_err(|e| EvalError::InvalidRequest(format!("Invalid base URL {base_url}: {e}")))
}

pub(super) fn join_url(base: &Url, path: &str) -> Result<Url, EvalError> {
    base.join(path)
        .map_err(|e| EvalError::InvalidRequest(format!("Invalid endpoint path {path}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_chat_style_error_message() {
        let raw = r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#;
        assert_eq!(provider_error_message(raw).as_deref(), Some("Invalid API Key"));
    }

    #[test]
    fn extracts_inference_style_error_message() {
        let raw = r#"{"error":"Model gpt2 is currently loading","estimated_time":20.0}"#;
        assert_eq!(
            provider_error_message(raw).as_deref(),
            Some("Model gpt2 is currently loading")
        );
    }

    #[test]
    fn falls_back_to_generic_message() {
        let err = provider_error("Groq", StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(err.to_string(), "Groq API Error: Unknown error (HTTP 502)");
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let base = normalize_base_url("https://api-inference.huggingface.co/models").unwrap();
        let url = join_url(&base, "gpt2").unwrap();
        assert_eq!(url.as_str(), "https://api-inference.huggingface.co/models/gpt2");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            normalize_base_url("not a url"),
            Err(EvalError::InvalidRequest(_))
        ));
    }
}
