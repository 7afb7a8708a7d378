use thiserror::Error;

/// Error types that can occur while dispatching prompts and storing experiments.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The requested model identifier has no provider binding
    #[error("Model {0} not found or not available")]
    UnresolvedModel(String),
    /// The binding's provider kind has no transport wired in
    #[error("No transport configured for {0} models")]
    NoTransport(String),
    /// The provider call exceeded its time budget
    #[error("request timed out")]
    Timeout,
    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Non-success status returned by the provider
    #[error("{provider} API Error: {message}")]
    ProviderError { provider: String, message: String },
    /// API response parsing or format error
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
    /// Authentication errors
    #[error("Auth error: {0}")]
    AuthError(String),
    /// Invalid request parameters or format
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// Experiment persistence failed
    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Converts reqwest HTTP errors, keeping timeouts distinguishable.
impl From<reqwest::Error> for EvalError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EvalError::Timeout
        } else {
            EvalError::HttpError(err.to_string())
        }
    }
}

impl From<std::io::Error> for EvalError {
    fn from(err: std::io::Error) -> Self {
        EvalError::StorageError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_is_stable() {
        assert_eq!(EvalError::Timeout.to_string(), "request timed out");
    }

    #[test]
    fn unresolved_model_names_the_identifier() {
        let err = EvalError::UnresolvedModel("unknown-model".to_string());
        assert_eq!(
            err.to_string(),
            "Model unknown-model not found or not available"
        );
    }

    #[test]
    fn provider_error_carries_provider_name() {
        let err = EvalError::ProviderError {
            provider: "Groq".to_string(),
            message: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "Groq API Error: rate limited");
    }

    #[test]
    fn io_errors_become_storage_errors() {
        let err: EvalError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert_eq!(err.to_string(), "Storage error: disk full");
    }
}
