use std::io;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config IO error: {0}")]
    Io(#[from] io::Error),
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("missing API key for {provider}: set {env} or providers.{kind}.api_key")]
    MissingCredential {
        provider: String,
        kind: String,
        env: String,
    },
    #[error("invalid model table: {0}")]
    InvalidModel(String),
    #[error("invalid provider endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("dispatch.timeout_seconds must be greater than zero")]
    ZeroTimeout,
}
