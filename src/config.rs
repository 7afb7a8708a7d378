//! TOML configuration and startup wiring.

#[path = "config/error.rs"]
mod error;

#[path = "config/types.rs"]
mod types;

#[path = "config/load.rs"]
mod load;

#[path = "config/build.rs"]
mod build;

pub use error::ConfigError;
pub use load::{default_config_path, load_config, parse_config};
pub use types::{
    AppConfig, CorsConfig, DispatchConfig, LoggingConfig, ModelConfig, ProviderConfig,
    ProvidersConfig, ServerConfig, StorageConfig,
};
