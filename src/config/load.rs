use std::fs;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::types::AppConfig;

const LOCAL_CONFIG_FILE: &str = "llm-eval.toml";

/// Loads the configuration.
///
/// An explicit path must exist. Without one, `./llm-eval.toml` and then
/// `<config dir>/llm-eval/config.toml` are tried; if neither exists the defaults apply.
pub fn load_config(path_override: Option<PathBuf>) -> Result<AppConfig, ConfigError> {
    if let Some(path) = path_override {
        return read_config(&path);
    }

    let candidates = [Some(PathBuf::from(LOCAL_CONFIG_FILE)), default_config_path()];
    for path in candidates.into_iter().flatten() {
        match fs::read_to_string(&path) {
            Ok(contents) => {
                log::info!("Loading configuration from {}", path.display());
                return parse_config(&contents);
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
            Err(err) => return Err(ConfigError::Io(err)),
        }
    }

    log::info!("No configuration file found, using defaults");
    Ok(AppConfig::default())
}

pub fn parse_config(contents: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(contents)?)
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("llm-eval").join("config.toml"))
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    log::info!("Loading configuration from {}", path.display());
    parse_config(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ProviderKind;

    #[test]
    fn empty_document_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.server.addr(), "0.0.0.0:8000");
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.dispatch.timeout_seconds, 30);
        assert!(config.models.is_empty());
        assert!(config.storage.path.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn sections_override_defaults() {
        let config = parse_config(
            r#"
            [server]
            port = 9000

            [dispatch]
            timeout_seconds = 5

            [providers.chat_completion]
            base_url = "http://localhost:1234/v1"
            api_key_env = "MY_KEY"

            [models.llama]
            kind = "chat_completion"
            model = "llama-3.1-8b-instant"

            [storage]
            path = "data/experiments.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.addr(), "0.0.0.0:9000");
        assert_eq!(config.dispatch.timeout_seconds, 5);
        assert_eq!(
            config.providers.chat_completion.api_key_env.as_deref(),
            Some("MY_KEY")
        );
        assert!(config.providers.text_completion.base_url.is_none());
        let llama = &config.models["llama"];
        assert_eq!(llama.kind, ProviderKind::ChatCompletion);
        assert_eq!(llama.model, "llama-3.1-8b-instant");
        assert_eq!(
            config.storage.path,
            Some(PathBuf::from("data/experiments.json"))
        );
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        let err = parse_config(
            r#"
            [models.x]
            kind = "embedding"
            model = "x"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn short_kind_spellings_are_accepted() {
        let config = parse_config(
            r#"
            [models.x]
            kind = "chat"
            model = "x-1"

            [models.y]
            kind = "text-completion"
            model = "y-1"
            "#,
        )
        .unwrap();
        assert_eq!(config.models["x"].kind, ProviderKind::ChatCompletion);
        assert_eq!(config.models["y"].kind, ProviderKind::TextCompletion);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\nhost = \"127.0.0.1\"\n").unwrap();
        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.server.addr(), "127.0.0.1:8000");
    }
}
