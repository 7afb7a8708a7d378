use env_logger::Env;

/// Initialises `env_logger`; `RUST_LOG` wins over the configured level.
pub fn init_logging(level: &str) {
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}
