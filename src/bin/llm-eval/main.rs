mod args;
mod logging;

use anyhow::Context;
use clap::Parser;
use llm_eval::{
    api::Server,
    config::{load_config, AppConfig},
    dispatch::{best_entry, DispatchRequest},
    service::ExperimentService,
};

use args::{CliArgs, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let mut config = load_config(args.config.clone()).context("failed to load configuration")?;
    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    logging::init_logging(&level);

    match args.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(&config).await
        }
        Command::Run {
            prompt,
            models,
            system,
        } => {
            let service = build_service(&config)?;
            let request =
                DispatchRequest::new(prompt, models).system_prompt(system.unwrap_or_default());
            run_once(&service, request).await
        }
        Command::Models => {
            let registry = config.registry()?;
            for binding in registry.bindings() {
                println!(
                    "{:<24} {:<16} {}",
                    binding.identifier, binding.provider_kind, binding.provider_model_name
                );
            }
            Ok(())
        }
        Command::Experiments => {
            let experiments = config.build_store().list().await?;
            println!("{}", serde_json::to_string_pretty(&experiments)?);
            Ok(())
        }
    }
}

fn build_service(config: &AppConfig) -> anyhow::Result<ExperimentService> {
    config
        .build_service()
        .context("failed to initialise providers")
}

async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    let service = build_service(config)?;
    let server = Server::new(service).allowed_origins(&config.cors.allowed_origins)?;
    server
        .run(&config.server.addr())
        .await
        .with_context(|| format!("server on {} stopped", config.server.addr()))
}

async fn run_once(service: &ExperimentService, request: DispatchRequest) -> anyhow::Result<()> {
    let experiment = service.run(request).await?;
    println!("{}", serde_json::to_string_pretty(&experiment)?);
    if let Some(best) = best_entry(&experiment.responses) {
        let metrics = best.metrics();
        eprintln!(
            "best: {} (accuracy {}, relevancy {}, {} ms)",
            best.model, metrics.accuracy, metrics.relevancy, metrics.response_time_ms
        );
    }
    Ok(())
}
