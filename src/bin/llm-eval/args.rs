use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "llm-eval",
    about = "Send one prompt to several LLM providers, score the replies and keep them as experiments"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,
    /// Path to a TOML configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,
    /// Log level when RUST_LOG is unset (overrides the config file)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API (default)
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Dispatch one prompt and print the stored experiment as JSON
    Run {
        /// Prompt text
        #[arg(long, short = 'p')]
        prompt: String,
        /// Model identifier, repeatable
        #[arg(long = "model", short = 'm', required = true)]
        models: Vec<String>,
        /// Optional system prompt
        #[arg(long)]
        system: Option<String>,
    },
    /// List registered model identifiers
    Models,
    /// List stored experiments as JSON
    Experiments,
}
