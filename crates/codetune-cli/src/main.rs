//! Codetune CLI - ask a local model to optimize source code.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Codetune - code optimization with a local language model
#[derive(Parser)]
#[command(name = "codetune")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    endpoint: EndpointArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the configuration read from the environment.
#[derive(Args, Debug, Default)]
pub(crate) struct EndpointArgs {
    /// Ollama server URL
    #[arg(long, global = true)]
    url: Option<String>,
    /// Model identifier
    #[arg(long, global = true)]
    model: Option<String>,
    /// Language named in the prompt
    #[arg(long, global = true)]
    language: Option<String>,
    /// Wait budget in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize a source file (stdin when no file is given)
    Optimize {
        /// Input file
        file: Option<PathBuf>,
        /// Output the full result as JSON
        #[arg(long)]
        json: bool,
        /// Print only the code from the model's fenced answer
        #[arg(long, conflicts_with = "json")]
        extract: bool,
    },

    /// Optimize a built-in JavaScript sample
    Demo,

    /// Check that the inference server is up and the model is pulled
    Check,

    /// Show the effective configuration
    Info,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let config = cli.endpoint.apply(codetune_ai::OptimizerConfig::from_env());

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| miette::miette!("Failed to start async runtime: {}", e))?;

    match cli.command {
        Commands::Optimize {
            file,
            json,
            extract,
        } => runtime.block_on(commands::optimize::run(
            config,
            file.as_deref(),
            commands::optimize::OutputMode::from_flags(json, extract),
        )),
        Commands::Demo => runtime.block_on(commands::demo::run(config)),
        Commands::Check => runtime.block_on(commands::check::run(config)),
        Commands::Info => commands::info::run(&config),
    }
}

impl EndpointArgs {
    /// Layer command-line flags over a base configuration.
    pub(crate) fn apply(
        self,
        mut config: codetune_ai::OptimizerConfig,
    ) -> codetune_ai::OptimizerConfig {
        if let Some(url) = self.url {
            config.base_url = url;
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(language) = self.language {
            config.language = language;
        }
        if let Some(secs) = self.timeout.filter(|s| *s > 0) {
            config.timeout = std::time::Duration::from_secs(secs);
        }
        config
    }
}
