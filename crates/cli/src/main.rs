//! clawbridge CLI — the main entry point.
//!
//! Commands:
//! - `assemble`    — Flatten a chat request JSON into a single prompt
//! - `big-context` — Print the big-context replacement prompt
//! - `config`      — Show, locate, or validate the configuration

use clap::{Parser, Subcommand};
use clawbridge_config::{AppConfig, ConfigError};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "clawbridge",
    about = "clawbridge — chat request to prompt flattening",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten a chat request (JSON file or stdin) into a prompt
    Assemble {
        /// Request file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Override the history cap from the config
        #[arg(long)]
        max_messages: Option<usize>,

        /// Prepend the no-artifacts instruction line
        #[arg(long)]
        disable_artifacts: bool,

        /// Also list extracted image URLs
        #[arg(long)]
        images: bool,
    },

    /// Print the replacement prompt used in big-context mode
    BigContext,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Validate the configuration and report problems
    Validate,
}

/// Pick the tracing filter: `--verbose` wins, then the configured level,
/// then `"info"` when the config cannot be loaded. A load failure is
/// surfaced so `main` can report it once the subscriber is up.
fn resolve_filter(
    verbose: bool,
    load: Result<AppConfig, ConfigError>,
) -> (String, Option<ConfigError>) {
    if verbose {
        return ("debug".to_string(), load.err());
    }
    match load {
        Ok(config) => (config.log_level, None),
        Err(e) => ("info".to_string(), Some(e)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing; --verbose wins over the configured level.
    let (filter, load_error) = resolve_filter(cli.verbose, AppConfig::load());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = load_error {
        tracing::warn!("failed to load configuration, using default log level: {e}");
    }

    match cli.command {
        Commands::Assemble {
            file,
            max_messages,
            disable_artifacts,
            images,
        } => commands::assemble::run(file, max_messages, disable_artifacts, images)?,
        Commands::BigContext => commands::big_context::run()?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show()?,
            ConfigAction::Path => commands::config_cmd::path()?,
            ConfigAction::Validate => commands::config_cmd::validate()?,
        },
    }

    Ok(())
}
