use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod domain;
mod application;
mod infrastructure;
mod cogs;

use application::errors::error_chain;
use application::services::ExtensionManager;
use cogs::CogCatalog;
use infrastructure::adapters::discord::{Data, DiscordAdapter};
use infrastructure::cogs::{CogHost, DirectorySource};
use infrastructure::config::{Config, DEFAULT_CONFIG_PATH};

/// Environment variable holding the bot token
const TOKEN_ENV: &str = "DISCORD_TOKEN";

/// Default cog manifest directory
const DEFAULT_COG_DIR: &str = "cogs";

#[derive(Parser)]
#[command(name = "eikumi")]
#[command(about = "A minimal Discord bot with runtime-loadable cogs", long_about = None)]
struct Cli {
    /// Defaults to `run` when omitted
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Directory of cog manifests
    #[arg(long, default_value = DEFAULT_COG_DIR)]
    cogs: PathBuf,

    /// Bot token (overrides DISCORD_TOKEN)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate a sample config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            run_bot(&cli.config, &cli.cogs, cli.token);
        }
        Commands::Version => {
            println!("eikumi v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config(&cli.config);
        }
    }
}

fn run_bot(config_path: &Path, cog_dir: &Path, token_override: Option<String>) {
    // Configuration problems are operator errors: stop before touching the network
    let config = match Config::load(config_path) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            tracing::error!("{}", error_chain(&e));
            std::process::exit(1);
        }
    };
    tracing::info!("Loaded configuration for {} guilds", config.guilds.len());

    let token = match token_override
        .or_else(|| std::env::var(TOKEN_ENV).ok())
        .filter(|t| !t.trim().is_empty())
    {
        Some(token) => token,
        None => {
            tracing::error!("{} environment variable is not set. Exiting.", TOKEN_ENV);
            std::process::exit(1);
        }
    };

    let catalog = CogCatalog::builtin();
    tracing::info!("{} cogs compiled in", catalog.len());
    let host = CogHost::new(cog_dir, catalog, config.clone());
    tracing::info!("Serving cogs from {}", host.directory().display());
    let manager = ExtensionManager::new(host, Box::new(DirectorySource::new(cog_dir)));

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };

    let bot = DiscordAdapter::new(token, Data::new(manager, config));
    if let Err(e) = rt.block_on(bot.run()) {
        tracing::error!("Bot stopped: {}", e);
        std::process::exit(1);
    }
}

fn init_config(path: &Path) {
    match Config::write_sample(path) {
        Ok(path) => println!("Wrote sample config to {}", path.display()),
        Err(e) => {
            tracing::error!("{}", error_chain(&e));
            std::process::exit(1);
        }
    }
}
