//! Main entry point for the sleep check-in bot.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use sleep_bot::{BotError, BotResult, SleepBot, SledStore};
use sleep_common::logging::init_logging;
use sleep_config::{Config, ConfigCache, ConfigLoader, StorageBackend, CONFIG_PATH_ENV};
use sleep_core::{MemoryStore, SleepStore};
use tokio::io::BufReader;
use tracing::{error, info};

/// Morning/night greeting check-in bot.
///
/// Reads chat events as JSON lines on stdin and writes replies as JSON lines
/// on stdout.
#[derive(Debug, Parser)]
#[command(name = "sleep-bot", version, about)]
struct Cli {
    /// Configuration file (YAML or TOML).
    #[arg(short, long, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Database directory; overrides `storage.path`.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log filter; overrides `logging.level`.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> BotResult<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let _guard = init_logging(&config.logging).map_err(|e| BotError::Logging(e.to_string()))?;

    info!("Starting sleep check-in bot");

    let store = open_store(&config)?;
    let bot = SleepBot::new(Arc::new(ConfigCache::new(config)), store).await?;
    bot.start().await?;

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    let result = tokio::select! {
        result = bot.run(stdin, stdout) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            Ok(())
        }
    };

    if let Err(e) = &result {
        error!("Event loop failed: {e}");
    }
    bot.stop().await?;
    result
}

fn load_config(cli: &Cli) -> BotResult<Config> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_config(path)?,
        None => ConfigLoader::load()?,
    };

    if let Some(dir) = &cli.data_dir {
        config.storage.path.clone_from(dir);
    }
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }

    Ok(config)
}

fn open_store(config: &Config) -> BotResult<Arc<dyn SleepStore>> {
    let store: Arc<dyn SleepStore> = match config.storage.backend {
        StorageBackend::Sled => Arc::new(SledStore::open(&config.storage.path)?),
        StorageBackend::Memory => {
            info!("Using in-memory storage; records are lost on exit");
            Arc::new(MemoryStore::new())
        }
    };
    Ok(store)
}
