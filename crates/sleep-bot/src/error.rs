//! Application-wide error types using thiserror.

use sleep_common::SleepError;
use sleep_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Domain or storage error.
    #[error("{0}")]
    Sleep(#[from] SleepError),

    /// Scheduler setup or job registration failed.
    #[error("Scheduler error: {0:#}")]
    Scheduler(#[from] anyhow::Error),

    /// A command handler failed.
    #[error("Command error: {0}")]
    Command(String),

    /// Logging could not be initialised.
    #[error("Logging error: {0}")]
    Logging(String),

    /// An inbound or outbound event could not be (de)serialized.
    #[error("Event error: {0}")]
    Event(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
