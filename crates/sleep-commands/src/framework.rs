//! Command framework setup and command registration logic.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sleep_config::{Config, ConfigCache};
use sleep_core::CheckinService;
use tracing::warn;

use crate::session::Session;

/// Application data accessible in all commands.
pub struct Data {
    /// Live configuration.
    pub config: Arc<ConfigCache>,
    /// Check-in and statistics service.
    pub service: Arc<CheckinService>,
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command invocation context.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    /// Shared application data.
    pub data: &'a Data,
    /// The triggering session, if any.
    pub session: Option<&'a Session>,
    /// Moment of the invocation.
    pub now: DateTime<Utc>,
}

impl Context<'_> {
    /// Configuration snapshot for this invocation.
    pub fn config(&self) -> Arc<Config> {
        self.data.config.get()
    }
}

/// Future returned by a command action: the reply to send, if any.
pub type CommandFuture<'a> = Pin<Box<dyn Future<Output = Result<Option<String>, Error>> + Send + 'a>>;

/// A registered command.
pub struct Command {
    /// Invocation name.
    pub name: &'static str,
    /// Short description.
    pub description: &'static str,
    /// Handler.
    pub action: for<'a> fn(Context<'a>) -> CommandFuture<'a>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Registered commands plus the data they run against.
pub struct Framework {
    data: Data,
    commands: Vec<Command>,
}

impl Framework {
    /// Shared application data.
    pub const fn data(&self) -> &Data {
        &self.data
    }

    /// Every registered command.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Looks up a command by name.
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|command| command.name == name)
    }

    /// Runs the command called `name`.
    ///
    /// Unknown commands are logged and produce no reply.
    ///
    /// # Errors
    ///
    /// Propagates the command's error.
    pub async fn execute(
        &self,
        name: &str,
        session: Option<&Session>,
        now: DateTime<Utc>,
    ) -> Result<Option<String>, Error> {
        let Some(command) = self.command(name) else {
            warn!(command = name, "unknown command");
            return Ok(None);
        };

        let ctx = Context {
            data: &self.data,
            session,
            now,
        };
        (command.action)(ctx).await
    }
}

/// Creates the framework with every command registered.
pub fn create_framework(data: Data) -> Framework {
    Framework {
        data,
        commands: vec![
            crate::morning::morning(),
            crate::night::night(),
            crate::statistics::statistics(),
        ],
    }
}
