//! Bot host: rollover scheduling and the line-oriented event loop.
//!
//! Inbound events are JSON objects, one per line. A line carrying an
//! `assignee` registers which bot identity serves a group channel; any other
//! line is a chat message. Each reply is written back as one JSON line.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sleep_commands::{create_framework, handle_message, Data, Framework, Session};
use sleep_common::{ChannelBinding, GroupId, UserId};
use sleep_config::ConfigCache;
use sleep_core::rollover::{daily_reset_cron, WEEKLY_ROLLOVER_CRON};
use sleep_core::{CheckinService, PromptPicker, SleepStore};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

use crate::error::{BotError, BotResult};
use crate::scheduler::{JobId, SchedulerService};

/// One inbound line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Inbound {
    /// Channel registration.
    Assign(ChannelBinding),
    /// Chat message.
    Message(Session),
}

/// One outbound line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outbound {
    /// Group to reply in; absent for private replies.
    pub guild_id: Option<GroupId>,
    /// User the reply answers.
    pub user_id: Option<UserId>,
    /// Reply text.
    pub reply: String,
}

/// Main bot structure.
pub struct SleepBot {
    config: Arc<ConfigCache>,
    framework: Framework,
    scheduler: SchedulerService,
}

impl SleepBot {
    /// Creates a bot over `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the scheduler cannot be created.
    pub async fn new(config: Arc<ConfigCache>, store: Arc<dyn SleepStore>) -> BotResult<Self> {
        let prompts = PromptPicker::new(config.get().prompt_seed);
        let service = Arc::new(CheckinService::new(store, prompts));
        let framework = create_framework(Data {
            config: Arc::clone(&config),
            service,
        });
        let scheduler = SchedulerService::new().await?;

        Ok(Self {
            config,
            framework,
            scheduler,
        })
    }

    /// Command framework.
    pub const fn framework(&self) -> &Framework {
        &self.framework
    }

    /// Scheduler holding the rollover jobs.
    pub const fn scheduler(&self) -> &SchedulerService {
        &self.scheduler
    }

    /// Registers the daily reset and weekly rollover jobs and starts the scheduler.
    ///
    /// # Errors
    ///
    /// Returns an error when the timezone is invalid or a job cannot be scheduled.
    pub async fn start(&self) -> BotResult<Vec<JobId>> {
        let config = self.config.get();
        let tz = config.tz()?;

        let service = Arc::clone(&self.framework.data().service);
        let daily = self
            .scheduler
            .add_job(
                "daily_reset",
                &daily_reset_cron(&config),
                tz,
                Some("Clears every group's daily counters".to_string()),
                move || {
                    let service = Arc::clone(&service);
                    async move {
                        if let Err(e) = service.daily_reset().await {
                            error!("Daily reset failed: {e}");
                        }
                    }
                },
            )
            .await?;

        let service = Arc::clone(&self.framework.data().service);
        let weekly = self
            .scheduler
            .add_job(
                "weekly_rollover",
                WEEKLY_ROLLOVER_CRON,
                tz,
                Some("Archives the week into last week's statistics".to_string()),
                move || {
                    let service = Arc::clone(&service);
                    async move {
                        if let Err(e) = service.weekly_rollover().await {
                            error!("Weekly rollover failed: {e}");
                        }
                    }
                },
            )
            .await?;

        self.scheduler.start().await?;
        info!(timezone = %tz, "Rollover jobs scheduled");
        Ok(vec![daily, weekly])
    }

    /// Stops the scheduler.
    ///
    /// # Errors
    ///
    /// Returns an error if the scheduler fails to shut down.
    pub async fn stop(&self) -> BotResult<()> {
        self.scheduler.stop().await?;
        Ok(())
    }

    /// Handles one inbound line at `now`.
    ///
    /// Blank lines and messages that need no answer yield `None`.
    ///
    /// # Errors
    ///
    /// Returns an error when the line is not a valid event, the store fails,
    /// or a command fails.
    pub async fn handle_line(&self, line: &str, now: DateTime<Utc>) -> BotResult<Option<Outbound>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<Inbound>(line)? {
            Inbound::Assign(binding) => {
                self.framework.data().service.store().assign_channel(&binding).await?;
                info!(
                    platform = %binding.platform,
                    group = %binding.guild_id,
                    assignee = %binding.assignee,
                    "Channel assigned"
                );
                Ok(None)
            }
            Inbound::Message(session) => {
                let reply = handle_message(&self.framework, &session, now)
                    .await
                    .map_err(|e| BotError::Command(e.to_string()))?;
                Ok(reply.map(|reply| Outbound {
                    guild_id: session.guild_id,
                    user_id: session.user_id,
                    reply,
                }))
            }
        }
    }

    /// Reads events from `input` until it ends, writing replies to `output`.
    ///
    /// A bad line is logged and skipped; only I/O failures end the loop early.
    ///
    /// # Errors
    ///
    /// Returns an error when reading or writing fails.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> BotResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            match self.handle_line(&line, Utc::now()).await {
                Ok(Some(outbound)) => {
                    let mut encoded = serde_json::to_vec(&outbound)?;
                    encoded.push(b'\n');
                    output.write_all(&encoded).await?;
                    output.flush().await?;
                }
                Ok(None) => debug!("No reply"),
                Err(e) => warn!("Skipping event: {e}"),
            }
        }

        info!("Input closed");
        Ok(())
    }
}
