//! Configuration schema definitions using serde.
//!
//! Field names serialize to the option names the plugin has always used
//! (`morningStartHour`, `MORNING_MESSAGES`, ...), so existing configuration
//! files keep working.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use sleep_common::logging::LoggingConfig;
use sleep_common::{parse_timezone, CheckinKind, Result};
use std::path::PathBuf;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// IANA timezone used for windows, reports and schedules.
    pub timezone: String,

    /// Whether morning check-ins are handled at all.
    pub morning_enable: bool,
    /// First hour of the morning window.
    pub morning_start_hour: u32,
    /// Last hour of the morning window.
    pub morning_end_hour: u32,
    /// Whether repeat morning check-ins after a long gap are accepted.
    pub multi_get_up_enable: bool,
    /// Hours that must pass before a multi get-up.
    pub multi_get_up_interval: u32,
    /// Whether repeat morning check-ins after a short gap are accepted.
    pub super_get_up_enable: bool,
    /// Hours that must pass before a super get-up.
    pub super_get_up_interval: u32,

    /// Whether night check-ins are handled at all.
    pub night_enable: bool,
    /// First hour of the night window. Also the daily reset hour.
    pub night_start_hour: u32,
    /// Last hour of the night window.
    pub night_end_hour: u32,
    /// Whether repeat night check-ins after a long gap are accepted.
    pub good_sleep_enable: bool,
    /// Hours that must pass before a good sleep.
    pub good_sleep_interval: u32,
    /// Whether repeat night check-ins after a shorter gap are accepted.
    pub deep_sleep_enable: bool,
    /// Hours that must pass before a deep sleep.
    pub deep_sleep_interval: u32,

    /// Keywords that trigger a morning check-in.
    #[serde(rename = "MORNING_MESSAGES")]
    pub morning_messages: Vec<String>,
    /// Keywords that trigger a night check-in.
    #[serde(rename = "NIGHT_MESSAGES")]
    pub night_messages: Vec<String>,
    /// Prompt pool appended to morning replies.
    pub morning_prompts: Vec<String>,
    /// Prompt pool appended to night replies.
    pub night_prompts: Vec<String>,
    /// Seed for prompt selection. Unseeded when absent.
    pub prompt_seed: Option<u64>,

    /// Persistence settings.
    pub storage: StorageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Which persistence backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Embedded sled database on disk.
    Sled,
    /// Process memory; lost on exit.
    Memory,
}

/// Persistence configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend selection.
    pub backend: StorageBackend,
    /// Database directory for the sled backend.
    pub path: PathBuf,
}

/// Window hours for one check-in kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHours {
    /// First hour, inclusive.
    pub start: u32,
    /// Last hour, inclusive at `:00:00`.
    pub end: u32,
}

impl WindowHours {
    /// Whether the window wraps past midnight.
    pub const fn crosses_midnight(self) -> bool {
        self.end <= self.start
    }
}

impl Config {
    /// Parsed timezone.
    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }

    /// Whether the feature for `kind` is switched on.
    pub const fn is_enabled(&self, kind: CheckinKind) -> bool {
        match kind {
            CheckinKind::Morning => self.morning_enable,
            CheckinKind::Night => self.night_enable,
        }
    }

    /// Window hours configured for `kind`.
    pub const fn window(&self, kind: CheckinKind) -> WindowHours {
        match kind {
            CheckinKind::Morning => WindowHours {
                start: self.morning_start_hour,
                end: self.morning_end_hour,
            },
            CheckinKind::Night => WindowHours {
                start: self.night_start_hour,
                end: self.night_end_hour,
            },
        }
    }

    /// Keywords that trigger `kind`.
    pub fn keywords(&self, kind: CheckinKind) -> &[String] {
        match kind {
            CheckinKind::Morning => &self.morning_messages,
            CheckinKind::Night => &self.night_messages,
        }
    }

    /// Prompt pool for `kind`.
    pub fn prompts(&self, kind: CheckinKind) -> &[String] {
        match kind {
            CheckinKind::Morning => &self.morning_prompts,
            CheckinKind::Night => &self.night_prompts,
        }
    }
}
