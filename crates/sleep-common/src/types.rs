//! Common type definitions and newtype wrappers for domain modeling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A chat platform user ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A chat platform group (guild) ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub String);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GroupId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The two kinds of greeting a user can check in with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckinKind {
    /// Waking up.
    Morning,
    /// Going to sleep.
    Night,
}

impl CheckinKind {
    /// Command name that triggers this kind of check-in.
    pub const fn command_name(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Night => "night",
        }
    }
}

impl fmt::Display for CheckinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command_name())
    }
}

/// Per-group daily counters (`sleep_group`).
///
/// Rows are created by the first check-in in a group and dropped all at once
/// by the daily reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStats {
    /// Group identifier.
    pub group_id: GroupId,
    /// Morning check-ins in this group today.
    pub morning_count: u32,
    /// Night check-ins in this group today.
    pub night_count: u32,
}

impl GroupStats {
    /// Creates an empty row for a group.
    pub const fn new(group_id: GroupId) -> Self {
        Self {
            group_id,
            morning_count: 0,
            night_count: 0,
        }
    }

    /// Returns the counter for `kind`.
    pub const fn count(&self, kind: CheckinKind) -> u32 {
        match kind {
            CheckinKind::Morning => self.morning_count,
            CheckinKind::Night => self.night_count,
        }
    }

    /// Increments the counter for `kind` and returns the new value.
    pub fn increment(&mut self, kind: CheckinKind) -> u32 {
        let counter = match kind {
            CheckinKind::Morning => &mut self.morning_count,
            CheckinKind::Night => &mut self.night_count,
        };
        *counter = counter.saturating_add(1);
        *counter
    }
}

/// Counters covering one week.
///
/// The same shape is used for the running week and for the archived last week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStats {
    /// First-of-day morning check-ins.
    pub morning_count: u32,
    /// First-of-day night check-ins.
    pub night_count: u32,
    /// Accrued sleep in minutes.
    pub sleep_time: u32,
    /// Morning check-in with the earliest local time of day.
    pub earliest_morning_time: Option<DateTime<Utc>>,
    /// Night check-in with the latest night-ordered time.
    pub latest_night_time: Option<DateTime<Utc>>,
}

/// Per-user sleep record (`sleep_user`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// User identifier.
    pub user_id: UserId,
    /// Last accepted morning check-in.
    pub morning_time: Option<DateTime<Utc>>,
    /// Last accepted night check-in.
    pub night_time: Option<DateTime<Utc>>,
    /// Current week.
    #[serde(default)]
    pub weekly: PeriodStats,
    /// Previous week, filled by the weekly rollover.
    #[serde(default)]
    pub last_week: PeriodStats,
    /// Lifetime morning check-ins, repeats included.
    pub total_morning_count: u32,
    /// Lifetime night check-ins, repeats included.
    pub total_night_count: u32,
    /// Lifetime sleep in minutes.
    pub total_sleep_time: u32,
}

impl UserRecord {
    /// Creates an empty record for a user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            morning_time: None,
            night_time: None,
            weekly: PeriodStats::default(),
            last_week: PeriodStats::default(),
            total_morning_count: 0,
            total_night_count: 0,
            total_sleep_time: 0,
        }
    }

    /// Timestamp of the last check-in of `kind`.
    pub const fn last_checkin(&self, kind: CheckinKind) -> Option<DateTime<Utc>> {
        match kind {
            CheckinKind::Morning => self.morning_time,
            CheckinKind::Night => self.night_time,
        }
    }

    /// The most recent check-in of either kind.
    pub fn latest_event(&self) -> Option<(CheckinKind, DateTime<Utc>)> {
        match (self.morning_time, self.night_time) {
            (Some(morning), Some(night)) if night > morning => Some((CheckinKind::Night, night)),
            (Some(morning), _) => Some((CheckinKind::Morning, morning)),
            (None, Some(night)) => Some((CheckinKind::Night, night)),
            (None, None) => None,
        }
    }
}

/// Registration of a group channel to the bot identity that serves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelBinding {
    /// Platform name, e.g. `onebot`.
    pub platform: String,
    /// Group the channel belongs to.
    pub guild_id: GroupId,
    /// Bot self ID that answers in this channel.
    pub assignee: String,
}
