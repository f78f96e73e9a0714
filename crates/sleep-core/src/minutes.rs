//! Night-ordered minute scale.
//!
//! Late-evening times and after-midnight times belong to the same night, so
//! comparing them by minute of day gets the order wrong. Times before the
//! morning window opens are shifted a full day forward.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use sleep_common::{Result, SleepError};
use sleep_config::Config;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Maps a local wall-clock time onto the night-ordered scale.
///
/// Returns the adjusted minute count and whether the time is in the early
/// morning (before `morningStartHour`).
///
/// # Errors
///
/// [`SleepError::TimeOutOfRange`] when the hour lies between `morningStartHour`
/// and `nightEndHour`, or is not a wall-clock hour at all.
pub fn adjusted_minutes(config: &Config, hour: u32, minute: u32) -> Result<(u32, bool)> {
    let total = hour * 60 + minute;

    if hour < config.morning_start_hour {
        return Ok((total + MINUTES_PER_DAY, true));
    }
    if config.night_end_hour <= hour && hour <= 23 {
        return Ok((total, false));
    }

    Err(SleepError::TimeOutOfRange { hour, minute })
}

/// Night-ordered minutes of `instant` as seen in `tz`.
pub fn night_order_minutes(config: &Config, instant: DateTime<Utc>, tz: Tz) -> Result<u32> {
    let local = instant.with_timezone(&tz);
    adjusted_minutes(config, local.hour(), local.minute()).map(|(minutes, _)| minutes)
}
