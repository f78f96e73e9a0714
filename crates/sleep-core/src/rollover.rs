//! Daily and weekly rollovers.
//!
//! Each rollover is a single store operation. Run them through
//! [`CheckinService`](crate::CheckinService) so they never interleave with a
//! check-in's read and write.

use sleep_common::{Result, UserRecord};
use sleep_config::Config;
use tracing::info;

use crate::store::SleepStore;

/// Weekly rollover trigger: Monday 00:00:00 local.
pub const WEEKLY_ROLLOVER_CRON: &str = "0 0 0 * * Mon";

/// Daily reset trigger: `nightStartHour:00:00` local every day.
pub fn daily_reset_cron(config: &Config) -> String {
    format!("0 0 {} * * *", config.night_start_hour)
}

/// Moves the running week into `last_week` and starts an empty week.
pub fn roll_week(record: &mut UserRecord) {
    record.last_week = std::mem::take(&mut record.weekly);
}

/// Clears every group row. Returns how many groups were reset.
///
/// # Errors
///
/// Propagates store errors.
pub async fn run_daily_reset(store: &dyn SleepStore) -> Result<usize> {
    let cleared = store.clear_groups().await?;
    info!(groups = cleared, "daily group statistics reset");
    Ok(cleared)
}

/// Rolls every user's week over in one atomic step. Returns how many users rolled.
///
/// # Errors
///
/// Propagates store errors; on error no user has been rolled.
pub async fn run_weekly_rollover(store: &dyn SleepStore) -> Result<usize> {
    let rolled = store.roll_weeks().await?;
    info!(users = rolled, "weekly statistics rolled over");
    Ok(rolled)
}
