//! Statistics aggregation.
//!
//! The write side applies accepted check-ins to a user record and a group row.
//! The read side sums the daily group rows and classifies users into sleeping
//! and getting-up for the statistics report.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use sleep_common::{local_minutes_of_day, CheckinKind, GroupStats, Result, UserRecord};
use sleep_config::Config;
use tracing::debug;

use crate::evaluator::{Acceptance, Standing};
use crate::minutes::night_order_minutes;
use crate::window::local_at;

/// Result of applying an accepted check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedCheckin {
    /// The group's count of this kind after the update; for a first check-in
    /// this is the user's position in today's order.
    pub position: u32,
    /// Sleep accrued by this check-in.
    pub sleep_minutes: Option<u32>,
    /// Time awake reported by this check-in.
    pub awake_minutes: Option<u32>,
}

/// Applies `acceptance` to `user` and `group` at `now`.
///
/// Nothing is mutated when an error is returned.
///
/// # Errors
///
/// Propagates [`sleep_common::SleepError::TimeOutOfRange`] when a first night
/// check-in cannot be placed on the night-ordered minute scale.
pub fn apply_checkin(
    config: &Config,
    tz: Tz,
    acceptance: &Acceptance,
    user: &mut UserRecord,
    group: &mut GroupStats,
    now: DateTime<Utc>,
) -> Result<AppliedCheckin> {
    let kind = acceptance.kind;
    let first = acceptance.standing == Standing::First;

    let extreme = if first { Some(weekly_extreme(config, tz, kind, user, now)?) } else { None };

    if let Some(minutes) = acceptance.sleep_minutes {
        user.weekly.sleep_time = user.weekly.sleep_time.saturating_add(minutes);
        user.total_sleep_time = user.total_sleep_time.saturating_add(minutes);
    }

    match kind {
        CheckinKind::Morning => {
            user.morning_time = Some(now);
            user.total_morning_count = user.total_morning_count.saturating_add(1);
        }
        CheckinKind::Night => {
            user.night_time = Some(now);
            user.total_night_count = user.total_night_count.saturating_add(1);
        }
    }

    let position = if first {
        match kind {
            CheckinKind::Morning => {
                user.weekly.morning_count = user.weekly.morning_count.saturating_add(1);
                if extreme == Some(true) {
                    user.weekly.earliest_morning_time = Some(now);
                }
            }
            CheckinKind::Night => {
                user.weekly.night_count = user.weekly.night_count.saturating_add(1);
                if extreme == Some(true) {
                    user.weekly.latest_night_time = Some(now);
                }
            }
        }
        group.increment(kind)
    } else {
        group.count(kind)
    };

    debug!(
        user = %user.user_id,
        group = %group.group_id,
        %kind,
        first,
        position,
        "applied check-in"
    );

    Ok(AppliedCheckin {
        position,
        sleep_minutes: acceptance.sleep_minutes,
        awake_minutes: acceptance.awake_minutes,
    })
}

/// Whether `now` beats the user's weekly extreme for `kind`.
fn weekly_extreme(
    config: &Config,
    tz: Tz,
    kind: CheckinKind,
    user: &UserRecord,
    now: DateTime<Utc>,
) -> Result<bool> {
    match kind {
        CheckinKind::Morning => Ok(user
            .weekly
            .earliest_morning_time
            .map_or(true, |earliest| local_minutes_of_day(now, tz) < local_minutes_of_day(earliest, tz))),
        CheckinKind::Night => {
            let candidate = night_order_minutes(config, now, tz)?;
            match user.weekly.latest_night_time {
                None => Ok(true),
                Some(latest) => Ok(candidate > night_order_minutes(config, latest, tz)?),
            }
        }
    }
}

/// Start of the statistics day containing `now`: the most recent
/// `nightStartHour:00` local instant at or before `now`.
pub fn statistics_day_start(config: &Config, tz: Tz, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let date = now.with_timezone(&tz).date_naive();
    let today = local_at(tz, date, config.night_start_hour)?.with_timezone(&Utc);
    if today <= now {
        return Some(today);
    }
    local_at(tz, date.pred_opt()?, config.night_start_hour).map(|start| start.with_timezone(&Utc))
}

/// Totals across every group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllStats {
    /// Morning check-ins today across all groups.
    pub morning_count: u32,
    /// Night check-ins today across all groups.
    pub night_count: u32,
    /// Users active today whose latest check-in is a night.
    pub sleeping_count: u32,
    /// Users active today whose latest check-in is a morning.
    pub getting_up_count: u32,
}

/// Counts for one group alongside its share of the totals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupSummary {
    /// Morning check-ins in the group today.
    pub group_morning_count: u32,
    /// Night check-ins in the group today.
    pub group_night_count: u32,
    /// Group morning count over the global morning count.
    pub morning_percent: f64,
    /// Group night count over the global night count.
    pub night_percent: f64,
}

/// Aggregates all group rows and users active since `day_start`.
pub fn all_stats(groups: &[GroupStats], users: &[UserRecord], day_start: DateTime<Utc>) -> AllStats {
    let mut stats = groups.iter().fold(AllStats::default(), |mut acc, group| {
        acc.morning_count = acc.morning_count.saturating_add(group.morning_count);
        acc.night_count = acc.night_count.saturating_add(group.night_count);
        acc
    });

    for (kind, _) in users
        .iter()
        .filter_map(UserRecord::latest_event)
        .filter(|(_, at)| *at >= day_start)
    {
        match kind {
            CheckinKind::Night => stats.sleeping_count += 1,
            CheckinKind::Morning => stats.getting_up_count += 1,
        }
    }

    stats
}

/// Summarises `group` against `all`. A missing group counts as empty.
pub fn group_stats(group: Option<&GroupStats>, all: &AllStats) -> GroupSummary {
    let (morning, night) = group.map_or((0, 0), |g| (g.morning_count, g.night_count));
    GroupSummary {
        group_morning_count: morning,
        group_night_count: night,
        morning_percent: ratio(morning, all.morning_count),
        night_percent: ratio(night, all.night_count),
    }
}

fn ratio(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole)
    }
}
