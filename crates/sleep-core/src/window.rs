//! Time window classification.
//!
//! A window is given as a pair of whole hours in a timezone. When the end hour
//! is not after the start hour the window crosses midnight, and the concrete
//! instance that applies to a moment depends on which side of midnight the
//! moment is on.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// One concrete instance of a configured window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Inclusive start.
    pub start: DateTime<Tz>,
    /// Inclusive end.
    pub end: DateTime<Tz>,
}

impl Window {
    /// Whether `instant` lies in `[start, end]`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.with_timezone(&Utc) <= instant && instant <= self.end.with_timezone(&Utc)
    }
}

/// Resolves `hour:00:00` on `date` in `tz`.
///
/// Ambiguous local times take the earlier instant; local times skipped by a
/// DST gap move forward to the first existing half hour.
pub(crate) fn local_at(tz: Tz, date: NaiveDate, hour: u32) -> Option<DateTime<Tz>> {
    let naive = date.and_hms_opt(hour, 0, 0)?;
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(instant) => Some(instant),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => (1..=4)
            .find_map(|step| tz.from_local_datetime(&(naive + Duration::minutes(30 * step))).earliest()),
    }
}

/// Builds the window instance that applies to `now`.
///
/// Returns `None` when an hour is not a valid wall-clock hour.
pub fn window_bounds(tz: Tz, now: DateTime<Utc>, start_hour: u32, end_hour: u32) -> Option<Window> {
    let local = now.with_timezone(&tz);
    let date = local.date_naive();

    let mut start = local_at(tz, date, start_hour)?;
    let mut end = local_at(tz, date, end_hour)?;

    // The end instant itself still belongs to the window that started yesterday.
    if end_hour <= start_hour {
        if local.hour() < end_hour || local == end {
            start = local_at(tz, date.pred_opt()?, start_hour)?;
        } else {
            end = local_at(tz, date.succ_opt()?, end_hour)?;
        }
    }

    Some(Window { start, end })
}

/// Whether `now` falls inside the `[start_hour, end_hour]` window in `tz`.
pub fn is_in_window(tz: Tz, now: DateTime<Utc>, start_hour: u32, end_hour: u32) -> bool {
    window_bounds(tz, now, start_hour, end_hour).is_some_and(|window| window.contains(now))
}
