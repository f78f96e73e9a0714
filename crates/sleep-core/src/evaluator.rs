//! Check-in evaluation.
//!
//! [`evaluate`] is a pure decision over the configuration, the user's current
//! record and the current moment. It never mutates anything; accepted
//! verdicts are applied by [`crate::aggregator::apply_checkin`].

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use sleep_common::{CheckinKind, UserRecord};
use sleep_config::{Config, WindowHours};
use tracing::debug;

use crate::tier::{Tier, TierLadder};
use crate::window::window_bounds;

/// Longest span that still counts as a single sleep (or waking) cycle.
pub const MAX_CYCLE_MINUTES: i64 = 24 * 60;

/// Whether an accepted check-in is the first of its window or a repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    /// First check-in of this kind in the current window.
    First,
    /// Repeat check-in that earned a tier.
    Repeat(Tier),
}

/// Details of an accepted check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acceptance {
    /// Kind of check-in.
    pub kind: CheckinKind,
    /// First or repeat.
    pub standing: Standing,
    /// Minutes slept since an unconsumed night check-in (morning only).
    pub sleep_minutes: Option<u32>,
    /// Minutes awake since the last morning check-in (night only).
    pub awake_minutes: Option<u32>,
}

/// Outcome of evaluating a check-in attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The feature is switched off; nothing happens and nothing is said.
    Inert,
    /// The moment is outside the configured window.
    OutsideWindow(WindowHours),
    /// A previous check-in is too recent for any enabled tier.
    TooSoon {
        /// Smallest enabled tier interval.
        min_interval: Duration,
        /// Time since the previous check-in.
        elapsed: Duration,
    },
    /// Already checked in during this window and no repeat tier is enabled.
    AlreadyCheckedIn,
    /// The check-in is accepted.
    Accepted(Acceptance),
}

impl Verdict {
    /// Whether the verdict leads to a state change.
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Decides what a check-in attempt of `kind` at `now` results in.
pub fn evaluate(
    config: &Config,
    tz: Tz,
    kind: CheckinKind,
    record: Option<&UserRecord>,
    now: DateTime<Utc>,
) -> Verdict {
    if !config.is_enabled(kind) {
        return Verdict::Inert;
    }

    let hours = config.window(kind);
    let Some(window) = window_bounds(tz, now, hours.start, hours.end).filter(|w| w.contains(now)) else {
        debug!(%kind, %now, "check-in outside window {}..{}", hours.start, hours.end);
        return Verdict::OutsideWindow(hours);
    };

    let previous = record
        .and_then(|record| record.last_checkin(kind))
        .filter(|previous| *previous >= window.start.with_timezone(&Utc));

    let standing = match previous {
        None => Standing::First,
        Some(previous) => {
            let elapsed = now - previous;
            let ladder = TierLadder::for_kind(config, kind);
            match (ladder.select(elapsed), ladder.min_threshold()) {
                (Some(tier), _) => Standing::Repeat(tier),
                (None, Some(min_interval)) => {
                    debug!(%kind, elapsed_minutes = elapsed.num_minutes(), "repeat check-in too soon");
                    return Verdict::TooSoon { min_interval, elapsed };
                }
                (None, None) => return Verdict::AlreadyCheckedIn,
            }
        }
    };

    let (sleep_minutes, awake_minutes) = match kind {
        CheckinKind::Morning => (record.and_then(|r| unconsumed_span(r.night_time, r.morning_time, now)), None),
        CheckinKind::Night => (None, record.and_then(|r| unconsumed_span(r.morning_time, r.night_time, now))),
    };

    Verdict::Accepted(Acceptance {
        kind,
        standing,
        sleep_minutes,
        awake_minutes,
    })
}

/// Minutes from `since` to `now` when `since` has not yet been followed by
/// `closed_by` and the span fits in one cycle.
fn unconsumed_span(
    since: Option<DateTime<Utc>>,
    closed_by: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<u32> {
    let since = since?;
    if closed_by.is_some_and(|closed| closed >= since) {
        return None;
    }

    let minutes = (now - since).num_minutes();
    if (0..=MAX_CYCLE_MINUTES).contains(&minutes) {
        u32::try_from(minutes).ok()
    } else {
        None
    }
}
