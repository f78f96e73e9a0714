//! Statistics report rendering.

use std::fmt;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use sleep_common::{format_percent, format_report_date, pad_start};

use crate::aggregator::{AllStats, GroupSummary};

const COUNT_WIDTH: usize = 6;

/// Daily statistics for one group, rendered by its [`fmt::Display`] impl.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsReport {
    /// Report date, already formatted in the configured timezone.
    pub date: String,
    /// Totals across every group.
    pub all: AllStats,
    /// The requesting group.
    pub group: GroupSummary,
}

impl StatisticsReport {
    /// Builds a report dated `now` in `tz`.
    pub fn new(now: DateTime<Utc>, tz: Tz, all: AllStats, group: GroupSummary) -> Self {
        Self {
            date: format_report_date(now, tz),
            all,
            group,
        }
    }
}

impl fmt::Display for StatisticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = |value: u32| pad_start(value, COUNT_WIDTH);

        writeln!(f, "✨ 今日睡眠统计 ({}) ✨", self.date)?;
        writeln!(f, "╔═══════════")?;
        writeln!(f, "║ 全服统计:")?;
        writeln!(f, "║  早安次数: {}", count(self.all.morning_count))?;
        writeln!(f, "║  晚安次数: {}", count(self.all.night_count))?;
        writeln!(f, "║  正在睡觉: {}", count(self.all.sleeping_count))?;
        writeln!(f, "║  已经起床: {}", count(self.all.getting_up_count))?;
        writeln!(f, "╠═══════════")?;
        writeln!(f, "║ 本群统计:")?;
        writeln!(f, "║  早安次数: {}", count(self.group.group_morning_count))?;
        writeln!(f, "║  晚安次数: {}", count(self.group.group_night_count))?;
        writeln!(f, "║  早安占比: {}%", format_percent(self.group.morning_percent))?;
        writeln!(f, "║  晚安占比: {}%", format_percent(self.group.night_percent))?;
        write!(f, "╚═══════════")
    }
}
