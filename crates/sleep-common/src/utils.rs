//! Shared utility functions for time handling and report formatting.

use crate::error::{Result, SleepError};
use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

/// Parses an IANA timezone identifier such as `Asia/Shanghai`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| SleepError::InvalidTimezone(name.to_string()))
}

/// Formats a date for the statistics report header, e.g. `2024年01月01日`.
pub fn format_report_date(now: DateTime<Utc>, tz: Tz) -> String {
    now.with_timezone(&tz).format("%Y年%m月%d日").to_string()
}

/// Right-aligns a value to `width` characters.
pub fn pad_start(value: impl std::fmt::Display, width: usize) -> String {
    format!("{value:>width$}")
}

/// Renders a ratio as a percentage with two decimals, right-aligned to six characters.
pub fn format_percent(ratio: f64) -> String {
    format!("{:>6.2}", ratio * 100.0)
}

/// Splits a minute count into whole hours and remaining minutes.
pub const fn split_minutes(minutes: u32) -> (u32, u32) {
    (minutes / 60, minutes % 60)
}

/// Minutes since local midnight of `instant` in `tz`.
pub fn local_minutes_of_day(instant: DateTime<Utc>, tz: Tz) -> u32 {
    let local = instant.with_timezone(&tz);
    local.hour() * 60 + local.minute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timezone() {
        assert!(parse_timezone("Asia/Shanghai").is_ok());
        assert!(matches!(
            parse_timezone("Mars/Olympus"),
            Err(SleepError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn test_format_report_date() {
        let now = Utc.with_ymd_and_hms(2023, 12, 31, 17, 30, 0).unwrap();
        let tz = parse_timezone("Asia/Shanghai").unwrap();
        assert_eq!(format_report_date(now, tz), "2024年01月01日");
    }

    #[test]
    fn test_padding() {
        assert_eq!(pad_start(1, 6), "     1");
        assert_eq!(pad_start(1_234_567, 6), "1234567");
        assert_eq!(format_percent(0.5), " 50.00");
        assert_eq!(format_percent(1.0), "100.00");
        assert_eq!(format_percent(0.0), "  0.00");
    }

    #[test]
    fn test_split_minutes() {
        assert_eq!(split_minutes(0), (0, 0));
        assert_eq!(split_minutes(485), (8, 5));
    }
}
