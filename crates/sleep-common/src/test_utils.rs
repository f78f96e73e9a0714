//! Test utilities and shared test helpers.
//!
//! Fixtures for timestamps in the default timezone, identifiers and record
//! builders used by unit and integration tests across the workspace.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::sync::Once;

use crate::{GroupId, UserId};

static INIT: Once = Once::new();

/// Timezone used by the default configuration.
pub const SHANGHAI: Tz = chrono_tz::Asia::Shanghai;

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Test fixture for a UTC timestamp.
pub fn mock_timestamp(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// Test fixture for a wall-clock time in Asia/Shanghai, returned as UTC.
pub fn shanghai(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    SHANGHAI
        .with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
        .with_timezone(&Utc)
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Identifier fixtures.
pub mod id_fixtures {
    use super::*;

    /// A test user ID.
    pub fn test_user_id() -> UserId {
        UserId::from("10001")
    }

    /// A test group ID.
    pub fn test_group_id() -> GroupId {
        GroupId::from("20001")
    }

    /// Multiple distinct test user IDs.
    pub fn test_user_ids(count: usize) -> Vec<UserId> {
        (0..count).map(|i| UserId(format!("{}", 10_000 + i))).collect()
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// A minimal YAML configuration overriding only a few options.
    pub fn minimal_config_yaml() -> &'static str {
        r"
timezone: Asia/Shanghai
morningStartHour: 6
morningEndHour: 14
"
    }

    /// A full YAML configuration covering every option.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "timezone: \"Asia/Shanghai\"\n",
            "morningEnable: true\n",
            "morningStartHour: 5\n",
            "morningEndHour: 12\n",
            "multiGetUpEnable: true\n",
            "multiGetUpInterval: 6\n",
            "superGetUpEnable: true\n",
            "superGetUpInterval: 1\n",
            "nightEnable: true\n",
            "nightStartHour: 22\n",
            "nightEndHour: 4\n",
            "goodSleepEnable: true\n",
            "goodSleepInterval: 6\n",
            "deepSleepEnable: true\n",
            "deepSleepInterval: 3\n",
            "MORNING_MESSAGES: [\"早安\", \"good morning\"]\n",
            "NIGHT_MESSAGES: [\"晚安\", \"good night\"]\n",
            "morningPrompts: [\"加油\"]\n",
            "nightPrompts: [\"好梦\"]\n",
            "storage:\n",
            "  path: \"data/sleep\"\n",
            "logging:\n",
            "  level: \"debug\"\n",
        )
    }
}

/// Property-based testing strategies.
#[cfg(any(test, feature = "proptest"))]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for a valid configured hour.
    pub fn hour_strategy() -> impl Strategy<Value = u32> {
        0u32..24
    }

    /// Strategy for a minute or second component.
    pub fn minute_strategy() -> impl Strategy<Value = u32> {
        0u32..60
    }

    /// Strategy for a day in January 2024.
    pub fn day_strategy() -> impl Strategy<Value = u32> {
        1u32..=31
    }
}
