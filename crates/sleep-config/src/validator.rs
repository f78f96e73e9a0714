//! Runtime validation of loaded configuration.

use crate::schema::Config;
use sleep_common::{parse_timezone, CheckinKind, SleepError};

/// A single failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Option the rule applies to, using its configuration name.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting every failed rule at once.
    pub fn validate(config: &Config) -> Result<(), SleepError> {
        let issues = Self::issues(config);
        if issues.is_empty() {
            return Ok(());
        }

        let joined = issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(SleepError::Config(joined))
    }

    /// Collects every failed rule.
    pub fn issues(config: &Config) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if parse_timezone(&config.timezone).is_err() {
            issues.push(ValidationIssue {
                field: "timezone",
                message: format!("unknown IANA timezone '{}'", config.timezone),
            });
        }

        let hours = [
            ("morningStartHour", config.morning_start_hour),
            ("morningEndHour", config.morning_end_hour),
            ("nightStartHour", config.night_start_hour),
            ("nightEndHour", config.night_end_hour),
        ];
        for (field, hour) in hours {
            if hour > 23 {
                issues.push(ValidationIssue {
                    field,
                    message: format!("hour {hour} is outside 0..=23"),
                });
            }
        }

        // Night-ordered minutes are undefined between these two hours.
        if config.morning_start_hour < config.night_end_hour {
            issues.push(ValidationIssue {
                field: "nightEndHour",
                message: format!(
                    "night window ends at {} but the morning window starts at {}",
                    config.night_end_hour, config.morning_start_hour
                ),
            });
        }

        for kind in [CheckinKind::Morning, CheckinKind::Night] {
            let keywords = config.keywords(kind);
            if keywords.is_empty() || keywords.iter().any(String::is_empty) {
                issues.push(ValidationIssue {
                    field: match kind {
                        CheckinKind::Morning => "MORNING_MESSAGES",
                        CheckinKind::Night => "NIGHT_MESSAGES",
                    },
                    message: "keywords must be non-empty".to_string(),
                });
            }
        }

        let intervals = [
            ("multiGetUpInterval", config.multi_get_up_enable, config.multi_get_up_interval),
            ("superGetUpInterval", config.super_get_up_enable, config.super_get_up_interval),
            ("goodSleepInterval", config.good_sleep_enable, config.good_sleep_interval),
            ("deepSleepInterval", config.deep_sleep_enable, config.deep_sleep_interval),
        ];
        for (field, enabled, interval) in intervals {
            if enabled && interval == 0 {
                issues.push(ValidationIssue {
                    field,
                    message: "enabled tiers need an interval of at least one hour".to_string(),
                });
            }
        }

        issues
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SleepError> {
        ConfigValidator::validate(self)
    }
}
