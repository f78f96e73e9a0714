//! Repeat check-in tiers.
//!
//! A repeat check-in earns a tier when enough time has passed since the
//! previous check-in of the same kind. The ladder holds (threshold, tier)
//! pairs ordered from the largest threshold down; the first threshold the
//! elapsed time reaches wins.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use sleep_common::CheckinKind;
use sleep_config::Config;

/// Named response tiers for repeat check-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Repeat morning after `multiGetUpInterval` hours.
    MultiGetUp,
    /// Repeat morning after `superGetUpInterval` hours.
    SuperGetUp,
    /// Repeat night after `goodSleepInterval` hours.
    GoodSleep,
    /// Repeat night after `deepSleepInterval` hours.
    DeepSleep,
}

impl Tier {
    /// Check-in kind this tier belongs to.
    pub const fn kind(self) -> CheckinKind {
        match self {
            Self::MultiGetUp | Self::SuperGetUp => CheckinKind::Morning,
            Self::GoodSleep | Self::DeepSleep => CheckinKind::Night,
        }
    }

    /// Tiers of `kind` in configuration order.
    pub const fn for_kind(kind: CheckinKind) -> [Self; 2] {
        match kind {
            CheckinKind::Morning => [Self::MultiGetUp, Self::SuperGetUp],
            CheckinKind::Night => [Self::GoodSleep, Self::DeepSleep],
        }
    }

    /// Whether the tier is switched on, and its interval in hours.
    pub const fn settings(self, config: &Config) -> (bool, u32) {
        match self {
            Self::MultiGetUp => (config.multi_get_up_enable, config.multi_get_up_interval),
            Self::SuperGetUp => (config.super_get_up_enable, config.super_get_up_interval),
            Self::GoodSleep => (config.good_sleep_enable, config.good_sleep_interval),
            Self::DeepSleep => (config.deep_sleep_enable, config.deep_sleep_interval),
        }
    }
}

/// One rung of the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierStep {
    /// Minimum elapsed time.
    pub threshold: Duration,
    /// Tier granted once the threshold is reached.
    pub tier: Tier,
}

/// Ordered thresholds for one check-in kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierLadder {
    steps: Vec<TierStep>,
}

impl TierLadder {
    /// Builds a ladder; equal thresholds keep their input order.
    pub fn new(steps: impl IntoIterator<Item = TierStep>) -> Self {
        let mut steps: Vec<_> = steps.into_iter().collect();
        steps.sort_by(|a, b| b.threshold.cmp(&a.threshold));
        Self { steps }
    }

    /// Ladder of the enabled tiers of `kind`.
    pub fn for_kind(config: &Config, kind: CheckinKind) -> Self {
        Self::new(Tier::for_kind(kind).into_iter().filter_map(|tier| {
            let (enabled, hours) = tier.settings(config);
            enabled.then(|| TierStep {
                threshold: Duration::hours(i64::from(hours)),
                tier,
            })
        }))
    }

    /// The deepest tier whose threshold `elapsed` reaches.
    pub fn select(&self, elapsed: Duration) -> Option<Tier> {
        self.steps
            .iter()
            .find(|step| elapsed >= step.threshold)
            .map(|step| step.tier)
    }

    /// Smallest threshold on the ladder.
    pub fn min_threshold(&self) -> Option<Duration> {
        self.steps.last().map(|step| step.threshold)
    }

    /// Whether no tier is enabled.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps from the largest threshold down.
    pub fn steps(&self) -> &[TierStep] {
        &self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn morning_config(multi: bool, superb: bool) -> Config {
        Config {
            multi_get_up_enable: multi,
            multi_get_up_interval: 6,
            super_get_up_enable: superb,
            super_get_up_interval: 1,
            ..Config::default()
        }
    }

    #[test]
    fn test_ladder_orders_largest_first() {
        let ladder = TierLadder::for_kind(&morning_config(true, true), CheckinKind::Morning);
        let tiers: Vec<_> = ladder.steps().iter().map(|step| step.tier).collect();
        assert_eq!(tiers, vec![Tier::MultiGetUp, Tier::SuperGetUp]);
        assert_eq!(ladder.min_threshold(), Some(Duration::hours(1)));
    }

    #[test]
    fn test_select_prefers_deeper_tier() {
        let ladder = TierLadder::for_kind(&morning_config(true, true), CheckinKind::Morning);
        assert_eq!(ladder.select(Duration::hours(7)), Some(Tier::MultiGetUp));
        assert_eq!(ladder.select(Duration::hours(6)), Some(Tier::MultiGetUp));
        assert_eq!(ladder.select(Duration::hours(2)), Some(Tier::SuperGetUp));
        assert_eq!(ladder.select(Duration::minutes(59)), None);
    }

    #[test]
    fn test_disabled_tiers_are_skipped() {
        let ladder = TierLadder::for_kind(&morning_config(false, true), CheckinKind::Morning);
        assert_eq!(ladder.select(Duration::hours(8)), Some(Tier::SuperGetUp));

        let empty = TierLadder::for_kind(&morning_config(false, false), CheckinKind::Morning);
        assert!(empty.is_empty());
        assert_eq!(empty.select(Duration::hours(24)), None);
    }

    #[test]
    fn test_default_night_ladder() {
        let ladder = TierLadder::for_kind(&Config::default(), CheckinKind::Night);
        assert_eq!(ladder.steps().len(), 1);
        assert_eq!(ladder.select(Duration::hours(6)), Some(Tier::GoodSleep));
    }

    #[test]
    fn test_equal_thresholds_keep_configuration_order() {
        let ladder = TierLadder::new([
            TierStep { threshold: Duration::hours(3), tier: Tier::GoodSleep },
            TierStep { threshold: Duration::hours(3), tier: Tier::DeepSleep },
        ]);
        assert_eq!(ladder.select(Duration::hours(3)), Some(Tier::GoodSleep));
    }
}
