//! Check-in orchestration.
//!
//! [`CheckinService`] ties the pieces together: load the records, evaluate,
//! apply, persist, and render the reply. Check-ins and rollovers share one
//! write gate, so a rollover never lands between a check-in's read and write.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sleep_common::{CheckinKind, GroupId, GroupStats, Result, SleepError, UserId, UserRecord};
use sleep_config::Config;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::aggregator::{all_stats, apply_checkin, group_stats, statistics_day_start};
use crate::evaluator::{evaluate, Verdict};
use crate::prompts::PromptPicker;
use crate::replies;
use crate::report::StatisticsReport;
use crate::rollover::{run_daily_reset, run_weekly_rollover};
use crate::store::SleepStore;

/// What a check-in attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckinOutcome {
    /// The evaluator's decision.
    pub verdict: Verdict,
    /// Text to send back, if any.
    pub reply: Option<String>,
}

/// Handles check-ins and statistics against a [`SleepStore`].
pub struct CheckinService {
    store: Arc<dyn SleepStore>,
    prompts: PromptPicker,
    writes: Mutex<()>,
}

impl std::fmt::Debug for CheckinService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckinService")
            .field("prompts", &self.prompts)
            .finish_non_exhaustive()
    }
}

impl CheckinService {
    /// Creates a service over `store` with a prompt picker.
    pub fn new(store: Arc<dyn SleepStore>, prompts: PromptPicker) -> Self {
        Self {
            store,
            prompts,
            writes: Mutex::new(()),
        }
    }

    /// Shared handle to the underlying store.
    pub fn store(&self) -> &Arc<dyn SleepStore> {
        &self.store
    }

    /// Processes a check-in of `kind` by `user` in `group` at `now`.
    ///
    /// Rejections leave every record untouched.
    ///
    /// # Errors
    ///
    /// Returns an error when the timezone is invalid, the store fails, or
    /// the check-in cannot be placed on the night-ordered minute scale.
    pub async fn check_in(
        &self,
        config: &Config,
        kind: CheckinKind,
        user_id: &UserId,
        group_id: &GroupId,
        now: DateTime<Utc>,
    ) -> Result<CheckinOutcome> {
        let tz = config.tz()?;
        let _writes = self.writes.lock().await;
        let record = self.store.user(user_id).await?;
        let verdict = evaluate(config, tz, kind, record.as_ref(), now);

        let Verdict::Accepted(acceptance) = verdict else {
            debug!(user = %user_id, group = %group_id, %kind, ?verdict, "check-in not accepted");
            return Ok(CheckinOutcome {
                reply: replies::rejection(kind, &verdict),
                verdict,
            });
        };

        let mut record = record.unwrap_or_else(|| UserRecord::new(user_id.clone()));
        let mut group = self
            .store
            .group(group_id)
            .await?
            .unwrap_or_else(|| GroupStats::new(group_id.clone()));

        let applied = apply_checkin(config, tz, &acceptance, &mut record, &mut group, now)?;
        self.store.save_user(&record).await?;
        self.store.save_group(&group).await?;

        info!(user = %user_id, group = %group_id, %kind, standing = ?acceptance.standing, "check-in accepted");

        let prompt = self.prompts.pick(config.prompts(kind));
        Ok(CheckinOutcome {
            verdict,
            reply: Some(replies::success(kind, acceptance.standing, &applied, prompt)),
        })
    }

    /// Clears every group's daily counters. Returns how many groups were reset.
    ///
    /// # Errors
    ///
    /// Propagates store errors.
    pub async fn daily_reset(&self) -> Result<usize> {
        let _writes = self.writes.lock().await;
        run_daily_reset(self.store.as_ref()).await
    }

    /// Archives every user's week into last week. Returns how many users rolled.
    ///
    /// # Errors
    ///
    /// Propagates store errors; on error no user has been rolled.
    pub async fn weekly_rollover(&self) -> Result<usize> {
        let _writes = self.writes.lock().await;
        run_weekly_rollover(self.store.as_ref()).await
    }

    /// Builds the statistics report for `group_id` at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error when the timezone is invalid or the store fails.
    pub async fn statistics(&self, config: &Config, group_id: &GroupId, now: DateTime<Utc>) -> Result<StatisticsReport> {
        let tz = config.tz()?;
        let day_start = statistics_day_start(config, tz, now).ok_or_else(|| {
            SleepError::Config(format!("cannot resolve {}:00 in {}", config.night_start_hour, config.timezone))
        })?;

        let groups = self.store.groups().await?;
        let users = self.store.users().await?;
        let all = all_stats(&groups, &users, day_start);
        let group = group_stats(groups.iter().find(|g| &g.group_id == group_id), &all);

        Ok(StatisticsReport::new(now, tz, all, group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::Standing;
    use crate::store::MemoryStore;
    use sleep_common::test_utils::id_fixtures::{test_group_id, test_user_id};
    use sleep_common::test_utils::shanghai;

    fn service() -> CheckinService {
        CheckinService::new(Arc::new(MemoryStore::new()), PromptPicker::new(Some(7)))
    }

    #[tokio::test]
    async fn test_first_checkin_persists_records() {
        let service = service();
        let config = Config::default();

        let outcome = service
            .check_in(&config, CheckinKind::Morning, &test_user_id(), &test_group_id(), shanghai(2024, 1, 1, 7, 0, 0))
            .await
            .unwrap();

        assert!(outcome.verdict.is_accepted());
        assert!(outcome.reply.unwrap().starts_with("早安成功！你是本群今天第1个起床的！"));

        let record = service.store().user(&test_user_id()).await.unwrap().unwrap();
        assert_eq!(record.weekly.morning_count, 1);
        let group = service.store().group(&test_group_id()).await.unwrap().unwrap();
        assert_eq!(group.morning_count, 1);
    }

    #[tokio::test]
    async fn test_rejection_does_not_touch_store() {
        let service = service();
        let config = Config::default();

        let outcome = service
            .check_in(&config, CheckinKind::Morning, &test_user_id(), &test_group_id(), shanghai(2024, 1, 1, 20, 0, 0))
            .await
            .unwrap();

        assert!(matches!(outcome.verdict, Verdict::OutsideWindow(_)));
        assert!(service.store().user(&test_user_id()).await.unwrap().is_none());
        assert!(service.store().groups().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_inert_has_no_reply() {
        let service = service();
        let config = Config {
            morning_enable: false,
            ..Config::default()
        };

        let outcome = service
            .check_in(&config, CheckinKind::Morning, &test_user_id(), &test_group_id(), shanghai(2024, 1, 1, 7, 0, 0))
            .await
            .unwrap();

        assert_eq!(outcome.verdict, Verdict::Inert);
        assert_eq!(outcome.reply, None);
    }

    #[tokio::test]
    async fn test_night_then_morning_accrues_sleep() {
        let service = service();
        let config = Config::default();
        let user = test_user_id();
        let group = test_group_id();

        service
            .check_in(&config, CheckinKind::Night, &user, &group, shanghai(2024, 1, 1, 23, 0, 0))
            .await
            .unwrap();
        let outcome = service
            .check_in(&config, CheckinKind::Morning, &user, &group, shanghai(2024, 1, 2, 7, 30, 0))
            .await
            .unwrap();

        assert!(matches!(
            outcome.verdict,
            Verdict::Accepted(acceptance) if acceptance.standing == Standing::First && acceptance.sleep_minutes == Some(510)
        ));
        let reply = outcome.reply.unwrap();
        assert!(reply.starts_with("早安成功！你的睡眠时长为8时30分，\n你是本群今天第1个起床的！"));

        let record = service.store().user(&user).await.unwrap().unwrap();
        assert_eq!(record.weekly.sleep_time, 510);
        assert_eq!(record.total_sleep_time, 510);
    }

    #[tokio::test]
    async fn test_repeat_reply_ends_with_prompt() {
        let service = service();
        let config = Config {
            multi_get_up_enable: true,
            morning_prompts: vec!["喝杯水吧".to_string()],
            ..Config::default()
        };
        let user = test_user_id();
        let group = test_group_id();

        service
            .check_in(&config, CheckinKind::Morning, &user, &group, shanghai(2024, 1, 1, 6, 30, 0))
            .await
            .unwrap();
        let outcome = service
            .check_in(&config, CheckinKind::Morning, &user, &group, shanghai(2024, 1, 1, 12, 30, 0))
            .await
            .unwrap();

        assert_eq!(
            outcome.reply.as_deref(),
            Some("早安成功！又起床啦，回笼觉睡得还好吗？\n喝杯水吧")
        );
    }

    #[tokio::test]
    async fn test_invalid_timezone_is_an_error() {
        let service = service();
        let config = Config {
            timezone: "Nowhere/Special".to_string(),
            ..Config::default()
        };

        let result = service
            .check_in(&config, CheckinKind::Morning, &test_user_id(), &test_group_id(), shanghai(2024, 1, 1, 7, 0, 0))
            .await;

        assert!(matches!(result, Err(SleepError::InvalidTimezone(_))));
    }
}
