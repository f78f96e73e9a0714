//! Persistence seam.
//!
//! The core never touches a database directly. Everything it reads or writes
//! goes through [`SleepStore`], so hosts can plug in sled, memory, or any other
//! backend.

use std::collections::HashMap;

use async_trait::async_trait;
use sleep_common::{ChannelBinding, GroupId, GroupStats, Result, UserId, UserRecord};
use tokio::sync::RwLock;

use crate::rollover::roll_week;

/// Storage for user records, group rows and channel assignments.
#[async_trait]
pub trait SleepStore: Send + Sync {
    /// Loads one user record.
    async fn user(&self, user_id: &UserId) -> Result<Option<UserRecord>>;

    /// Inserts or replaces one user record.
    async fn save_user(&self, record: &UserRecord) -> Result<()>;

    /// Loads one group row.
    async fn group(&self, group_id: &GroupId) -> Result<Option<GroupStats>>;

    /// Inserts or replaces one group row.
    async fn save_group(&self, stats: &GroupStats) -> Result<()>;

    /// Snapshot of every user record.
    async fn users(&self) -> Result<Vec<UserRecord>>;

    /// Snapshot of every group row.
    async fn groups(&self) -> Result<Vec<GroupStats>>;

    /// Drops every group row at once. Returns how many rows were dropped.
    async fn clear_groups(&self) -> Result<usize>;

    /// Moves every user's running week into last week in one atomic step.
    /// Returns how many users were rolled.
    async fn roll_weeks(&self) -> Result<usize>;

    /// Bot identity assigned to serve `group_id` on `platform`.
    async fn channel_assignee(&self, platform: &str, group_id: &GroupId) -> Result<Option<String>>;

    /// Registers or updates a channel assignment.
    async fn assign_channel(&self, binding: &ChannelBinding) -> Result<()>;
}

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, UserRecord>,
    groups: HashMap<GroupId, GroupStats>,
    channels: HashMap<(String, GroupId), String>,
}

/// In-memory [`SleepStore`].
///
/// All tables sit behind a single lock, so batch operations are atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SleepStore for MemoryStore {
    async fn user(&self, user_id: &UserId) -> Result<Option<UserRecord>> {
        Ok(self.tables.read().await.users.get(user_id).cloned())
    }

    async fn save_user(&self, record: &UserRecord) -> Result<()> {
        self.tables
            .write()
            .await
            .users
            .insert(record.user_id.clone(), record.clone());
        Ok(())
    }

    async fn group(&self, group_id: &GroupId) -> Result<Option<GroupStats>> {
        Ok(self.tables.read().await.groups.get(group_id).cloned())
    }

    async fn save_group(&self, stats: &GroupStats) -> Result<()> {
        self.tables
            .write()
            .await
            .groups
            .insert(stats.group_id.clone(), stats.clone());
        Ok(())
    }

    async fn users(&self) -> Result<Vec<UserRecord>> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn groups(&self) -> Result<Vec<GroupStats>> {
        Ok(self.tables.read().await.groups.values().cloned().collect())
    }

    async fn clear_groups(&self) -> Result<usize> {
        let mut tables = self.tables.write().await;
        let cleared = tables.groups.len();
        tables.groups.clear();
        Ok(cleared)
    }

    async fn roll_weeks(&self) -> Result<usize> {
        let mut tables = self.tables.write().await;
        tables.users.values_mut().for_each(roll_week);
        Ok(tables.users.len())
    }

    async fn channel_assignee(&self, platform: &str, group_id: &GroupId) -> Result<Option<String>> {
        Ok(self
            .tables
            .read()
            .await
            .channels
            .get(&(platform.to_string(), group_id.clone()))
            .cloned())
    }

    async fn assign_channel(&self, binding: &ChannelBinding) -> Result<()> {
        self.tables.write().await.channels.insert(
            (binding.platform.clone(), binding.guild_id.clone()),
            binding.assignee.clone(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleep_common::test_utils::id_fixtures::{test_group_id, test_user_id, test_user_ids};

    #[tokio::test]
    async fn test_user_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.user(&test_user_id()).await.unwrap().is_none());

        let mut record = UserRecord::new(test_user_id());
        record.total_morning_count = 3;
        store.save_user(&record).await.unwrap();

        assert_eq!(store.user(&test_user_id()).await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_clear_groups() {
        let store = MemoryStore::new();
        store.save_group(&GroupStats::new(test_group_id())).await.unwrap();
        store.save_group(&GroupStats::new(GroupId::from("other"))).await.unwrap();
        assert_eq!(store.groups().await.unwrap().len(), 2);

        assert_eq!(store.clear_groups().await.unwrap(), 2);
        assert!(store.groups().await.unwrap().is_empty());
        assert!(store.group(&test_group_id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_roll_weeks_rolls_every_user() {
        let store = MemoryStore::new();
        for user_id in test_user_ids(3) {
            let mut record = UserRecord::new(user_id);
            record.weekly.night_count = 2;
            store.save_user(&record).await.unwrap();
        }

        assert_eq!(store.roll_weeks().await.unwrap(), 3);

        let users = store.users().await.unwrap();
        assert!(users.iter().all(|user| user.last_week.night_count == 2 && user.weekly.night_count == 0));
    }

    #[tokio::test]
    async fn test_channel_assignment() {
        let store = MemoryStore::new();
        let group = test_group_id();
        assert_eq!(store.channel_assignee("onebot", &group).await.unwrap(), None);

        store
            .assign_channel(&ChannelBinding {
                platform: "onebot".to_string(),
                guild_id: group.clone(),
                assignee: "bot-1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            store.channel_assignee("onebot", &group).await.unwrap(),
            Some("bot-1".to_string())
        );
        assert_eq!(store.channel_assignee("discord", &group).await.unwrap(), None);
    }
}
