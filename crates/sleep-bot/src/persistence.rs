//! Sled-backed persistence for user records, group rows and channel assignments.
//!
//! Each record type lives in its own tree and is stored as JSON. The weekly
//! rollover rewrites every user inside one sled transaction, so neither a
//! concurrent write nor a crash leaves the week half rolled.

use std::path::Path;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::transaction::{ConflictableTransactionError, TransactionError};
use sleep_common::{ChannelBinding, GroupId, GroupStats, Result, SleepError, UserId, UserRecord};
use sleep_core::rollover::roll_week;
use sleep_core::SleepStore;
use tracing::{debug, info};

const USER_TREE: &str = "sleep_user";
const GROUP_TREE: &str = "sleep_group";
const CHANNEL_TREE: &str = "channel";

/// [`SleepStore`] on an embedded sled database.
#[derive(Debug, Clone)]
pub struct SledStore {
    db: sled::Db,
    users: sled::Tree,
    groups: sled::Tree,
    channels: sled::Tree,
}

impl SledStore {
    /// Opens (or creates) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SleepError::Storage`] when the database or a tree cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening sleep database at {}", path.display());

        let db = sled::Config::default()
            .path(path)
            .cache_capacity(16 * 1024 * 1024)
            .flush_every_ms(Some(1000))
            .open()
            .map_err(SleepError::storage)?;

        Self::from_db(db)
    }

    /// Opens a throwaway database that is deleted on drop.
    ///
    /// # Errors
    ///
    /// Returns [`SleepError::Storage`] when the database cannot be created.
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::default()
            .temporary(true)
            .open()
            .map_err(SleepError::storage)?;
        Self::from_db(db)
    }

    fn from_db(db: sled::Db) -> Result<Self> {
        let users = db.open_tree(USER_TREE).map_err(SleepError::storage)?;
        let groups = db.open_tree(GROUP_TREE).map_err(SleepError::storage)?;
        let channels = db.open_tree(CHANNEL_TREE).map_err(SleepError::storage)?;
        Ok(Self {
            db,
            users,
            groups,
            channels,
        })
    }

    /// Flushes pending writes to disk.
    ///
    /// # Errors
    ///
    /// Returns [`SleepError::Storage`] when the flush fails.
    pub async fn flush(&self) -> Result<()> {
        self.db.flush_async().await.map_err(SleepError::storage)?;
        Ok(())
    }
}

fn channel_key(platform: &str, group_id: &GroupId) -> Vec<u8> {
    format!("{platform}\u{0}{group_id}").into_bytes()
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(SleepError::serialization)
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(SleepError::serialization)
}

fn get<T: DeserializeOwned>(tree: &sled::Tree, key: &[u8]) -> Result<Option<T>> {
    tree.get(key)
        .map_err(SleepError::storage)?
        .map(|bytes| decode(&bytes))
        .transpose()
}

fn scan<T: DeserializeOwned>(tree: &sled::Tree) -> Result<Vec<T>> {
    tree.iter()
        .values()
        .map(|value| value.map_err(SleepError::storage).and_then(|bytes| decode(&bytes)))
        .collect()
}

#[async_trait]
impl SleepStore for SledStore {
    async fn user(&self, user_id: &UserId) -> Result<Option<UserRecord>> {
        get(&self.users, user_id.0.as_bytes())
    }

    async fn save_user(&self, record: &UserRecord) -> Result<()> {
        self.users
            .insert(record.user_id.0.as_bytes(), encode(record)?)
            .map_err(SleepError::storage)?;
        Ok(())
    }

    async fn group(&self, group_id: &GroupId) -> Result<Option<GroupStats>> {
        get(&self.groups, group_id.0.as_bytes())
    }

    async fn save_group(&self, stats: &GroupStats) -> Result<()> {
        self.groups
            .insert(stats.group_id.0.as_bytes(), encode(stats)?)
            .map_err(SleepError::storage)?;
        Ok(())
    }

    async fn users(&self) -> Result<Vec<UserRecord>> {
        scan(&self.users)
    }

    async fn groups(&self) -> Result<Vec<GroupStats>> {
        scan(&self.groups)
    }

    async fn clear_groups(&self) -> Result<usize> {
        let cleared = self.groups.len();
        self.groups.clear().map_err(SleepError::storage)?;
        self.groups.flush_async().await.map_err(SleepError::storage)?;
        debug!(groups = cleared, "Cleared {GROUP_TREE}");
        Ok(cleared)
    }

    async fn roll_weeks(&self) -> Result<usize> {
        let keys = self
            .users
            .iter()
            .keys()
            .collect::<sled::Result<Vec<_>>>()
            .map_err(SleepError::storage)?;

        let rolled = self
            .users
            .transaction(|tx| {
                let mut rolled = 0usize;
                for key in &keys {
                    let Some(bytes) = tx.get(key)? else {
                        continue;
                    };
                    let mut record: UserRecord = decode(&bytes).map_err(ConflictableTransactionError::Abort)?;
                    roll_week(&mut record);
                    tx.insert(key.clone(), encode(&record).map_err(ConflictableTransactionError::Abort)?)?;
                    rolled += 1;
                }
                Ok(rolled)
            })
            .map_err(|e: TransactionError<SleepError>| match e {
                TransactionError::Abort(e) => e,
                TransactionError::Storage(e) => SleepError::storage(e),
            })?;

        self.users.flush_async().await.map_err(SleepError::storage)?;
        debug!(users = rolled, "Rolled user weeks");
        Ok(rolled)
    }

    async fn channel_assignee(&self, platform: &str, group_id: &GroupId) -> Result<Option<String>> {
        let binding: Option<ChannelBinding> = get(&self.channels, &channel_key(platform, group_id))?;
        Ok(binding.map(|binding| binding.assignee))
    }

    async fn assign_channel(&self, binding: &ChannelBinding) -> Result<()> {
        self.channels
            .insert(channel_key(&binding.platform, &binding.guild_id), encode(binding)?)
            .map_err(SleepError::storage)?;
        Ok(())
    }
}
